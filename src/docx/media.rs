use std::collections::BTreeMap;
use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::rels::{IMAGE_REL, Relationships, resolve_target};
use crate::error::Error;

/// An image part added to the package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    pub rel_id: String,
    /// File name inside `word/media/`, also used as the drawing's name.
    pub name: String,
    pub pixel_size: (u32, u32),
}

/// Read access to the image parts reachable from the main document.
pub struct Media<'a> {
    pub(super) main_part: &'a str,
    pub(super) rels: &'a Relationships,
    pub(super) parts: &'a BTreeMap<String, Vec<u8>>,
}

impl<'a> Media<'a> {
    pub fn part_name(&self, rel_id: &str) -> Option<String> {
        let rel = self.rels.get(rel_id)?;
        if rel.external {
            return None;
        }
        Some(resolve_target(self.main_part, &rel.target))
    }

    pub fn bytes(&self, rel_id: &str) -> Result<&'a [u8], Error> {
        self.part_name(rel_id)
            .and_then(|name| self.parts.get(&name))
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingImage(rel_id.to_string()))
    }

    /// Native pixel size, decoded from the image header only.
    pub fn pixel_size(&self, rel_id: &str) -> Result<(u32, u32), Error> {
        pixel_size(self.bytes(rel_id)?)
    }

    /// Every image part, by part name.
    pub fn images(&self) -> Vec<(&'a str, &'a [u8])> {
        let mut seen = Vec::new();
        for rel in self.rels.iter().filter(|r| r.rel_type == IMAGE_REL && !r.external) {
            let name = resolve_target(self.main_part, &rel.target);
            if let Some((key, data)) = self.parts.get_key_value(&name)
                && !seen.iter().any(|(n, _): &(&str, &[u8])| *n == key.as_str())
            {
                seen.push((key.as_str(), data.as_slice()));
            }
        }
        seen
    }
}

pub fn pixel_size(data: &[u8]) -> Result<(u32, u32), Error> {
    Ok(ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .into_dimensions()?)
}

pub(super) fn extension(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("bin")
}
