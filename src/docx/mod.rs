mod content_types;
mod media;
mod rels;

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use std::time::Instant;

use image::ImageFormat;

use crate::drawing::Drawing;
use crate::error::Error;
use crate::tree::xml::{self, Namespaces};
use crate::tree::{Element, NodeId, Tree};
use crate::wml::Body;

use content_types::ContentTypes;
use rels::{IMAGE_REL, OFFICE_DOCUMENT_REL, Relationships, rels_path_for, resolve_target};

pub use media::{ImageRef, Media, pixel_size};

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const PACKAGE_RELS_PART: &str = "_rels/.rels";
const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// An open `.docx` package: the main document as a mutable tree, its
/// relationships, and every other part kept verbatim.
pub struct Document {
    pub(crate) tree: Tree,
    pub(crate) body: NodeId,
    namespaces: Namespaces,
    main_part: String,
    rels: Relationships,
    content_types: ContentTypes,
    parts: BTreeMap<String, Vec<u8>>,
}

fn empty_body() -> Element {
    Element::new("w:document").child(
        Element::new("w:body").child(
            Element::new("w:sectPr")
                .child(
                    Element::new("w:pgSz")
                        .attr("w:w", 11906)
                        .attr("w:h", 16838),
                )
                .child(
                    Element::new("w:pgMar")
                        .attr("w:top", 1440)
                        .attr("w:right", 1440)
                        .attr("w:bottom", 1440)
                        .attr("w:left", 1440)
                        .attr("w:header", 708)
                        .attr("w:footer", 708)
                        .attr("w:gutter", 0),
                ),
        ),
    )
}

fn read_part<R: Read + Seek>(zip: &mut zip::ZipArchive<R>, name: &str) -> Option<String> {
    let mut content = String::new();
    zip.by_name(name).ok()?.read_to_string(&mut content).ok()?;
    Some(content)
}

impl Document {
    pub fn new() -> Self {
        let mut package_rels = Relationships::default();
        package_rels.add(OFFICE_DOCUMENT_REL, DEFAULT_MAIN_PART);
        let mut parts = BTreeMap::new();
        parts.insert(PACKAGE_RELS_PART.to_string(), package_rels.to_xml().into_bytes());

        let tree = Tree::new(empty_body());
        let body = tree.first_child(tree.root(), "w:body").unwrap_or(tree.root());
        Document {
            tree,
            body,
            namespaces: xml::canonical_namespaces(),
            main_part: DEFAULT_MAIN_PART.to_string(),
            rels: Relationships::default(),
            content_types: ContentTypes::new_package(DEFAULT_MAIN_PART),
            parts,
        }
    }

    pub fn open(path: &Path) -> Result<Self, Error> {
        let t0 = Instant::now();
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
                std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
            ),
            _ => Error::Io(e),
        })?;
        let zip = zip::ZipArchive::new(file)
            .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;
        let doc = Self::from_archive(zip)?;
        log::info!(
            "Timing: open={:.1}ms ({})",
            t0.elapsed().as_secs_f64() * 1000.0,
            path.display()
        );
        Ok(doc)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        let zip = zip::ZipArchive::new(Cursor::new(data))
            .map_err(|_| Error::InvalidDocx("data is not a ZIP archive".into()))?;
        Self::from_archive(zip)
    }

    fn from_archive<R: Read + Seek>(mut zip: zip::ZipArchive<R>) -> Result<Self, Error> {
        let t0 = Instant::now();
        let main_part = read_part(&mut zip, PACKAGE_RELS_PART)
            .map(|xml| Relationships::parse(&xml))
            .and_then(|rels| {
                rels.first_of_type(OFFICE_DOCUMENT_REL)
                    .map(|r| resolve_target("", &r.target))
            })
            .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string());

        let mut parts = BTreeMap::new();
        for i in 0..zip.len() {
            let mut entry = zip.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            let mut data = Vec::new();
            entry.read_to_end(&mut data)?;
            parts.insert(name, data);
        }
        let t_read = t0.elapsed();

        let main = parts.remove(&main_part).ok_or_else(|| {
            Error::InvalidDocx(format!("missing {main_part} (is this a DOCX file?)"))
        })?;
        let main = String::from_utf8(main)
            .map_err(|_| Error::InvalidDocx(format!("{main_part} is not UTF-8")))?;
        let (tree, namespaces) = xml::parse_tree(&main)?;
        let body = tree
            .first_child(tree.root(), "w:body")
            .ok_or_else(|| Error::InvalidDocx("missing w:body".into()))?;

        let rels = parts
            .remove(&rels_path_for(&main_part))
            .map(|data| Relationships::parse(&String::from_utf8_lossy(&data)))
            .unwrap_or_default();
        let content_types = match parts.remove(CONTENT_TYPES_PART) {
            Some(data) => ContentTypes::parse(&String::from_utf8_lossy(&data)),
            None => {
                log::warn!("Package has no {CONTENT_TYPES_PART}, rebuilding it");
                ContentTypes::new_package(&main_part)
            }
        };

        log::info!(
            "Timing: read={:.1}ms, parse={:.1}ms ({} parts)",
            t_read.as_secs_f64() * 1000.0,
            (t0.elapsed() - t_read).as_secs_f64() * 1000.0,
            parts.len() + 3
        );
        Ok(Document {
            tree,
            body,
            namespaces,
            main_part,
            rels,
            content_types,
            parts,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let t0 = Instant::now();
        let data = self.to_bytes()?;
        let t_serialize = t0.elapsed();
        std::fs::write(path, &data)?;
        log::info!(
            "Timing: serialize={:.1}ms, write={:.1}ms (output {} bytes)",
            t_serialize.as_secs_f64() * 1000.0,
            (t0.elapsed() - t_serialize).as_secs_f64() * 1000.0,
            data.len()
        );
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let deflated = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        let stored = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);

        zip.start_file(CONTENT_TYPES_PART, deflated)?;
        zip.write_all(self.content_types.to_xml().as_bytes())?;
        zip.start_file(self.main_part.as_str(), deflated)?;
        zip.write_all(xml::write_tree(&self.tree, &self.namespaces).as_bytes())?;
        zip.start_file(rels_path_for(&self.main_part), deflated)?;
        zip.write_all(self.rels.to_xml().as_bytes())?;

        for (name, data) in &self.parts {
            let options = if name.starts_with("word/media/") { stored } else { deflated };
            zip.start_file(name.as_str(), options)?;
            zip.write_all(data)?;
        }
        Ok(zip.finish()?.into_inner())
    }

    pub fn media(&self) -> Media<'_> {
        Media {
            main_part: &self.main_part,
            rels: &self.rels,
            parts: &self.parts,
        }
    }

    /// Every image part, by part name.
    pub fn images(&self) -> Vec<(&str, &[u8])> {
        self.media().images()
    }

    pub fn add_image(&mut self, data: Vec<u8>, format: ImageFormat) -> Result<ImageRef, Error> {
        let pixel_size = pixel_size(&data)?;
        let ext = media::extension(format);
        let dir = match self.main_part.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/"),
            None => String::new(),
        };
        let (name, part_name) = (1..)
            .map(|n| {
                let name = format!("image{n}.{ext}");
                let part = format!("{dir}media/{name}");
                (name, part)
            })
            .find(|(_, part)| !self.parts.contains_key(part))
            .unwrap_or_default();
        self.content_types
            .ensure_default(ext, format.to_mime_type());
        self.parts.insert(part_name, data);
        let rel_id = self.rels.add(IMAGE_REL, &format!("media/{name}"));
        log::debug!("Added {name} as {rel_id} ({}x{} px)", pixel_size.0, pixel_size.1);
        Ok(ImageRef {
            rel_id,
            name,
            pixel_size,
        })
    }

    pub fn add_image_file(&mut self, path: &Path) -> Result<ImageRef, Error> {
        let format = ImageFormat::from_path(path)?;
        let data = std::fs::read(path)?;
        self.add_image(data, format)
    }

    pub fn body(&mut self) -> Body<'_> {
        let id = self.body;
        Body::new(self, id)
    }

    /// Every `w:drawing` in the body, in document order.
    pub fn drawings(&self) -> Vec<NodeId> {
        self.tree.descendants_named(self.body, "w:drawing")
    }

    /// Handle on a drawing returned by [`Document::drawings`].
    pub fn drawing(&mut self, id: NodeId) -> Option<Drawing<'_>> {
        if !self.tree.is_element(id, "w:drawing") {
            return None;
        }
        Drawing::new(self, id)
    }

    /// Next free `wp:docPr` id.
    pub(crate) fn next_drawing_id(&self) -> u32 {
        self.tree
            .descendants_named(self.body, "wp:docPr")
            .into_iter()
            .filter_map(|d| self.tree.attribute(d, "id")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Raw access to the main document tree, bypassing the handles.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
