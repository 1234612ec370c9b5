//! Image geometry on `w:drawing` elements.
//!
//! Three sizes are tracked per drawing: the *displayed* size stored in
//! `wp:extent`, the *uncropped* size (displayed inflated by the crop factors)
//! and the *original* size of the embedded bitmap.

mod anchor;
mod convert;
mod create;
mod crop;
mod effect;
mod transform;
mod wrap;

pub use crop::Cropping;
pub use wrap::{WRAP_POLYGON_SIZE, WrappingType};

pub(crate) use create::inline_picture;

use crate::docx::Document;
use crate::error::Error;
use crate::tree::{NodeId, Tree};
use crate::units::{self, ImageUnits};

pub(crate) const PICTURE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

/// Which container a `w:drawing` currently holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Inline(NodeId),
    Anchored(NodeId),
}

impl Placement {
    pub fn node(self) -> NodeId {
        match self {
            Placement::Inline(id) | Placement::Anchored(id) => id,
        }
    }

    pub fn is_anchored(self) -> bool {
        matches!(self, Placement::Anchored(_))
    }

    fn of(tree: &Tree, drawing: NodeId) -> Option<Placement> {
        tree.child_elements(drawing).find_map(|c| match tree.name(c) {
            Some("wp:inline") => Some(Placement::Inline(c)),
            Some("wp:anchor") => Some(Placement::Anchored(c)),
            _ => None,
        })
    }
}

/// Handle on one `w:drawing`. Mutators consume and return the handle.
pub struct Drawing<'a> {
    doc: &'a mut Document,
    id: NodeId,
}

impl<'a> Drawing<'a> {
    /// `None` when the drawing holds neither an inline nor an anchor.
    pub(crate) fn new(doc: &'a mut Document, id: NodeId) -> Option<Self> {
        Placement::of(&doc.tree, id)?;
        Some(Drawing { doc, id })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn placement(&self) -> Placement {
        // Construction guarantees a container; a caller detaching it by hand
        // reads as an empty inline.
        Placement::of(self.tree(), self.id).unwrap_or(Placement::Inline(self.id))
    }

    pub fn is_anchored(&self) -> bool {
        self.placement().is_anchored()
    }

    fn tree(&self) -> &Tree {
        &self.doc.tree
    }

    fn tree_mut(&mut self) -> &mut Tree {
        &mut self.doc.tree
    }

    fn container(&self) -> NodeId {
        self.placement().node()
    }

    fn anchor(&self) -> Result<NodeId, Error> {
        match self.placement() {
            Placement::Anchored(id) => Ok(id),
            Placement::Inline(_) => Err(Error::NotAnchored),
        }
    }

    fn picture(&self) -> Option<NodeId> {
        self.tree()
            .find_path(self.container(), &["a:graphic", "a:graphicData", "pic:pic"])
    }

    fn picture_child(&self, name: &str) -> Result<NodeId, Error> {
        self.picture()
            .and_then(|pic| self.tree().first_child(pic, name))
            .ok_or(Error::MalformedDrawing("missing picture properties"))
    }

    fn blip_fill(&self) -> Result<NodeId, Error> {
        self.picture_child("pic:blipFill")
    }

    fn shape_properties(&self) -> Result<NodeId, Error> {
        self.picture_child("pic:spPr")
    }

    fn blip(&self) -> Result<NodeId, Error> {
        let blip_fill = self.blip_fill()?;
        self.tree()
            .first_child(blip_fill, "a:blip")
            .ok_or(Error::MalformedDrawing("missing a:blip"))
    }

    /// Relationship id of the embedded picture.
    pub fn embed_id(&self) -> Option<String> {
        let blip = self.blip().ok()?;
        self.tree().attribute(blip, "r:embed").map(str::to_string)
    }

    pub fn name(&self) -> Option<String> {
        let doc_pr = self.tree().first_child(self.container(), "wp:docPr")?;
        self.tree().attribute(doc_pr, "name").map(str::to_string)
    }

    fn extent_node(&self) -> Result<NodeId, Error> {
        self.tree()
            .first_child(self.container(), "wp:extent")
            .ok_or(Error::MalformedDrawing("missing wp:extent"))
    }

    /// Displayed size in EMU.
    fn extent_emu(&self) -> Result<(i64, i64), Error> {
        let extent = self.extent_node()?;
        let read = |attr: &str| {
            self.tree()
                .attribute(extent, attr)
                .and_then(|v| v.parse::<i64>().ok())
                .ok_or(Error::MalformedDrawing("unreadable wp:extent"))
        };
        Ok((read("cx")?, read("cy")?))
    }

    /// Writes the displayed size to `wp:extent` and mirrors it into the
    /// picture's `a:xfrm/a:ext`.
    fn set_extent_emu(&mut self, cx: i64, cy: i64) -> Result<(), Error> {
        let extent = self.extent_node()?;
        let ext = self
            .shape_properties()
            .ok()
            .and_then(|sp_pr| self.tree().find_path(sp_pr, &["a:xfrm", "a:ext"]));
        let tree = self.tree_mut();
        tree.set_attribute(extent, "cx", cx.to_string());
        tree.set_attribute(extent, "cy", cy.to_string());
        if let Some(ext) = ext {
            tree.set_attribute(ext, "cx", cx.to_string());
            tree.set_attribute(ext, "cy", cy.to_string());
        }
        Ok(())
    }

    fn size_px(&self) -> Result<(f64, f64), Error> {
        let (cx, cy) = self.extent_emu()?;
        Ok((units::pixels_from_emu(cx), units::pixels_from_emu(cy)))
    }

    fn resize_px(&mut self, width: f64, height: f64) -> Result<(), Error> {
        self.set_extent_emu(units::emu_from_pixels(width), units::emu_from_pixels(height))
    }

    pub fn width(&self, units: ImageUnits) -> Result<f64, Error> {
        Ok(units.to_other(self.size_px()?.0))
    }

    pub fn height(&self, units: ImageUnits) -> Result<f64, Error> {
        Ok(units.to_other(self.size_px()?.1))
    }

    /// Native size of the embedded bitmap, queried from the image part.
    pub fn original_size(&self, units: ImageUnits) -> Result<(f64, f64), Error> {
        let rel_id = self
            .embed_id()
            .ok_or_else(|| Error::MissingImage(String::new()))?;
        let (w, h) = self.doc.media().pixel_size(&rel_id)?;
        Ok((units.to_other(w as f64), units.to_other(h as f64)))
    }

    pub fn original_width(&self, units: ImageUnits) -> Result<f64, Error> {
        Ok(self.original_size(units)?.0)
    }

    pub fn original_height(&self, units: ImageUnits) -> Result<f64, Error> {
        Ok(self.original_size(units)?.1)
    }
}
