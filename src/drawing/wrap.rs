use super::Drawing;
use crate::error::Error;
use crate::tree::{Element, NodeId};
use crate::units::ImageUnits;
use crate::values::{AttrValue, WrapTextValues};

const WRAP_ELEMENTS: &[&str] = &[
    "wp:wrapNone",
    "wp:wrapSquare",
    "wp:wrapTight",
    "wp:wrapThrough",
    "wp:wrapTopBottom",
];

/// Edge of the wrap polygon coordinate space.
pub const WRAP_POLYGON_SIZE: i64 = 21600;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrappingType {
    None,
    Square,
    Tight,
    Through,
    TopAndBottom,
}

impl WrappingType {
    fn from_element(name: &str) -> Option<Self> {
        Some(match name {
            "wp:wrapNone" => WrappingType::None,
            "wp:wrapSquare" => WrappingType::Square,
            "wp:wrapTight" => WrappingType::Tight,
            "wp:wrapThrough" => WrappingType::Through,
            "wp:wrapTopBottom" => WrappingType::TopAndBottom,
            _ => return None,
        })
    }
}

/// `wp:wrapPolygon` through `points`; empty means the drawing's bounding box.
fn wrap_polygon(points: &[(i64, i64)]) -> Element {
    let full = WRAP_POLYGON_SIZE;
    let default = [(0, 0), (0, full), (full, full), (full, 0), (0, 0)];
    let points = if points.is_empty() { &default[..] } else { points };
    let mut polygon = Element::new("wp:wrapPolygon").attr("edited", 0);
    for (i, (x, y)) in points.iter().enumerate() {
        let name = if i == 0 { "wp:start" } else { "wp:lineTo" };
        polygon = polygon.child(Element::new(name).attr("x", x).attr("y", y));
    }
    polygon
}

fn distance(value: f64, units: ImageUnits) -> String {
    units.to_emu(value).max(0).to_string()
}

impl<'a> Drawing<'a> {
    pub fn wrapping_type(&self) -> Result<WrappingType, Error> {
        let anchor = self.anchor()?;
        self.tree()
            .child_elements(anchor)
            .find_map(|c| self.tree().name(c).and_then(WrappingType::from_element))
            .ok_or(Error::MalformedDrawing("anchor has no wrapping element"))
    }

    /// Drops every wrap element and zeroes the text distances.
    fn reset_all_wrapping(&mut self, anchor: NodeId) {
        let tree = self.tree_mut();
        for name in WRAP_ELEMENTS {
            tree.remove_children_named(anchor, name);
        }
        for attr in ["distT", "distB", "distL", "distR"] {
            tree.set_attribute(anchor, attr, "0");
        }
    }

    /// Places a wrap element right after `wp:effectExtent`.
    fn insert_wrapping(&mut self, anchor: NodeId, wrap: Element) {
        let tree = self.tree_mut();
        let index = tree
            .first_child(anchor, "wp:effectExtent")
            .or_else(|| tree.first_child(anchor, "wp:extent"))
            .and_then(|n| tree.index_of(anchor, n))
            .map(|i| i + 1)
            .unwrap_or(0);
        let wrap = tree.import(wrap);
        tree.insert_child(anchor, index, wrap);
    }

    /// In front of (or, with [`Drawing::behind_text`], behind) the text.
    pub fn no_text_wrapping(mut self) -> Result<Self, Error> {
        let anchor = self.anchor()?;
        self.reset_all_wrapping(anchor);
        self.insert_wrapping(anchor, Element::new("wp:wrapNone"));
        Ok(self)
    }

    pub fn square_wrapping(
        mut self,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
        units: ImageUnits,
        wrap_text: WrapTextValues,
    ) -> Result<Self, Error> {
        let anchor = self.anchor()?;
        self.reset_all_wrapping(anchor);
        let tree = self.tree_mut();
        tree.set_attribute(anchor, "distT", distance(top, units));
        tree.set_attribute(anchor, "distB", distance(bottom, units));
        tree.set_attribute(anchor, "distL", distance(left, units));
        tree.set_attribute(anchor, "distR", distance(right, units));
        self.insert_wrapping(
            anchor,
            Element::new("wp:wrapSquare").attr("wrapText", wrap_text.to_attr()),
        );
        Ok(self)
    }

    /// Wraps tightly around `polygon` (points in a 21600-unit square).
    pub fn tight_wrapping(
        self,
        polygon: &[(i64, i64)],
        left: f64,
        right: f64,
        units: ImageUnits,
        wrap_text: WrapTextValues,
    ) -> Result<Self, Error> {
        self.polygon_wrapping("wp:wrapTight", polygon, left, right, units, wrap_text)
    }

    pub fn through_wrapping(
        self,
        polygon: &[(i64, i64)],
        left: f64,
        right: f64,
        units: ImageUnits,
        wrap_text: WrapTextValues,
    ) -> Result<Self, Error> {
        self.polygon_wrapping("wp:wrapThrough", polygon, left, right, units, wrap_text)
    }

    fn polygon_wrapping(
        mut self,
        name: &str,
        polygon: &[(i64, i64)],
        left: f64,
        right: f64,
        units: ImageUnits,
        wrap_text: WrapTextValues,
    ) -> Result<Self, Error> {
        let anchor = self.anchor()?;
        self.reset_all_wrapping(anchor);
        let tree = self.tree_mut();
        tree.set_attribute(anchor, "distL", distance(left, units));
        tree.set_attribute(anchor, "distR", distance(right, units));
        let wrap = Element::new(name)
            .attr("wrapText", wrap_text.to_attr())
            .child(wrap_polygon(polygon));
        self.insert_wrapping(anchor, wrap);
        Ok(self)
    }

    pub fn top_and_bottom_wrapping(mut self, top: f64, bottom: f64, units: ImageUnits) -> Result<Self, Error> {
        let anchor = self.anchor()?;
        self.reset_all_wrapping(anchor);
        let tree = self.tree_mut();
        tree.set_attribute(anchor, "distT", distance(top, units));
        tree.set_attribute(anchor, "distB", distance(bottom, units));
        self.insert_wrapping(anchor, Element::new("wp:wrapTopBottom"));
        Ok(self)
    }

    /// Text distances (top, bottom, left, right) of an anchored drawing.
    pub fn wrapping_distances(&self, units: ImageUnits) -> Result<(f64, f64, f64, f64), Error> {
        let anchor = self.anchor()?;
        let read = |attr: &str| {
            let emu = self
                .tree()
                .attribute(anchor, attr)
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(0);
            units.from_emu(emu)
        };
        Ok((read("distT"), read("distB"), read("distL"), read("distR")))
    }
}
