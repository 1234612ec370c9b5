//! Handles on WordprocessingML elements.
//!
//! Each handle borrows the [`Document`](crate::Document) mutably and names one
//! node. Setters take `Option`: `Some` writes the property, `None` removes it
//! along with any property host left empty. Setters consume the handle and
//! return it so calls chain with `?`.

macro_rules! handle {
    ($(#[$meta:meta])* $ty:ident = $name:literal) => {
        $(#[$meta])*
        pub struct $ty<'a> {
            doc: &'a mut $crate::docx::Document,
            id: $crate::tree::NodeId,
        }

        impl<'a> $ty<'a> {
            #[doc = concat!("`None` unless `id` is a `", $name, "` element.")]
            pub(crate) fn new(doc: &'a mut $crate::docx::Document, id: $crate::tree::NodeId) -> Option<Self> {
                if !doc.tree.is_element(id, $name) {
                    return None;
                }
                Some($ty { doc, id })
            }

            /// Caller guarantees `id` names the right element.
            pub(crate) fn at(doc: &'a mut $crate::docx::Document, id: $crate::tree::NodeId) -> Self {
                $ty { doc, id }
            }

            pub fn id(&self) -> $crate::tree::NodeId {
                self.id
            }

            fn tree(&self) -> &$crate::tree::Tree {
                &self.doc.tree
            }

            fn tree_mut(&mut self) -> &mut $crate::tree::Tree {
                &mut self.doc.tree
            }
        }
    };
}

/// On/off properties reached through a host chain.
macro_rules! toggles {
    ($chain:expr; $($(#[$meta:meta])* $setter:ident, $getter:ident => $kind:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $setter(mut self, value: Option<bool>) -> Result<Self, $crate::error::Error> {
                let id = self.id;
                $crate::props::set_in::<$crate::schema::$kind, bool>(self.tree_mut(), id, $chain, "val", value)?;
                Ok(self)
            }

            pub fn $getter(&self) -> Option<bool> {
                $crate::props::toggle_in::<$crate::schema::$kind>(self.tree(), self.id, $chain)
            }
        )*
    };
}

/// Single-`val` properties reached through a host chain.
macro_rules! values {
    ($chain:expr; $($(#[$meta:meta])* $setter:ident, $getter:ident => $kind:ident: $ty:ty;)*) => {
        $(
            $(#[$meta])*
            pub fn $setter(mut self, value: Option<$ty>) -> Result<Self, $crate::error::Error> {
                let id = self.id;
                $crate::props::set_in::<$crate::schema::$kind, $ty>(self.tree_mut(), id, $chain, "val", value)?;
                Ok(self)
            }

            pub fn $getter(&self) -> Option<$ty> {
                $crate::props::get_in::<$crate::schema::$kind, $ty>(self.tree(), self.id, $chain, "val")
            }
        )*
    };
}

mod body;
mod paragraph;
mod run;
mod table;

pub use body::{Body, LinePosition, Margin};
pub use paragraph::Paragraph;
pub use run::Run;
pub use table::{Table, TableCell, TableRow};

use crate::error::Error;
use crate::props;
use crate::schema::{self, Kind, Shading};
use crate::tree::{Element, NodeId, Tree};
use crate::units::{self, WidthUnits};
use crate::values::{AttrValue, BorderValues, ShadingPatternValues, parse_color};

pub(crate) const RUN_PROPERTIES: &[&str] = &["w:rPr"];
pub(crate) const PARAGRAPH_PROPERTIES: &[&str] = &["w:pPr"];
pub(crate) const TABLE_PROPERTIES: &[&str] = &["w:tblPr"];
pub(crate) const ROW_PROPERTIES: &[&str] = &["w:trPr"];
pub(crate) const CELL_PROPERTIES: &[&str] = &["w:tcPr"];

/// Edge of a paragraph, table or cell border.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderEdge {
    Top,
    Left,
    Bottom,
    Right,
    /// Between identical paragraphs; paragraphs only.
    Between,
    /// Tables and cells only.
    InsideHorizontal,
    InsideVertical,
}

impl BorderEdge {
    fn element_name(self) -> &'static str {
        match self {
            BorderEdge::Top => "w:top",
            BorderEdge::Left => "w:left",
            BorderEdge::Bottom => "w:bottom",
            BorderEdge::Right => "w:right",
            BorderEdge::Between => "w:between",
            BorderEdge::InsideHorizontal => "w:insideH",
            BorderEdge::InsideVertical => "w:insideV",
        }
    }
}

/// Side of a cell margin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Top,
    Left,
    Bottom,
    Right,
}

/// One border line. `width` is stored in sixths.
#[derive(Clone, Debug, PartialEq)]
pub struct Border {
    pub style: BorderValues,
    pub width: f64,
    /// `RRGGBB` or `auto`.
    pub color: String,
    pub spacing: u32,
}

impl Border {
    pub fn new(style: BorderValues, width: f64) -> Self {
        Border {
            style,
            width,
            color: "auto".to_string(),
            spacing: 0,
        }
    }

    pub fn single(width: f64) -> Self {
        Self::new(BorderValues::Single, width)
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    fn to_element(&self, name: &str) -> Result<Element, Error> {
        Ok(Element::new(name)
            .attr("w:val", self.style.to_attr())
            .attr("w:sz", units::to_sixths(self.width))
            .attr("w:space", self.spacing)
            .attr("w:color", color_value(&self.color)?))
    }

    fn read(tree: &Tree, node: NodeId) -> Option<Self> {
        let style = BorderValues::from_attr(tree.attribute(node, "w:val")?)?;
        let width = tree
            .attribute(node, "w:sz")
            .and_then(|v| v.parse().ok())
            .map_or(0.0, units::from_sixths);
        Some(Border {
            style,
            width,
            color: tree.attribute(node, "w:color").unwrap_or("auto").to_string(),
            spacing: tree
                .attribute(node, "w:space")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        })
    }
}

/// `auto`, `#RRGGBB`, `RRGGBB` or a basic HTML color name, as stored.
pub(crate) fn color_value(color: &str) -> Result<String, Error> {
    if color.eq_ignore_ascii_case("auto") {
        return Ok("auto".to_string());
    }
    parse_color(color).ok_or_else(|| Error::Schema(format!("'{color}' is not a color")))
}

pub(crate) fn set_border(
    tree: &mut Tree,
    owner: NodeId,
    chain: &[&str],
    name: &str,
    border: Option<&Border>,
) -> Result<(), Error> {
    let Some(border) = border else {
        if let Some(host) = props::host_chain(tree, owner, chain, false)? {
            tree.remove_children_named(host, name);
            props::prune(tree, host);
        }
        return Ok(());
    };
    if let Some(host_name) = chain.last()
        && !schema::accepts(host_name, name)
    {
        return Err(Error::Schema(format!("{host_name} does not accept {name}")));
    }
    let element = border.to_element(name)?;
    if let Some(host) = props::host_chain(tree, owner, chain, true)? {
        props::replace_named(tree, host, element)?;
    }
    Ok(())
}

pub(crate) fn border_value(tree: &Tree, owner: NodeId, chain: &[&str], name: &str) -> Option<Border> {
    let host = chain
        .iter()
        .try_fold(owner, |current, link| tree.first_child(current, link))?;
    Border::read(tree, tree.first_child(host, name)?)
}

/// Background fill through `w:shd`. A missing or `nil` pattern becomes
/// `clear` so the fill shows.
pub(crate) fn set_fill_color(
    tree: &mut Tree,
    owner: NodeId,
    chain: &[&str],
    color: Option<&str>,
) -> Result<(), Error> {
    let Some(color) = color else {
        return props::set_in::<Shading, String>(tree, owner, chain, "val", None);
    };
    let fill = color_value(color)?;
    props::set_in::<Shading, String>(tree, owner, chain, "fill", Some(fill))?;
    let pattern = props::get_in::<Shading, ShadingPatternValues>(tree, owner, chain, "val");
    if matches!(pattern, None | Some(ShadingPatternValues::Nil)) {
        props::set_in::<Shading, ShadingPatternValues>(
            tree,
            owner,
            chain,
            "val",
            Some(ShadingPatternValues::Clear),
        )?;
    }
    Ok(())
}

pub(crate) fn fill_color(tree: &Tree, owner: NodeId, chain: &[&str]) -> Option<String> {
    props::get_in::<Shading, String>(tree, owner, chain, "fill")
}

/// Width-typed property (`w:w` plus `w:type`).
pub(crate) fn set_width<T: Kind>(
    tree: &mut Tree,
    owner: NodeId,
    chain: &[&str],
    width: Option<f64>,
    units: WidthUnits,
) -> Result<(), Error> {
    let Some(width) = width else {
        if let Some(host) = props::host_chain(tree, owner, chain, false)? {
            tree.remove_children_named(host, T::NAME);
            props::prune(tree, host);
        }
        return Ok(());
    };
    props::set_in::<T, i64>(tree, owner, chain, "width", Some(units.to_native(width)))?;
    props::set_in::<T, String>(tree, owner, chain, "type", Some(units.type_value().to_string()))
}

/// A missing `w:type` reads as `dxa`.
pub(crate) fn width_value<T: Kind>(tree: &Tree, owner: NodeId, chain: &[&str]) -> Option<(f64, WidthUnits)> {
    let native = props::get_in::<T, i64>(tree, owner, chain, "width")?;
    let units = props::get_in::<T, String>(tree, owner, chain, "type")
        .map_or(WidthUnits::Points, |t| WidthUnits::from_type_value(&t));
    Some((units.from_native(native), units))
}

/// Detached copy of a property host (`w:rPr`, `w:pPr`), for carrying
/// formatting from one element to another.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formatting {
    properties: Option<Element>,
}

impl Formatting {
    pub fn is_empty(&self) -> bool {
        self.properties
            .as_ref()
            .is_none_or(|p| p.elements().next().is_none())
    }

    pub fn properties(&self) -> Option<&Element> {
        self.properties.as_ref()
    }

    pub(crate) fn capture(tree: &Tree, owner: NodeId, host: &str) -> Self {
        Formatting {
            properties: tree.first_child(owner, host).and_then(|h| tree.export(h)),
        }
    }

    /// Copies the captured properties onto `owner`. With `ignore_nulls`
    /// only the captured children are overwritten; otherwise the host is
    /// replaced wholesale, so an empty capture clears it.
    pub(crate) fn apply(
        &self,
        tree: &mut Tree,
        owner: NodeId,
        host: &str,
        ignore_nulls: bool,
    ) -> Result<(), Error> {
        if let Some(properties) = &self.properties
            && properties.name != host
        {
            return Err(Error::Schema(format!(
                "cannot apply {} formatting as {host}",
                properties.name
            )));
        }
        if !ignore_nulls {
            tree.remove_children_named(owner, host);
        }
        let Some(properties) = self.properties.as_ref().filter(|_| !self.is_empty()) else {
            return Ok(());
        };
        let target = props::get_or_init_named(tree, owner, host, true)?;
        for child in properties.elements() {
            props::replace_named(tree, target, child.clone())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_round_trips_through_sixths() {
        let mut tree = Tree::new(Element::new("w:p"));
        let p = tree.root();
        let border = Border::new(BorderValues::Double, 1.5).color("#00ff00").spacing(4);
        set_border(&mut tree, p, &["w:pPr", "w:pBdr"], "w:top", Some(&border)).unwrap();

        let top = tree.find_path(p, &["w:pPr", "w:pBdr", "w:top"]).unwrap();
        assert_eq!(tree.attribute(top, "w:sz"), Some("9"));
        assert_eq!(tree.attribute(top, "w:color"), Some("00FF00"));

        let read = border_value(&tree, p, &["w:pPr", "w:pBdr"], "w:top").unwrap();
        assert_eq!(read, border.color("00FF00"));

        set_border(&mut tree, p, &["w:pPr", "w:pBdr"], "w:top", None).unwrap();
        assert_eq!(tree.child_count(p), 0);
    }

    #[test]
    fn fill_color_keeps_an_explicit_pattern() {
        let mut tree = Tree::new(Element::new("w:r"));
        let r = tree.root();
        props::set_in::<Shading, ShadingPatternValues>(
            &mut tree,
            r,
            RUN_PROPERTIES,
            "val",
            Some(ShadingPatternValues::DiagonalStripe),
        )
        .unwrap();
        set_fill_color(&mut tree, r, RUN_PROPERTIES, Some("red")).unwrap();
        let shd = tree.find_path(r, &["w:rPr", "w:shd"]).unwrap();
        assert_eq!(tree.attribute(shd, "w:val"), Some("diagStripe"));
        assert_eq!(tree.attribute(shd, "w:fill"), Some("FF0000"));

        assert!(set_fill_color(&mut tree, r, RUN_PROPERTIES, Some("not a color")).is_err());
        set_fill_color(&mut tree, r, RUN_PROPERTIES, None).unwrap();
        assert!(tree.first_child(r, "w:rPr").is_none());
    }

    #[test]
    fn formatting_merge_and_replace() {
        let mut tree = Tree::new(Element::new("w:body"));
        let body = tree.root();
        let source = tree.import(
            Element::new("w:r").child(
                Element::new("w:rPr")
                    .child(Element::new("w:b"))
                    .child(Element::new("w:sz").attr("w:val", 28)),
            ),
        );
        let target = tree.import(
            Element::new("w:r").child(
                Element::new("w:rPr")
                    .child(Element::new("w:i"))
                    .child(Element::new("w:sz").attr("w:val", 20)),
            ),
        );
        tree.append_child(body, source);
        tree.append_child(body, target);
        let formatting = Formatting::capture(&tree, source, "w:rPr");

        formatting.apply(&mut tree, target, "w:rPr", true).unwrap();
        let rpr = tree.first_child(target, "w:rPr").unwrap();
        let names: Vec<_> = tree
            .child_elements(rpr)
            .filter_map(|c| tree.name(c))
            .collect();
        assert_eq!(names, ["w:b", "w:i", "w:sz"]);
        let sz = tree.first_child(rpr, "w:sz").unwrap();
        assert_eq!(tree.attribute(sz, "w:val"), Some("28"));

        formatting.apply(&mut tree, target, "w:rPr", false).unwrap();
        let rpr = tree.first_child(target, "w:rPr").unwrap();
        assert!(tree.first_child(rpr, "w:i").is_none());

        Formatting::default().apply(&mut tree, target, "w:rPr", false).unwrap();
        assert!(tree.first_child(target, "w:rPr").is_none());
    }
}
