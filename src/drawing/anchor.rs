use super::Drawing;
use crate::error::Error;
use crate::props;
use crate::schema::{HorizontalPosition, Kind, VerticalPosition};
use crate::tree::Element;
use crate::units::ImageUnits;
use crate::values::{AttrValue, HorizontalAlignment, HorizontalRelativeTo, VerticalAlignment, VerticalRelativeTo};

/// Position children are either an EMU offset or a named alignment.
enum Placing<'v> {
    Offset(i64),
    Align(&'v str),
}

impl<'a> Drawing<'a> {
    fn flag(&self, attr: &str) -> Result<Option<bool>, Error> {
        let anchor = self.anchor()?;
        Ok(self.tree().attribute(anchor, attr).and_then(bool::from_attr))
    }

    fn set_flag(mut self, attr: &str, value: bool) -> Result<Self, Error> {
        let anchor = self.anchor()?;
        let value = if value { "1" } else { "0" };
        self.tree_mut().set_attribute(anchor, attr, value);
        Ok(self)
    }

    pub fn allow_overlapping(self, value: bool) -> Result<Self, Error> {
        self.set_flag("allowOverlap", value)
    }

    pub fn allow_overlapping_value(&self) -> Result<Option<bool>, Error> {
        self.flag("allowOverlap")
    }

    pub fn behind_text(self, value: bool) -> Result<Self, Error> {
        self.set_flag("behindDoc", value)
    }

    pub fn behind_text_value(&self) -> Result<Option<bool>, Error> {
        self.flag("behindDoc")
    }

    pub fn layout_in_table_cell(self, value: bool) -> Result<Self, Error> {
        self.set_flag("layoutInCell", value)
    }

    pub fn layout_in_table_cell_value(&self) -> Result<Option<bool>, Error> {
        self.flag("layoutInCell")
    }

    pub fn locked(self, value: bool) -> Result<Self, Error> {
        self.set_flag("locked", value)
    }

    pub fn locked_value(&self) -> Result<Option<bool>, Error> {
        self.flag("locked")
    }

    /// Rewrites `wp:positionH`/`wp:positionV` to hold exactly one placing child.
    fn set_position<K: Kind>(mut self, relative_from: String, placing: Placing<'_>) -> Result<Self, Error> {
        let anchor = self.anchor()?;
        let tree = self.tree_mut();
        let position = props::get_or_init::<K>(tree, anchor, false)?;
        tree.set_attribute(position, "relativeFrom", relative_from);
        tree.clear_children(position);
        let child = match placing {
            Placing::Offset(emu) => Element::new("wp:posOffset").text(&emu.to_string()),
            Placing::Align(align) => Element::new("wp:align").text(align),
        };
        let child = tree.import(child);
        tree.append_child(position, child);
        Ok(self)
    }

    /// Text of the placing child and the `relativeFrom` of a position element.
    fn position<K: Kind>(&self, placing: &str) -> Result<Option<(String, String)>, Error> {
        let anchor = self.anchor()?;
        let tree = self.tree();
        let Some(position) = props::child::<K>(tree, anchor) else {
            return Ok(None);
        };
        let Some(node) = tree.first_child(position, placing) else {
            return Ok(None);
        };
        let relative_from = tree.attribute(position, "relativeFrom").unwrap_or_default();
        Ok(Some((tree.text_content(node).trim().to_string(), relative_from.to_string())))
    }

    /// Offset of the left edge from `relative_to`.
    pub fn absolute_horizontal_position(
        self,
        x: f64,
        units: ImageUnits,
        relative_to: HorizontalRelativeTo,
    ) -> Result<Self, Error> {
        self.set_position::<HorizontalPosition>(relative_to.to_attr(), Placing::Offset(units.to_emu(x)))
    }

    pub fn absolute_vertical_position(
        self,
        y: f64,
        units: ImageUnits,
        relative_to: VerticalRelativeTo,
    ) -> Result<Self, Error> {
        self.set_position::<VerticalPosition>(relative_to.to_attr(), Placing::Offset(units.to_emu(y)))
    }

    pub fn horizontal_alignment(
        self,
        alignment: HorizontalAlignment,
        relative_to: HorizontalRelativeTo,
    ) -> Result<Self, Error> {
        let align = alignment.to_attr();
        self.set_position::<HorizontalPosition>(relative_to.to_attr(), Placing::Align(&align))
    }

    pub fn vertical_alignment(
        self,
        alignment: VerticalAlignment,
        relative_to: VerticalRelativeTo,
    ) -> Result<Self, Error> {
        let align = alignment.to_attr();
        self.set_position::<VerticalPosition>(relative_to.to_attr(), Placing::Align(&align))
    }

    /// `None` when the drawing is aligned rather than offset.
    pub fn absolute_horizontal_position_value(
        &self,
        units: ImageUnits,
    ) -> Result<Option<(f64, HorizontalRelativeTo)>, Error> {
        Ok(self
            .position::<HorizontalPosition>("wp:posOffset")?
            .and_then(|(offset, from)| {
                Some((
                    units.from_emu(offset.parse().ok()?),
                    HorizontalRelativeTo::from_attr(&from)?,
                ))
            }))
    }

    pub fn absolute_vertical_position_value(
        &self,
        units: ImageUnits,
    ) -> Result<Option<(f64, VerticalRelativeTo)>, Error> {
        Ok(self
            .position::<VerticalPosition>("wp:posOffset")?
            .and_then(|(offset, from)| {
                Some((
                    units.from_emu(offset.parse().ok()?),
                    VerticalRelativeTo::from_attr(&from)?,
                ))
            }))
    }

    pub fn horizontal_alignment_value(
        &self,
    ) -> Result<Option<(HorizontalAlignment, HorizontalRelativeTo)>, Error> {
        Ok(self
            .position::<HorizontalPosition>("wp:align")?
            .and_then(|(align, from)| {
                Some((
                    HorizontalAlignment::from_attr(&align)?,
                    HorizontalRelativeTo::from_attr(&from)?,
                ))
            }))
    }

    pub fn vertical_alignment_value(
        &self,
    ) -> Result<Option<(VerticalAlignment, VerticalRelativeTo)>, Error> {
        Ok(self
            .position::<VerticalPosition>("wp:align")?
            .and_then(|(align, from)| {
                Some((
                    VerticalAlignment::from_attr(&align)?,
                    VerticalRelativeTo::from_attr(&from)?,
                ))
            }))
    }
}
