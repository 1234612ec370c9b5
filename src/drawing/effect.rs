use super::Drawing;
use crate::error::Error;
use crate::props;
use crate::schema::{AlphaModulationFixed, EffectExtent, LineOutline};
use crate::tree::Element;
use crate::units;
use crate::values::parse_color;

impl<'a> Drawing<'a> {
    /// 0.0 is invisible, 1.0 fully opaque; `None` clears it.
    pub fn opacity(mut self, opacity: Option<f64>) -> Result<Self, Error> {
        let blip = self.blip()?;
        props::set_field_or_remove::<AlphaModulationFixed, i64>(
            self.tree_mut(),
            blip,
            "amount",
            opacity.map(units::percentage_from_factor),
        )?;
        Ok(self)
    }

    pub fn opacity_value(&self) -> Option<f64> {
        let blip = self.blip().ok()?;
        props::field::<AlphaModulationFixed, i64>(self.tree(), blip, "amount")
            .map(units::factor_from_percentage)
    }

    /// Solid outline `width` points wide; `None` removes it. `color` is
    /// `#RRGGBB`, `RRGGBB` or a basic HTML color name.
    pub fn border(mut self, width: Option<f64>, color: &str) -> Result<Self, Error> {
        let sp_pr = self.shape_properties()?;
        let Some(width) = width else {
            props::set_property_class_or_remove::<LineOutline>(self.tree_mut(), sp_pr, None)?;
            return Ok(self);
        };
        let hex = parse_color(color).unwrap_or_else(|| {
            log::warn!("Unrecognized border color '{color}', using black");
            "000000".to_string()
        });
        let outline = Element::new("a:ln")
            .attr("w", units::emu_from_points(width))
            .child(Element::new("a:solidFill").child(Element::new("a:srgbClr").attr("val", hex)))
            .child(Element::new("a:miter"));
        props::set_property_class_or_remove::<LineOutline>(self.tree_mut(), sp_pr, Some(outline))?;

        let container = self.container();
        let spread = units::emu_from_pixels(width.trunc() + 1.0);
        let tree = self.tree_mut();
        let effect_extent = props::get_or_init::<EffectExtent>(tree, container, false)?;
        for attr in ["l", "t", "r", "b"] {
            tree.set_attribute(effect_extent, attr, spread.to_string());
        }
        Ok(self)
    }

    /// Outline width in points.
    pub fn border_value(&self) -> Option<f64> {
        let sp_pr = self.shape_properties().ok()?;
        props::field::<LineOutline, i64>(self.tree(), sp_pr, "width").map(units::points_from_emu)
    }
}
