use super::Drawing;
use crate::error::Error;
use crate::props;
use crate::schema::Transform2D;
use crate::units::{self, ImageUnits};

impl<'a> Drawing<'a> {
    /// Sets the displayed width. With `keep_aspect_ratio` the height scales by
    /// the same factor.
    pub fn set_width(mut self, width: f64, units: ImageUnits, keep_aspect_ratio: bool) -> Result<Self, Error> {
        let (last_cx, cy) = self.extent_emu()?;
        let cx = units.to_emu(width);
        let cy = if keep_aspect_ratio {
            let last_cx = if last_cx == 0 { 1 } else { last_cx };
            (cy as f64 * cx as f64 / last_cx as f64).round() as i64
        } else {
            cy
        };
        self.set_extent_emu(cx, cy)?;
        Ok(self)
    }

    pub fn set_height(mut self, height: f64, units: ImageUnits, keep_aspect_ratio: bool) -> Result<Self, Error> {
        let (cx, last_cy) = self.extent_emu()?;
        let cy = units.to_emu(height);
        let cx = if keep_aspect_ratio {
            let last_cy = if last_cy == 0 { 1 } else { last_cy };
            (cx as f64 * cy as f64 / last_cy as f64).round() as i64
        } else {
            cx
        };
        self.set_extent_emu(cx, cy)?;
        Ok(self)
    }

    pub fn resize(mut self, width: f64, height: f64, units: ImageUnits) -> Result<Self, Error> {
        self.set_extent_emu(units.to_emu(width), units.to_emu(height))?;
        Ok(self)
    }

    pub fn scale_horizontally(self, factor: f64, keep_aspect_ratio: bool) -> Result<Self, Error> {
        let width = self.width(ImageUnits::Pixels)?;
        self.set_width(width * factor, ImageUnits::Pixels, keep_aspect_ratio)
    }

    pub fn scale_vertically(self, factor: f64, keep_aspect_ratio: bool) -> Result<Self, Error> {
        let height = self.height(ImageUnits::Pixels)?;
        self.set_height(height * factor, ImageUnits::Pixels, keep_aspect_ratio)
    }

    pub fn scale(self, x_factor: f64, y_factor: f64) -> Result<Self, Error> {
        let (width, height) = self.size_px()?;
        self.resize(width * x_factor, height * y_factor, ImageUnits::Pixels)
    }

    /// Clockwise rotation in degrees; `None` clears it.
    pub fn rotation(mut self, degrees: Option<f64>) -> Result<Self, Error> {
        let sp_pr = self.shape_properties()?;
        props::set_field_or_remove::<Transform2D, i64>(
            self.tree_mut(),
            sp_pr,
            "rotation",
            degrees.map(units::angle_from_degrees),
        )?;
        Ok(self)
    }

    pub fn rotation_value(&self) -> Option<f64> {
        let sp_pr = self.shape_properties().ok()?;
        props::field::<Transform2D, i64>(self.tree(), sp_pr, "rotation").map(units::degrees_from_angle)
    }

    pub fn flip_horizontally(mut self, flip: Option<bool>) -> Result<Self, Error> {
        let sp_pr = self.shape_properties()?;
        props::set_field_or_remove::<Transform2D, bool>(self.tree_mut(), sp_pr, "flip_h", flip)?;
        Ok(self)
    }

    pub fn flip_vertically(mut self, flip: Option<bool>) -> Result<Self, Error> {
        let sp_pr = self.shape_properties()?;
        props::set_field_or_remove::<Transform2D, bool>(self.tree_mut(), sp_pr, "flip_v", flip)?;
        Ok(self)
    }

    pub fn is_flipped_horizontally(&self) -> Option<bool> {
        let sp_pr = self.shape_properties().ok()?;
        props::field::<Transform2D, bool>(self.tree(), sp_pr, "flip_h")
    }

    pub fn is_flipped_vertically(&self) -> Option<bool> {
        let sp_pr = self.shape_properties().ok()?;
        props::field::<Transform2D, bool>(self.tree(), sp_pr, "flip_v")
    }
}
