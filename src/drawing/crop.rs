use super::Drawing;
use crate::error::Error;
use crate::props;
use crate::schema::SourceRectangle;
use crate::tree::NodeId;
use crate::units::{self, ImageUnits};

/// Fractions of the original bitmap trimmed from each edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cropping {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Cropping {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Cropping {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Cropping::default()
    }

    /// Every factor in [0, 1] and each axis keeps some of the image.
    pub fn validate(&self) -> Result<(), Error> {
        let edges = [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ];
        for (edge, factor) in edges {
            if !(0.0..=1.0).contains(&factor) {
                return Err(Error::InvalidCropping(format!(
                    "{edge} factor {factor} is outside [0, 1]"
                )));
            }
        }
        if self.left + self.right >= 1.0 {
            return Err(Error::InvalidCropping(format!(
                "left + right = {} leaves no width",
                self.left + self.right
            )));
        }
        if self.top + self.bottom >= 1.0 {
            return Err(Error::InvalidCropping(format!(
                "top + bottom = {} leaves no height",
                self.top + self.bottom
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    fn field(self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
        }
    }

    fn with(self, cropping: Cropping, factor: f64) -> Cropping {
        match self {
            Edge::Left => Cropping { left: factor, ..cropping },
            Edge::Top => Cropping { top: factor, ..cropping },
            Edge::Right => Cropping { right: factor, ..cropping },
            Edge::Bottom => Cropping { bottom: factor, ..cropping },
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }

    /// Factor of the opposite edge on the same axis.
    fn opposite(self, cropping: &Cropping) -> f64 {
        match self {
            Edge::Left => cropping.right,
            Edge::Right => cropping.left,
            Edge::Top => cropping.bottom,
            Edge::Bottom => cropping.top,
        }
    }
}

impl<'a> Drawing<'a> {
    fn source_rectangle(&self) -> Option<NodeId> {
        props::child::<SourceRectangle>(self.tree(), self.blip_fill().ok()?)
    }

    /// Current crop factors, `None` when `a:srcRect` is absent.
    pub fn cropping(&self) -> Option<Cropping> {
        let blip_fill = self.blip_fill().ok()?;
        self.source_rectangle()?;
        let factor = |field: &str| {
            props::field::<SourceRectangle, i64>(self.tree(), blip_fill, field)
                .map(units::factor_from_percentage)
                .unwrap_or(0.0)
        };
        Some(Cropping {
            left: factor("left"),
            top: factor("top"),
            right: factor("right"),
            bottom: factor("bottom"),
        })
    }

    /// Displayed size inflated by the current crop factors, in pixels.
    fn uncropped_px(&self) -> Result<(f64, f64), Error> {
        let (width, height) = self.size_px()?;
        let Some(c) = self.cropping() else {
            return Ok((width, height));
        };
        Ok((
            width / (1.0 - c.left - c.right),
            height / (1.0 - c.top - c.bottom),
        ))
    }

    pub fn uncropped_width(&self, units: ImageUnits) -> Result<f64, Error> {
        Ok(units.to_other(self.uncropped_px()?.0))
    }

    pub fn uncropped_height(&self, units: ImageUnits) -> Result<f64, Error> {
        Ok(units.to_other(self.uncropped_px()?.1))
    }

    fn write_factor(&mut self, edge: Edge, factor: f64) -> Result<(), Error> {
        let blip_fill = self.blip_fill()?;
        props::set_field_or_remove::<SourceRectangle, i64>(
            self.tree_mut(),
            blip_fill,
            edge.field(),
            Some(units::percentage_from_factor(factor)),
        )
    }

    fn crop_edge(mut self, edge: Edge, factor: f64) -> Result<Self, Error> {
        let old = self.cropping().unwrap_or_default();
        edge.with(old, factor).validate()?;
        let (uncropped_w, uncropped_h) = self.uncropped_px()?;
        let (width, height) = self.size_px()?;

        let other = edge.opposite(&old);
        let (width, height) = if edge.is_horizontal() {
            let w = (uncropped_w - uncropped_w * factor - uncropped_w * other).round();
            (w, height)
        } else {
            let h = (uncropped_h - uncropped_h * factor - uncropped_h * other).round();
            (width, h)
        };
        self.write_factor(edge, factor)?;
        self.resize_px(width, height)?;
        Ok(self)
    }

    pub fn left_cropping(self, factor: f64) -> Result<Self, Error> {
        self.crop_edge(Edge::Left, factor)
    }

    pub fn top_cropping(self, factor: f64) -> Result<Self, Error> {
        self.crop_edge(Edge::Top, factor)
    }

    pub fn right_cropping(self, factor: f64) -> Result<Self, Error> {
        self.crop_edge(Edge::Right, factor)
    }

    pub fn bottom_cropping(self, factor: f64) -> Result<Self, Error> {
        self.crop_edge(Edge::Bottom, factor)
    }

    /// Sets all four factors at once. Only the final rectangle has to keep
    /// some of the image; both axes are sized from the uncropped size read
    /// before any factor changes.
    pub fn crop(mut self, left: f64, top: f64, right: f64, bottom: f64) -> Result<Self, Error> {
        let cropping = Cropping::new(left, top, right, bottom);
        cropping.validate()?;
        let (uncropped_w, uncropped_h) = self.uncropped_px()?;
        for (edge, factor) in [
            (Edge::Left, left),
            (Edge::Top, top),
            (Edge::Right, right),
            (Edge::Bottom, bottom),
        ] {
            self.write_factor(edge, factor)?;
        }
        let width = (uncropped_w - uncropped_w * left - uncropped_w * right).round();
        let height = (uncropped_h - uncropped_h * top - uncropped_h * bottom).round();
        self.resize_px(width, height)?;
        Ok(self)
    }

    /// `None` removes the cropping.
    pub fn set_cropping(self, cropping: Option<Cropping>) -> Result<Self, Error> {
        match cropping {
            Some(c) => self.crop(c.left, c.top, c.right, c.bottom),
            None => self.reset_cropping(),
        }
    }

    /// Restores the uncropped size and drops `a:srcRect`. Uncropped
    /// drawings are left alone.
    pub fn reset_cropping(mut self) -> Result<Self, Error> {
        if self.source_rectangle().is_none() {
            return Ok(self);
        }
        let (width, height) = self.uncropped_px()?;
        self.resize_px(width, height)?;
        let blip_fill = self.blip_fill()?;
        props::set_property_class_or_remove::<SourceRectangle>(self.tree_mut(), blip_fill, None)?;
        Ok(self)
    }

    /// Restores the original bitmap size, keeping any crop factors applied.
    pub fn reset_size(mut self) -> Result<Self, Error> {
        let (width, height) = self.original_size(ImageUnits::Pixels)?;
        match self.cropping() {
            Some(c) if !c.is_empty() => {
                let w = (width - width * c.left - width * c.right).round();
                let h = (height - height * c.top - height * c.bottom).round();
                self.resize_px(w, h)?;
            }
            _ => self.resize_px(width, height)?,
        }
        Ok(self)
    }
}
