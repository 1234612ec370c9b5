//! Conversions between the native OOXML units and human units.
//!
//! Every conversion that produces a native (integral) unit rounds to nearest,
//! so converting a native value out to a unit and back through the *same* unit
//! gives the original value. Going out through one unit and back through
//! another may lose sub-unit precision.

pub const TWIPS_PER_POINT: f64 = 20.0;
pub const TWIPS_PER_INCH: f64 = 1440.0;
/// 1440 / 2.54, rounded. Used in both directions, so a centimeter value
/// reads back as written instead of drifting by the rounding.
pub const TWIPS_PER_CENTIMETER: f64 = 567.0;
pub const TWIPS_PER_LINE: f64 = 240.0;
pub const HALF_POINTS_PER_POINT: f64 = 2.0;
/// `w:leftChars` and friends are hundredths of a character.
pub const CHARACTER_HUNDREDTHS: f64 = 100.0;

pub const PIXELS_PER_INCH: f64 = 96.0;
pub const EMU_PER_PIXEL: f64 = 9525.0;
pub const EMU_PER_POINT: f64 = 12700.0;

pub const ANGLE_MULTIPLIER: f64 = 60000.0;
pub const PERCENTAGE_MULTIPLIER: f64 = 100000.0;

pub const SIXTHS_PER_UNIT: f64 = 6.0;
pub const FIFTIETHS_PER_PERCENT: f64 = 50.0;

/// A unit family whose native representation is an integer count.
pub trait Unit: Copy {
    /// Native units per one `self`.
    fn factor(self) -> f64;

    fn to_other(self, native: i64) -> f64 {
        native as f64 / self.factor()
    }

    fn from_other(self, value: f64) -> i64 {
        (value * self.factor()).round() as i64
    }
}

/// Generic lengths, native unit twips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasuringUnits {
    Twips,
    Points,
    Inches,
    Centimeters,
}

impl Unit for MeasuringUnits {
    fn factor(self) -> f64 {
        match self {
            MeasuringUnits::Twips => 1.0,
            MeasuringUnits::Points => TWIPS_PER_POINT,
            MeasuringUnits::Inches => TWIPS_PER_INCH,
            MeasuringUnits::Centimeters => TWIPS_PER_CENTIMETER,
        }
    }
}

/// Line and paragraph spacing, native unit twips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineUnits {
    Twips,
    Points,
    /// 12pt, 240 twips.
    WholeLines,
}

impl Unit for LineUnits {
    fn factor(self) -> f64 {
        match self {
            LineUnits::Twips => 1.0,
            LineUnits::Points => TWIPS_PER_POINT,
            LineUnits::WholeLines => TWIPS_PER_LINE,
        }
    }
}

/// Paragraph indentation. `Characters` maps to the `*Chars` attributes,
/// every other unit to the twip attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndentationUnits {
    Twips,
    Points,
    Inches,
    Centimeters,
    Characters,
}

impl IndentationUnits {
    pub fn is_characters(self) -> bool {
        matches!(self, IndentationUnits::Characters)
    }
}

impl Unit for IndentationUnits {
    fn factor(self) -> f64 {
        match self {
            IndentationUnits::Twips => 1.0,
            IndentationUnits::Points => TWIPS_PER_POINT,
            IndentationUnits::Inches => TWIPS_PER_INCH,
            IndentationUnits::Centimeters => TWIPS_PER_CENTIMETER,
            IndentationUnits::Characters => CHARACTER_HUNDREDTHS,
        }
    }
}

/// Font metrics, native unit half-points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextUnits {
    HalfPoints,
    Points,
}

impl Unit for TextUnits {
    fn factor(self) -> f64 {
        match self {
            TextUnits::HalfPoints => 1.0,
            TextUnits::Points => HALF_POINTS_PER_POINT,
        }
    }
}

/// Image geometry. Pixels are the working unit; EMU is the stored one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ImageUnits {
    #[default]
    Pixels,
    /// 96 pixels.
    Inches,
    /// ~37.8 pixels.
    Centimeters,
}

impl ImageUnits {
    fn pixels_per_unit(self) -> f64 {
        match self {
            ImageUnits::Pixels => 1.0,
            ImageUnits::Inches => PIXELS_PER_INCH,
            ImageUnits::Centimeters => PIXELS_PER_INCH / 2.54,
        }
    }

    pub fn to_other(self, pixels: f64) -> f64 {
        pixels / self.pixels_per_unit()
    }

    pub fn from_other(self, value: f64) -> f64 {
        value * self.pixels_per_unit()
    }

    pub fn to_emu(self, value: f64) -> i64 {
        emu_from_pixels(self.from_other(value))
    }

    pub fn from_emu(self, emu: i64) -> f64 {
        self.to_other(pixels_from_emu(emu))
    }
}

pub fn emu_from_pixels(pixels: f64) -> i64 {
    (pixels * EMU_PER_PIXEL).round() as i64
}

pub fn pixels_from_emu(emu: i64) -> f64 {
    emu as f64 / EMU_PER_PIXEL
}

pub fn emu_from_points(points: f64) -> i64 {
    (points * EMU_PER_POINT).round() as i64
}

pub fn points_from_emu(emu: i64) -> f64 {
    emu as f64 / EMU_PER_POINT
}

/// Degrees to 60000ths of a degree.
pub fn angle_from_degrees(degrees: f64) -> i64 {
    (degrees * ANGLE_MULTIPLIER).round() as i64
}

pub fn degrees_from_angle(angle: i64) -> f64 {
    angle as f64 / ANGLE_MULTIPLIER
}

/// A 0.0..=1.0 factor to 1/100000 units.
pub fn percentage_from_factor(factor: f64) -> i64 {
    (factor * PERCENTAGE_MULTIPLIER).round() as i64
}

pub fn factor_from_percentage(percentage: i64) -> f64 {
    percentage as f64 / PERCENTAGE_MULTIPLIER
}

/// Border widths: one unit is stored as six.
pub fn to_sixths(border_size: f64) -> u32 {
    (border_size * SIXTHS_PER_UNIT).round().max(0.0) as u32
}

pub fn from_sixths(sixths: u32) -> f64 {
    sixths as f64 / SIXTHS_PER_UNIT
}

/// Table and cell widths (`w:tblW`, `w:tcW`, `w:tblInd`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthUnits {
    Auto,
    /// Stored as twips (`dxa`).
    Points,
    /// Stored as fiftieths of a percent (`pct`).
    Percentage,
}

impl WidthUnits {
    pub fn type_value(self) -> &'static str {
        match self {
            WidthUnits::Auto => "auto",
            WidthUnits::Points => "dxa",
            WidthUnits::Percentage => "pct",
        }
    }

    /// Unknown and `nil` types read as `Auto`.
    pub fn from_type_value(value: &str) -> Self {
        match value {
            "dxa" => WidthUnits::Points,
            "pct" => WidthUnits::Percentage,
            _ => WidthUnits::Auto,
        }
    }

    pub fn to_native(self, width: f64) -> i64 {
        match self {
            WidthUnits::Points => (width * TWIPS_PER_POINT).round() as i64,
            WidthUnits::Percentage => (width * FIFTIETHS_PER_PERCENT).round() as i64,
            WidthUnits::Auto => width.round() as i64,
        }
    }

    pub fn from_native(self, native: i64) -> f64 {
        match self {
            WidthUnits::Points => native as f64 / TWIPS_PER_POINT,
            WidthUnits::Percentage => native as f64 / FIFTIETHS_PER_PERCENT,
            WidthUnits::Auto => native as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_unit_round_trip_is_exact() {
        for twips in [0, 1, 19, 567, 1000, 1001, 1440, 123_457, -250] {
            for unit in [
                MeasuringUnits::Twips,
                MeasuringUnits::Points,
                MeasuringUnits::Inches,
                MeasuringUnits::Centimeters,
            ] {
                assert_eq!(unit.from_other(unit.to_other(twips)), twips, "{unit:?}");
            }
            for unit in [LineUnits::Twips, LineUnits::Points, LineUnits::WholeLines] {
                assert_eq!(unit.from_other(unit.to_other(twips)), twips, "{unit:?}");
            }
        }
        for half_points in [1, 21, 24, 143] {
            assert_eq!(
                TextUnits::Points.from_other(TextUnits::Points.to_other(half_points)),
                half_points
            );
        }
    }

    #[test]
    fn cross_unit_round_trip_may_lose_precision() {
        // 10.3pt is not representable in half-points.
        let half_points = TextUnits::Points.from_other(10.3);
        assert_eq!(half_points, 21);
        assert_eq!(TextUnits::Points.to_other(half_points), 10.5);

        // sub-twip point values snap to the nearest twip
        let twips = MeasuringUnits::Points.from_other(0.03);
        assert_eq!(twips, 1);
        assert_eq!(MeasuringUnits::Points.to_other(twips), 0.05);
    }

    #[test]
    fn known_constants() {
        assert_eq!(MeasuringUnits::Points.from_other(12.0), 240);
        assert_eq!(MeasuringUnits::Inches.from_other(1.0), 1440);
        assert_eq!(MeasuringUnits::Centimeters.from_other(1.0), 567);
        assert_eq!(MeasuringUnits::Centimeters.to_other(1134), 2.0);
        assert_eq!(IndentationUnits::Centimeters.to_other(850), 850.0 / 567.0);
        assert_eq!(LineUnits::WholeLines.from_other(1.5), 360);
        assert_eq!(IndentationUnits::Characters.from_other(2.0), 200);
        assert_eq!(ImageUnits::Inches.to_emu(1.0), 914_400);
        assert_eq!(ImageUnits::Pixels.from_emu(9525 * 512), 512.0);
        assert_eq!(angle_from_degrees(90.0), 5_400_000);
        assert_eq!(percentage_from_factor(0.29), 29_000);
        assert_eq!(to_sixths(1.5), 9);
        assert_eq!(from_sixths(9), 1.5);
        assert_eq!(WidthUnits::Percentage.to_native(100.0), 5000);
        assert_eq!(WidthUnits::Points.from_native(2880), 144.0);
    }
}
