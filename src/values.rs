//! Typed attribute values and their string forms.

/// A value that can live in an attribute.
pub trait AttrValue: Sized {
    fn to_attr(&self) -> String;
    fn from_attr(value: &str) -> Option<Self>;
}

impl AttrValue for bool {
    fn to_attr(&self) -> String {
        let value = if *self { "true" } else { "false" };
        value.to_string()
    }

    fn from_attr(value: &str) -> Option<Self> {
        match value {
            "1" | "true" | "on" => Some(true),
            "0" | "false" | "off" => Some(false),
            _ => None,
        }
    }
}

impl AttrValue for String {
    fn to_attr(&self) -> String {
        self.clone()
    }

    fn from_attr(value: &str) -> Option<Self> {
        Some(value.to_string())
    }
}

impl AttrValue for f64 {
    fn to_attr(&self) -> String {
        self.to_string()
    }

    fn from_attr(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

macro_rules! numeric_attr {
    ($($t:ty),*) => {
        $(
            impl AttrValue for $t {
                fn to_attr(&self) -> String {
                    self.to_string()
                }

                fn from_attr(value: &str) -> Option<Self> {
                    value.parse().ok()
                }
            }
        )*
    };
}

numeric_attr!(i32, i64, u8, u32, u64);

macro_rules! attr_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),*
        }

        impl AttrValue for $name {
            fn to_attr(&self) -> String {
                let value = match self {
                    $($name::$variant => $value),*
                };
                value.to_string()
            }

            fn from_attr(value: &str) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

attr_enum!(JustificationValues {
    Left => "left",
    Start => "start",
    Center => "center",
    Right => "right",
    End => "end",
    Both => "both",
    Distribute => "distribute",
});

attr_enum!(UnderlineValues {
    Single => "single",
    Words => "words",
    Double => "double",
    Thick => "thick",
    Dotted => "dotted",
    DottedHeavy => "dottedHeavy",
    Dash => "dash",
    DashedHeavy => "dashedHeavy",
    DashLong => "dashLong",
    DotDash => "dotDash",
    DotDotDash => "dotDotDash",
    Wave => "wave",
    WavyHeavy => "wavyHeavy",
    WavyDouble => "wavyDouble",
    None => "none",
});

attr_enum!(BorderValues {
    Nil => "nil",
    None => "none",
    Single => "single",
    Thick => "thick",
    Double => "double",
    Dotted => "dotted",
    Dashed => "dashed",
    DotDash => "dotDash",
    DotDotDash => "dotDotDash",
    Triple => "triple",
    Wave => "wave",
    DoubleWave => "doubleWave",
    Inset => "inset",
    Outset => "outset",
});

attr_enum!(HighlightColorValues {
    Black => "black",
    Blue => "blue",
    Cyan => "cyan",
    Green => "green",
    Magenta => "magenta",
    Red => "red",
    Yellow => "yellow",
    White => "white",
    DarkBlue => "darkBlue",
    DarkCyan => "darkCyan",
    DarkGreen => "darkGreen",
    DarkMagenta => "darkMagenta",
    DarkRed => "darkRed",
    DarkYellow => "darkYellow",
    DarkGray => "darkGray",
    LightGray => "lightGray",
    None => "none",
});

attr_enum!(
    /// `w:vertAlign` of a run.
    VerticalPositionValues {
        Baseline => "baseline",
        Superscript => "superscript",
        Subscript => "subscript",
    }
);

attr_enum!(TableLayoutValues {
    Fixed => "fixed",
    Autofit => "autofit",
});

attr_enum!(MergedCellValues {
    Restart => "restart",
    Continue => "continue",
});

attr_enum!(
    /// `w:vAlign` of a table cell.
    VerticalJustificationValues {
        Top => "top",
        Center => "center",
        Bottom => "bottom",
        Both => "both",
    }
);

attr_enum!(ShadingPatternValues {
    Nil => "nil",
    Clear => "clear",
    Solid => "solid",
    HorizontalStripe => "horzStripe",
    VerticalStripe => "vertStripe",
    DiagonalStripe => "diagStripe",
    HorizontalCross => "horzCross",
    DiagonalCross => "diagCross",
});

attr_enum!(HeightRuleValues {
    Auto => "auto",
    Exact => "exact",
    AtLeast => "atLeast",
});

attr_enum!(LineSpacingRuleValues {
    Auto => "auto",
    Exact => "exact",
    AtLeast => "atLeast",
});

attr_enum!(TextDirectionValues {
    LeftToRightTopToBottom => "lrTb",
    TopToBottomRightToLeft => "tbRl",
    BottomToTopLeftToRight => "btLr",
    LeftToRightTopToBottomRotated => "lrTbV",
    TopToBottomRightToLeftRotated => "tbRlV",
    TopToBottomLeftToRightRotated => "tbLrV",
});

attr_enum!(WrapTextValues {
    BothSides => "bothSides",
    Left => "left",
    Right => "right",
    Largest => "largest",
});

attr_enum!(HorizontalRelativeTo {
    Margin => "margin",
    Page => "page",
    Column => "column",
    Character => "character",
    LeftMargin => "leftMargin",
    RightMargin => "rightMargin",
    InsideMargin => "insideMargin",
    OutsideMargin => "outsideMargin",
});

attr_enum!(VerticalRelativeTo {
    Margin => "margin",
    Page => "page",
    Paragraph => "paragraph",
    Line => "line",
    TopMargin => "topMargin",
    BottomMargin => "bottomMargin",
    InsideMargin => "insideMargin",
    OutsideMargin => "outsideMargin",
});

attr_enum!(HorizontalAlignment {
    Left => "left",
    Right => "right",
    Center => "center",
    Inside => "inside",
    Outside => "outside",
});

attr_enum!(VerticalAlignment {
    Top => "top",
    Bottom => "bottom",
    Center => "center",
    Inside => "inside",
    Outside => "outside",
});

/// `RRGGBB` from `#RRGGBB`, `RRGGBB` or a basic HTML color name.
pub fn parse_color(value: &str) -> Option<String> {
    let named = match value.to_ascii_lowercase().as_str() {
        "black" => Some("000000"),
        "white" => Some("FFFFFF"),
        "red" => Some("FF0000"),
        "lime" => Some("00FF00"),
        "green" => Some("008000"),
        "blue" => Some("0000FF"),
        "yellow" => Some("FFFF00"),
        "cyan" | "aqua" => Some("00FFFF"),
        "magenta" | "fuchsia" => Some("FF00FF"),
        "gray" | "grey" => Some("808080"),
        "silver" => Some("C0C0C0"),
        "maroon" => Some("800000"),
        "olive" => Some("808000"),
        "navy" => Some("000080"),
        "purple" => Some("800080"),
        "teal" => Some("008080"),
        "orange" => Some("FFA500"),
        _ => None,
    };
    if let Some(hex) = named {
        return Some(hex.to_string());
    }
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(hex.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_map_to_schema_strings() {
        assert_eq!(UnderlineValues::DottedHeavy.to_attr(), "dottedHeavy");
        assert_eq!(
            WrapTextValues::from_attr("bothSides"),
            Some(WrapTextValues::BothSides)
        );
        assert_eq!(HeightRuleValues::from_attr("sometimes"), None);
    }

    #[test]
    fn booleans_accept_schema_spellings() {
        assert_eq!(bool::from_attr("1"), Some(true));
        assert_eq!(bool::from_attr("off"), Some(false));
        assert_eq!(true.to_attr(), "true");
    }

    #[test]
    fn colors() {
        assert_eq!(parse_color("#ff8000").as_deref(), Some("FF8000"));
        assert_eq!(parse_color("Navy").as_deref(), Some("000080"));
        assert_eq!(parse_color("#12345"), None);
    }
}
