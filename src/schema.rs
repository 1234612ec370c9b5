//! Element kinds and the child-ordering rules of the hosts they live in.
//!
//! A kind is a zero-sized marker type naming one element (`w:b`, `a:srcRect`)
//! and the attributes it carries, addressable by a short field name.

pub trait Kind {
    const NAME: &'static str;
    /// Field name to qualified attribute name.
    const FIELDS: &'static [(&'static str, &'static str)] = &[("val", "w:val")];

    fn field(name: &str) -> Option<&'static str> {
        Self::FIELDS
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, attr)| *attr)
    }
}

macro_rules! element_kinds {
    ($($(#[$meta:meta])* $ty:ident = $name:literal $({ $($field:literal => $attr:literal),* $(,)? })?;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug)]
            pub struct $ty;

            impl Kind for $ty {
                const NAME: &'static str = $name;
                $(const FIELDS: &'static [(&'static str, &'static str)] = &[$(($field, $attr)),*];)?
            }
        )*
    };
}

const BORDER_FIELDS: &[(&str, &str)] = &[
    ("val", "w:val"),
    ("size", "w:sz"),
    ("color", "w:color"),
    ("space", "w:space"),
];

const WIDTH_FIELDS: &[(&str, &str)] = &[("width", "w:w"), ("type", "w:type")];

macro_rules! border_kinds {
    ($($ty:ident = $name:literal;)*) => {
        $(
            #[derive(Clone, Copy, Debug)]
            pub struct $ty;

            impl Kind for $ty {
                const NAME: &'static str = $name;
                const FIELDS: &'static [(&'static str, &'static str)] = BORDER_FIELDS;
            }
        )*
    };
}

macro_rules! width_kinds {
    ($($ty:ident = $name:literal;)*) => {
        $(
            #[derive(Clone, Copy, Debug)]
            pub struct $ty;

            impl Kind for $ty {
                const NAME: &'static str = $name;
                const FIELDS: &'static [(&'static str, &'static str)] = WIDTH_FIELDS;
            }
        )*
    };
}

// Property hosts.
element_kinds! {
    RunProperties = "w:rPr" {};
    ParagraphProperties = "w:pPr" {};
    TableProperties = "w:tblPr" {};
    TableRowProperties = "w:trPr" {};
    TableCellProperties = "w:tcPr" {};
    ParagraphBorders = "w:pBdr" {};
    TableBorders = "w:tblBorders" {};
    TableCellBorders = "w:tcBorders" {};
    TableCellMarginDefault = "w:tblCellMar" {};
    TableCellMargin = "w:tcMar" {};
}

// Run properties.
element_kinds! {
    RunStyle = "w:rStyle";
    RunFonts = "w:rFonts" {
        "ascii" => "w:ascii",
        "high_ansi" => "w:hAnsi",
        "east_asia" => "w:eastAsia",
        "complex_script" => "w:cs",
        "hint" => "w:hint",
    };
    Bold = "w:b";
    BoldComplexScript = "w:bCs";
    Italic = "w:i";
    ItalicComplexScript = "w:iCs";
    Caps = "w:caps";
    SmallCaps = "w:smallCaps";
    Strike = "w:strike";
    DoubleStrike = "w:dstrike";
    OutlineText = "w:outline";
    Shadow = "w:shadow";
    Emboss = "w:emboss";
    Imprint = "w:imprint";
    NoProof = "w:noProof";
    SnapToGrid = "w:snapToGrid";
    Vanish = "w:vanish";
    WebHidden = "w:webHidden";
    Color = "w:color" {
        "val" => "w:val",
        "theme_color" => "w:themeColor",
    };
    CharacterSpacing = "w:spacing";
    CharacterScale = "w:w";
    Kern = "w:kern";
    Position = "w:position";
    FontSize = "w:sz";
    FontSizeComplexScript = "w:szCs";
    Highlight = "w:highlight";
    Underline = "w:u" {
        "val" => "w:val",
        "color" => "w:color",
    };
    FitText = "w:fitText" {
        "val" => "w:val",
        "id" => "w:id",
    };
    VerticalTextAlignment = "w:vertAlign";
    RightToLeftText = "w:rtl";
    Languages = "w:lang" {
        "val" => "w:val",
        "east_asia" => "w:eastAsia",
        "bidi" => "w:bidi",
    };
    Shading = "w:shd" {
        "val" => "w:val",
        "color" => "w:color",
        "fill" => "w:fill",
    };
}

border_kinds! {
    RunBorder = "w:bdr";
    TopBorder = "w:top";
    LeftBorder = "w:left";
    BottomBorder = "w:bottom";
    RightBorder = "w:right";
    BetweenBorder = "w:between";
    InsideHorizontalBorder = "w:insideH";
    InsideVerticalBorder = "w:insideV";
}

// Paragraph properties.
element_kinds! {
    ParagraphStyleId = "w:pStyle";
    KeepNext = "w:keepNext";
    KeepLines = "w:keepLines";
    PageBreakBefore = "w:pageBreakBefore";
    WidowControl = "w:widowControl";
    SpacingBetweenLines = "w:spacing" {
        "before" => "w:before",
        "after" => "w:after",
        "line" => "w:line",
        "line_rule" => "w:lineRule",
        "before_lines" => "w:beforeLines",
        "after_lines" => "w:afterLines",
        "before_auto" => "w:beforeAutospacing",
        "after_auto" => "w:afterAutospacing",
    };
    Indentation = "w:ind" {
        "left" => "w:left",
        "right" => "w:right",
        "left_chars" => "w:leftChars",
        "right_chars" => "w:rightChars",
        "first_line" => "w:firstLine",
        "first_line_chars" => "w:firstLineChars",
        "hanging" => "w:hanging",
        "hanging_chars" => "w:hangingChars",
    };
    ContextualSpacing = "w:contextualSpacing";
    Justification = "w:jc";
    OutlineLevel = "w:outlineLvl";
}

// Table, row and cell properties.
element_kinds! {
    TableStyle = "w:tblStyle";
    TableOverlap = "w:tblOverlap";
    TableLayout = "w:tblLayout" { "type" => "w:type" };
    TableCaption = "w:tblCaption";
    TableDescription = "w:tblDescription";
    CantSplit = "w:cantSplit";
    TableRowHeight = "w:trHeight" {
        "val" => "w:val",
        "rule" => "w:hRule",
    };
    TableHeader = "w:tblHeader";
    Hidden = "w:hidden";
    GridSpan = "w:gridSpan";
    HorizontalMerge = "w:hMerge";
    VerticalMerge = "w:vMerge";
    NoWrap = "w:noWrap";
    TextDirection = "w:textDirection";
    TableCellVerticalAlignment = "w:vAlign";
    HideMark = "w:hideMark";
}

width_kinds! {
    TableWidth = "w:tblW";
    TableIndentation = "w:tblInd";
    TableCellWidth = "w:tcW";
    TopMargin = "w:top";
    LeftMargin = "w:left";
    BottomMargin = "w:bottom";
    RightMargin = "w:right";
}

// Section properties.
element_kinds! {
    PageSize = "w:pgSz" {
        "width" => "w:w",
        "height" => "w:h",
        "orientation" => "w:orient",
    };
    PageMargin = "w:pgMar" {
        "top" => "w:top",
        "right" => "w:right",
        "bottom" => "w:bottom",
        "left" => "w:left",
        "header" => "w:header",
        "footer" => "w:footer",
        "gutter" => "w:gutter",
    };
}

// DrawingML.
element_kinds! {
    Extent = "wp:extent" { "cx" => "cx", "cy" => "cy" };
    EffectExtent = "wp:effectExtent" {
        "left" => "l",
        "top" => "t",
        "right" => "r",
        "bottom" => "b",
    };
    SourceRectangle = "a:srcRect" {
        "left" => "l",
        "top" => "t",
        "right" => "r",
        "bottom" => "b",
    };
    Transform2D = "a:xfrm" {
        "rotation" => "rot",
        "flip_h" => "flipH",
        "flip_v" => "flipV",
    };
    Extents = "a:ext" { "cx" => "cx", "cy" => "cy" };
    AlphaModulationFixed = "a:alphaModFix" { "amount" => "amt" };
    LineOutline = "a:ln" { "width" => "w" };
    SimplePosition = "wp:simplePos" { "x" => "x", "y" => "y" };
    HorizontalPosition = "wp:positionH" { "relative_from" => "relativeFrom" };
    VerticalPosition = "wp:positionV" { "relative_from" => "relativeFrom" };
    WrapNone = "wp:wrapNone" {};
    WrapSquare = "wp:wrapSquare" {
        "wrap_text" => "wrapText",
        "dist_top" => "distT",
        "dist_bottom" => "distB",
        "dist_left" => "distL",
        "dist_right" => "distR",
    };
    WrapTight = "wp:wrapTight" {
        "wrap_text" => "wrapText",
        "dist_left" => "distL",
        "dist_right" => "distR",
    };
    WrapThrough = "wp:wrapThrough" {
        "wrap_text" => "wrapText",
        "dist_left" => "distL",
        "dist_right" => "distR",
    };
    WrapTopBottom = "wp:wrapTopBottom" {
        "dist_top" => "distT",
        "dist_bottom" => "distB",
    };
    DocProperties = "wp:docPr" {
        "id" => "id",
        "name" => "name",
        "description" => "descr",
        "title" => "title",
    };
}

const RUN_PROPERTIES: &[&str] = &[
    "w:rStyle", "w:rFonts", "w:b", "w:bCs", "w:i", "w:iCs", "w:caps", "w:smallCaps",
    "w:strike", "w:dstrike", "w:outline", "w:shadow", "w:emboss", "w:imprint", "w:noProof",
    "w:snapToGrid", "w:vanish", "w:webHidden", "w:color", "w:spacing", "w:w", "w:kern",
    "w:position", "w:sz", "w:szCs", "w:highlight", "w:u", "w:effect", "w:bdr", "w:shd",
    "w:fitText", "w:vertAlign", "w:rtl", "w:cs", "w:em", "w:lang", "w:eastAsianLayout",
    "w:specVanish", "w:oMath", "w:rPrChange",
];

const PARAGRAPH_PROPERTIES: &[&str] = &[
    "w:pStyle", "w:keepNext", "w:keepLines", "w:pageBreakBefore", "w:framePr",
    "w:widowControl", "w:numPr", "w:suppressLineNumbers", "w:pBdr", "w:shd", "w:tabs",
    "w:suppressAutoHyphens", "w:kinsoku", "w:wordWrap", "w:overflowPunct", "w:topLinePunct",
    "w:autoSpaceDE", "w:autoSpaceDN", "w:bidi", "w:adjustRightInd", "w:snapToGrid",
    "w:spacing", "w:ind", "w:contextualSpacing", "w:mirrorIndents", "w:suppressOverlap",
    "w:jc", "w:textDirection", "w:textAlignment", "w:textboxTightWrap", "w:outlineLvl",
    "w:divId", "w:cnfStyle", "w:rPr", "w:sectPr", "w:pPrChange",
];

const TABLE_PROPERTIES: &[&str] = &[
    "w:tblStyle", "w:tblpPr", "w:tblOverlap", "w:bidiVisual", "w:tblStyleRowBandSize",
    "w:tblStyleColBandSize", "w:tblW", "w:jc", "w:tblCellSpacing", "w:tblInd",
    "w:tblBorders", "w:shd", "w:tblLayout", "w:tblCellMar", "w:tblLook", "w:tblCaption",
    "w:tblDescription", "w:tblPrChange",
];

const ROW_PROPERTIES: &[&str] = &[
    "w:cnfStyle", "w:divId", "w:gridBefore", "w:gridAfter", "w:wBefore", "w:wAfter",
    "w:cantSplit", "w:trHeight", "w:tblHeader", "w:tblCellSpacing", "w:jc", "w:hidden",
    "w:ins", "w:del", "w:trPrChange",
];

const CELL_PROPERTIES: &[&str] = &[
    "w:cnfStyle", "w:tcW", "w:gridSpan", "w:hMerge", "w:vMerge", "w:tcBorders", "w:shd",
    "w:noWrap", "w:tcMar", "w:textDirection", "w:tcFitText", "w:vAlign", "w:hideMark",
    "w:tcPrChange",
];

const PARAGRAPH_BORDERS: &[&str] = &[
    "w:top", "w:left", "w:bottom", "w:right", "w:between", "w:bar",
];

const TABLE_BORDERS: &[&str] = &[
    "w:top", "w:left", "w:start", "w:bottom", "w:right", "w:end", "w:insideH", "w:insideV",
];

const CELL_BORDERS: &[&str] = &[
    "w:top", "w:left", "w:start", "w:bottom", "w:right", "w:end", "w:insideH", "w:insideV",
    "w:tl2br", "w:tr2bl",
];

const CELL_MARGINS: &[&str] = &["w:top", "w:left", "w:start", "w:bottom", "w:right", "w:end"];

const SECTION_PROPERTIES: &[&str] = &[
    "w:headerReference", "w:footerReference", "w:footnotePr", "w:endnotePr", "w:type",
    "w:pgSz", "w:pgMar", "w:paperSrc", "w:pgBorders", "w:lnNumType", "w:pgNumType",
    "w:cols", "w:formProt", "w:vAlign", "w:noEndnote", "w:titlePg", "w:textDirection",
    "w:bidi", "w:rtlGutter", "w:docGrid", "w:printerSettings", "w:sectPrChange",
];

const ANCHOR: &[&str] = &[
    "wp:simplePos", "wp:positionH", "wp:positionV", "wp:extent", "wp:effectExtent",
    "wp:wrapNone", "wp:wrapSquare", "wp:wrapTight", "wp:wrapThrough", "wp:wrapTopBottom",
    "wp:docPr", "wp:cNvGraphicFramePr", "a:graphic",
];

const INLINE: &[&str] = &[
    "wp:extent", "wp:effectExtent", "wp:docPr", "wp:cNvGraphicFramePr", "a:graphic",
];

const SHAPE_PROPERTIES: &[&str] = &[
    "a:xfrm", "a:custGeom", "a:prstGeom", "a:noFill", "a:solidFill", "a:gradFill",
    "a:blipFill", "a:pattFill", "a:grpFill", "a:ln", "a:effectLst", "a:effectDag",
    "a:scene3d", "a:sp3d", "a:extLst",
];

/// Schema order of the children of `host`. Children missing from the list
/// sort after every listed one.
pub fn child_order(host: &str) -> Option<&'static [&'static str]> {
    Some(match host {
        "w:rPr" => RUN_PROPERTIES,
        "w:pPr" => PARAGRAPH_PROPERTIES,
        "w:tblPr" => TABLE_PROPERTIES,
        "w:trPr" => ROW_PROPERTIES,
        "w:tcPr" => CELL_PROPERTIES,
        "w:pBdr" => PARAGRAPH_BORDERS,
        "w:tblBorders" => TABLE_BORDERS,
        "w:tcBorders" => CELL_BORDERS,
        "w:tblCellMar" | "w:tcMar" => CELL_MARGINS,
        "w:sectPr" => SECTION_PROPERTIES,
        "w:p" => &["w:pPr"],
        "w:r" => &["w:rPr"],
        "w:tbl" => &["w:tblPr", "w:tblGrid"],
        "w:tr" => &["w:tblPrEx", "w:trPr"],
        "w:tc" => &["w:tcPr"],
        "wp:anchor" => ANCHOR,
        "wp:inline" => INLINE,
        "pic:pic" => &["pic:nvPicPr", "pic:blipFill", "pic:spPr"],
        "pic:blipFill" => &["a:blip", "a:srcRect", "a:tile", "a:stretch"],
        "pic:spPr" => SHAPE_PROPERTIES,
        "a:xfrm" => &["a:off", "a:ext"],
        "a:blip" => &["a:alphaModFix", "a:extLst"],
        "a:ln" => &["a:noFill", "a:solidFill", "a:gradFill", "a:pattFill", "a:prstDash", "a:round", "a:bevel", "a:miter"],
        _ => return None,
    })
}

/// Hosts of independent optional children; removed when they become empty.
pub fn is_property_host(name: &str) -> bool {
    matches!(
        name,
        "w:rPr"
            | "w:pPr"
            | "w:tblPr"
            | "w:trPr"
            | "w:tcPr"
            | "w:pBdr"
            | "w:tblBorders"
            | "w:tcBorders"
            | "w:tblCellMar"
            | "w:tcMar"
    )
}

/// Whether `child` may appear inside `host`. Hosts without a closed child
/// list accept anything.
pub fn accepts(host: &str, child: &str) -> bool {
    let closed = is_property_host(host)
        || matches!(
            host,
            "wp:anchor" | "wp:inline" | "pic:pic" | "pic:blipFill" | "pic:spPr" | "a:xfrm"
        );
    match child_order(host) {
        Some(order) if closed => order.contains(&child),
        _ => true,
    }
}

/// Index at which a new `child` belongs among `existing` siblings.
pub fn insertion_index<'a>(host: &str, child: &str, existing: impl Iterator<Item = &'a str>) -> Option<usize> {
    let order = child_order(host)?;
    let rank = |name: &str| order.iter().position(|n| *n == name).unwrap_or(order.len());
    let target = rank(child);
    let mut index = 0;
    for name in existing {
        if rank(name) > target {
            break;
        }
        index += 1;
    }
    Some(index)
}
