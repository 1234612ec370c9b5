mod common;

use quickdocx::values::{
    BorderValues, HeightRuleValues, HighlightColorValues, JustificationValues, MergedCellValues,
    TableLayoutValues, UnderlineValues,
};
use quickdocx::{
    Border, BorderEdge, Document, Error, LinePosition, LineUnits, MeasuringUnits, Side, TextUnits,
    WidthUnits,
};

#[test]
fn clearing_the_last_property_removes_the_host() {
    let mut doc = Document::new();
    let run = doc.body().add_paragraph().add_run().bold(Some(true)).unwrap();
    let id = run.id();
    assert_eq!(run.is_bold(), Some(true));
    let run = run.bold(None).unwrap();
    assert_eq!(run.is_bold(), None);
    drop(run);
    assert!(common::child_names(&doc, id).is_empty());
}

#[test]
fn setters_are_idempotent() {
    let mut doc = Document::new();
    let run = doc
        .body()
        .add_paragraph()
        .add_run()
        .font_size(Some(12.0), TextUnits::Points)
        .unwrap()
        .font_size(Some(12.0), TextUnits::Points)
        .unwrap()
        .italic(None)
        .unwrap()
        .italic(None)
        .unwrap();
    let id = run.id();
    assert_eq!(run.font_size_value(TextUnits::HalfPoints), Some(24.0));
    drop(run);
    let rpr = doc.tree().first_child(id, "w:rPr").unwrap();
    assert_eq!(common::child_names(&doc, rpr), ["w:sz"]);
}

#[test]
fn properties_land_in_schema_order() {
    let mut doc = Document::new();
    let run = doc
        .body()
        .add_paragraph()
        .add_run()
        .set_text("ordered")
        .unwrap()
        .language(Some("en-US"))
        .unwrap()
        .font_size(Some(11.0), TextUnits::Points)
        .unwrap()
        .bold(Some(true))
        .unwrap()
        .style(Some("Emphasis".to_string()))
        .unwrap()
        .highlight(Some(HighlightColorValues::Yellow))
        .unwrap();
    let id = run.id();
    drop(run);
    assert_eq!(common::child_names(&doc, id), ["w:rPr", "w:t"]);
    let rpr = doc.tree().first_child(id, "w:rPr").unwrap();
    assert_eq!(
        common::child_names(&doc, rpr),
        ["w:rStyle", "w:b", "w:sz", "w:highlight", "w:lang"]
    );
}

#[test]
fn multi_field_properties_clear_field_by_field() {
    let mut doc = Document::new();
    let run = doc
        .body()
        .add_paragraph()
        .add_run()
        .underline(Some(UnderlineValues::Wave), Some("#0000ff"))
        .unwrap();
    assert_eq!(run.underline_value(), Some(UnderlineValues::Wave));
    assert_eq!(run.underline_color().as_deref(), Some("0000FF"));

    let run = run.underline(Some(UnderlineValues::Double), None).unwrap();
    assert_eq!(run.underline_value(), Some(UnderlineValues::Double));
    assert_eq!(run.underline_color(), None);

    let run = run.underline(None, None).unwrap();
    let id = run.id();
    drop(run);
    assert!(doc.tree().first_child(id, "w:rPr").is_none());
}

#[test]
fn run_colors_borders_and_widths() {
    let mut doc = Document::new();
    let run = doc
        .body()
        .add_paragraph()
        .add_run()
        .font_color(Some("navy"))
        .unwrap()
        .fill_color(Some("#FFFF00"))
        .unwrap()
        .border(Some(Border::single(0.5)))
        .unwrap()
        .manual_width(Some(1.0), MeasuringUnits::Inches)
        .unwrap()
        .character_spacing(Some(-1.0), MeasuringUnits::Points)
        .unwrap()
        .font_face(Some("Consolas"))
        .unwrap();
    assert_eq!(run.font_color_value().as_deref(), Some("000080"));
    assert_eq!(run.fill_color_value().as_deref(), Some("FFFF00"));
    assert_eq!(run.border_value(), Some(Border::single(0.5)));
    assert_eq!(run.manual_width_value(MeasuringUnits::Twips), Some(1440.0));
    assert_eq!(run.character_spacing_value(MeasuringUnits::Twips), Some(-20.0));
    assert_eq!(run.font_face_value().as_deref(), Some("Consolas"));
    assert!(matches!(run.font_color(Some("blurple")), Err(Error::Schema(_))));
}

#[test]
fn formatting_carries_between_runs() {
    let mut doc = Document::new();
    let formatting = doc
        .body()
        .add_paragraph()
        .add_run()
        .bold(Some(true))
        .unwrap()
        .font_size(Some(14.0), TextUnits::Points)
        .unwrap()
        .formatting();
    assert!(!formatting.is_empty());

    let run = doc
        .body()
        .add_paragraph()
        .add_run()
        .italic(Some(true))
        .unwrap()
        .apply_formatting(&formatting, true)
        .unwrap();
    assert_eq!(run.is_bold(), Some(true));
    assert_eq!(run.is_italic(), Some(true));
    assert_eq!(run.font_size_value(TextUnits::Points), Some(14.0));

    let run = run.apply_formatting(&formatting, false).unwrap();
    assert_eq!(run.is_italic(), None);

    let run = run.reset_formatting().unwrap();
    assert_eq!(run.is_bold(), None);
    assert!(run.formatting().is_empty());
}

#[test]
fn paragraph_layout() {
    let mut doc = Document::new();
    let paragraph = doc
        .body()
        .add_paragraph()
        .add_text("Hello")
        .unwrap()
        .add_text(" world")
        .unwrap()
        .justification(Some(JustificationValues::Center))
        .unwrap()
        .line_spacing(Some(1.5), LineUnits::WholeLines)
        .unwrap()
        .spacing_after(Some(6.0), LineUnits::Points)
        .unwrap()
        .keep_next(Some(true))
        .unwrap()
        .border(BorderEdge::Between, Some(Border::new(BorderValues::Dotted, 1.0)))
        .unwrap();
    assert_eq!(paragraph.text(), "Hello world");
    assert_eq!(paragraph.runs().len(), 2);
    assert_eq!(paragraph.line_spacing_value(LineUnits::Twips), Some(360.0));
    assert_eq!(paragraph.spacing_after_value(LineUnits::Twips), Some(120.0));
    assert_eq!(paragraph.spacing_before_value(LineUnits::Twips), None);
    assert_eq!(paragraph.justification_value(), Some(JustificationValues::Center));
    assert_eq!(
        paragraph.border_value(BorderEdge::Between).map(|b| b.style),
        Some(BorderValues::Dotted)
    );

    let result = paragraph.border(BorderEdge::InsideVertical, Some(Border::single(1.0)));
    assert!(matches!(result, Err(Error::Schema(_))));
}

#[test]
fn paragraph_reset_clears_runs_too() {
    let mut doc = Document::new();
    let paragraph = doc
        .body()
        .add_paragraph()
        .add_text("x")
        .unwrap()
        .apply_run_formatting(&Default::default(), true)
        .unwrap()
        .widow_control(Some(false))
        .unwrap();
    assert_eq!(paragraph.is_widow_control(), Some(false));
    let paragraph = paragraph
        .run(0)
        .unwrap()
        .bold(Some(true))
        .unwrap()
        .paragraph()
        .unwrap()
        .reset_formatting(true)
        .unwrap();
    assert_eq!(paragraph.is_widow_control(), None);
    assert_eq!(paragraph.run(0).unwrap().is_bold(), None);
}

#[test]
fn table_properties() {
    let mut doc = Document::new();
    let table = doc
        .body()
        .add_table(2, 3)
        .layout(Some(TableLayoutValues::Fixed))
        .unwrap()
        .width(Some(50.0), WidthUnits::Percentage)
        .unwrap()
        .border(BorderEdge::InsideHorizontal, Some(Border::single(0.5).color("gray")))
        .unwrap()
        .default_cell_margin(Side::Left, Some(5.4))
        .unwrap()
        .caption(Some("Totals".to_string()))
        .unwrap();
    assert_eq!(table.rows().len(), 2);
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.layout_value(), Some(TableLayoutValues::Fixed));
    assert_eq!(table.width_value(), Some((50.0, WidthUnits::Percentage)));
    assert_eq!(table.default_cell_margin_value(Side::Left), Some(5.4));
    assert!(matches!(
        table.border(BorderEdge::Between, Some(Border::single(1.0))),
        Err(Error::Schema(_))
    ));

    let table = doc.body().table(0).unwrap().layout(None).unwrap();
    assert_eq!(table.layout_value(), None);
    let id = table.id();
    drop(table);
    let tbl_pr = doc.tree().first_child(id, "w:tblPr").unwrap();
    assert_eq!(
        common::child_names(&doc, tbl_pr),
        ["w:tblW", "w:tblBorders", "w:tblCellMar", "w:tblCaption"]
    );
}

#[test]
fn rows_and_cells() {
    let mut doc = Document::new();
    let row = doc
        .body()
        .add_table(1, 2)
        .add_row()
        .height(Some(0.5), MeasuringUnits::Inches, HeightRuleValues::Exact)
        .unwrap()
        .header(Some(true))
        .unwrap();
    assert_eq!(row.height_value(MeasuringUnits::Twips), Some(720.0));
    assert_eq!(row.height_rule(), Some(HeightRuleValues::Exact));
    assert_eq!(row.cells().len(), 2);

    let row = row.height(None, MeasuringUnits::Twips, HeightRuleValues::Auto).unwrap();
    assert_eq!(row.height_rule(), None);
    assert_eq!(row.is_header(), Some(true));

    let cell = row
        .cell(1)
        .unwrap()
        .vertical_merge(Some(MergedCellValues::Restart))
        .unwrap()
        .grid_span(Some(2))
        .unwrap()
        .fill_color(Some("silver"))
        .unwrap()
        .border(BorderEdge::Top, Some(Border::new(BorderValues::Thick, 2.0)))
        .unwrap()
        .margin(Side::Top, Some(2.0))
        .unwrap()
        .width(Some(72.0), WidthUnits::Points)
        .unwrap();
    assert_eq!(cell.vertical_merge_value(), Some(MergedCellValues::Restart));
    assert_eq!(cell.grid_span_value(), Some(2));
    assert_eq!(cell.fill_color_value().as_deref(), Some("C0C0C0"));
    assert_eq!(cell.width_value(), Some((72.0, WidthUnits::Points)));
    assert_eq!(cell.margin_value(Side::Top), Some(2.0));

    let cell = cell.add_paragraph().add_text("merged").unwrap();
    let id = cell.id();
    drop(cell);
    let tc = doc.tree().parent(id).unwrap();
    let tc_pr = doc.tree().first_child(tc, "w:tcPr").unwrap();
    assert_eq!(
        common::child_names(&doc, tc_pr),
        ["w:tcW", "w:gridSpan", "w:vMerge", "w:tcBorders", "w:shd", "w:tcMar"]
    );
}

#[test]
fn body_blocks_and_page_setup() {
    let mut doc = Document::new();
    doc.body().add_paragraph().add_text("first").unwrap();
    doc.body().page_break().unwrap().empty_line().unwrap();
    doc.body().add_paragraph().add_text("last").unwrap();

    let body = doc
        .body()
        .margin(quickdocx::Margin::Left, Some(2.0), MeasuringUnits::Centimeters)
        .unwrap()
        .page_width(Some(8.5), MeasuringUnits::Inches)
        .unwrap();
    assert_eq!(body.paragraphs().len(), 4);
    assert_eq!(body.text(), "first\n\n\nlast");
    assert_eq!(body.margin_value(quickdocx::Margin::Left, MeasuringUnits::Twips), Some(1134.0));
    assert_eq!(body.page_width_value(MeasuringUnits::Twips), 12240.0);
    let body_id = body.id();
    drop(body);

    let names = common::child_names(&doc, body_id);
    assert_eq!(names.last().map(String::as_str), Some("w:sectPr"));

    let empty_line = doc.body().paragraph(2).unwrap();
    assert_eq!(empty_line.spacing_before_value(LineUnits::Points), Some(0.0));
    assert_eq!(empty_line.spacing_after_value(LineUnits::Points), Some(8.0));
    assert_eq!(
        empty_line.run(0).unwrap().font_size_value(TextUnits::Points),
        Some(11.0)
    );
}

#[test]
fn horizontal_lines() {
    let mut doc = Document::new();
    doc.body()
        .horizontal_line(LinePosition::default(), Border::single(1.0))
        .unwrap()
        .horizontal_line(LinePosition::Top, Border::new(BorderValues::Double, 1.5).color("red"))
        .unwrap();

    let bottom = doc.body().paragraph(0).unwrap();
    assert_eq!(bottom.border_value(BorderEdge::Bottom), Some(Border::single(1.0)));
    assert_eq!(bottom.border_value(BorderEdge::Top), None);
    let id = bottom.id();
    drop(bottom);
    assert_eq!(common::child_names(&doc, id), ["w:pPr"]);

    let top = doc.body().paragraph(1).unwrap();
    assert_eq!(
        top.border_value(BorderEdge::Top),
        Some(Border::new(BorderValues::Double, 1.5).color("FF0000"))
    );
    let id = top.id();
    drop(top);
    let line = doc.tree().find_path(id, &["w:pPr", "w:pBdr", "w:top"]).unwrap();
    assert_eq!(doc.tree().attribute(line, "w:sz"), Some("9"));
    assert_eq!(doc.tree().attribute(line, "w:val"), Some("double"));
}
