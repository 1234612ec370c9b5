use super::{Border, BorderEdge, CELL_PROPERTIES, Paragraph, ROW_PROPERTIES, Side, TABLE_PROPERTIES};
use crate::error::Error;
use crate::props;
use crate::schema::{
    BottomMargin, LeftMargin, RightMargin, TableCellWidth, TableIndentation, TableLayout,
    TableRowHeight, TableWidth, TopMargin, VerticalMerge,
};
use crate::tree::{Element, NodeId, Tree};
use crate::units::{MeasuringUnits, Unit, WidthUnits};
use crate::values::{
    HeightRuleValues, JustificationValues, MergedCellValues, TableLayoutValues, TextDirectionValues,
    VerticalJustificationValues,
};

const TABLE_BORDERS: &[&str] = &["w:tblPr", "w:tblBorders"];
const TABLE_CELL_MARGINS: &[&str] = &["w:tblPr", "w:tblCellMar"];
const CELL_BORDERS: &[&str] = &["w:tcPr", "w:tcBorders"];
const CELL_MARGINS: &[&str] = &["w:tcPr", "w:tcMar"];

handle!(
    /// A `w:tbl` table.
    Table = "w:tbl"
);

handle!(
    /// A `w:tr` table row.
    TableRow = "w:tr"
);

handle!(
    /// A `w:tc` table cell.
    TableCell = "w:tc"
);

/// Cell margin in points, through the kind for `side`.
fn set_margin(tree: &mut Tree, owner: NodeId, chain: &[&str], side: Side, points: Option<f64>) -> Result<(), Error> {
    let units = WidthUnits::Points;
    match side {
        Side::Top => super::set_width::<TopMargin>(tree, owner, chain, points, units),
        Side::Left => super::set_width::<LeftMargin>(tree, owner, chain, points, units),
        Side::Bottom => super::set_width::<BottomMargin>(tree, owner, chain, points, units),
        Side::Right => super::set_width::<RightMargin>(tree, owner, chain, points, units),
    }
}

fn margin(tree: &Tree, owner: NodeId, chain: &[&str], side: Side) -> Option<f64> {
    let width = match side {
        Side::Top => super::width_value::<TopMargin>(tree, owner, chain),
        Side::Left => super::width_value::<LeftMargin>(tree, owner, chain),
        Side::Bottom => super::width_value::<BottomMargin>(tree, owner, chain),
        Side::Right => super::width_value::<RightMargin>(tree, owner, chain),
    };
    width.map(|(value, _)| value)
}

fn empty_cell() -> Element {
    Element::new("w:tc").child(Element::new("w:p"))
}

impl<'a> Table<'a> {
    values! { TABLE_PROPERTIES;
        /// Table style id.
        style, style_value => TableStyle: String;
        justification, justification_value => Justification: JustificationValues;
        caption, caption_value => TableCaption: String;
        description, description_value => TableDescription: String;
        /// `never` or `overlap`, for floating tables.
        overlap, overlap_value => TableOverlap: String;
    }

    pub fn width(mut self, width: Option<f64>, units: WidthUnits) -> Result<Self, Error> {
        let id = self.id;
        super::set_width::<TableWidth>(self.tree_mut(), id, TABLE_PROPERTIES, width, units)?;
        Ok(self)
    }

    pub fn width_value(&self) -> Option<(f64, WidthUnits)> {
        super::width_value::<TableWidth>(self.tree(), self.id, TABLE_PROPERTIES)
    }

    /// Distance from the leading margin.
    pub fn indentation(mut self, indentation: Option<f64>, units: WidthUnits) -> Result<Self, Error> {
        let id = self.id;
        super::set_width::<TableIndentation>(self.tree_mut(), id, TABLE_PROPERTIES, indentation, units)?;
        Ok(self)
    }

    pub fn indentation_value(&self) -> Option<(f64, WidthUnits)> {
        super::width_value::<TableIndentation>(self.tree(), self.id, TABLE_PROPERTIES)
    }

    pub fn layout(mut self, layout: Option<TableLayoutValues>) -> Result<Self, Error> {
        let id = self.id;
        props::set_in::<TableLayout, TableLayoutValues>(self.tree_mut(), id, TABLE_PROPERTIES, "type", layout)?;
        Ok(self)
    }

    pub fn layout_value(&self) -> Option<TableLayoutValues> {
        props::get_in::<TableLayout, TableLayoutValues>(self.tree(), self.id, TABLE_PROPERTIES, "type")
    }

    /// `Between` is paragraph-only and rejected.
    pub fn border(mut self, edge: BorderEdge, border: Option<Border>) -> Result<Self, Error> {
        let id = self.id;
        super::set_border(self.tree_mut(), id, TABLE_BORDERS, edge.element_name(), border.as_ref())?;
        Ok(self)
    }

    pub fn border_value(&self, edge: BorderEdge) -> Option<Border> {
        super::border_value(self.tree(), self.id, TABLE_BORDERS, edge.element_name())
    }

    /// Default margin of every cell, in points.
    pub fn default_cell_margin(mut self, side: Side, points: Option<f64>) -> Result<Self, Error> {
        let id = self.id;
        set_margin(self.tree_mut(), id, TABLE_CELL_MARGINS, side, points)?;
        Ok(self)
    }

    pub fn default_cell_margin_value(&self, side: Side) -> Option<f64> {
        margin(self.tree(), self.id, TABLE_CELL_MARGINS, side)
    }

    pub fn column_count(&self) -> usize {
        self.tree()
            .first_child(self.id, "w:tblGrid")
            .map_or(0, |grid| self.tree().children_named(grid, "w:gridCol").len())
    }

    pub fn rows(&self) -> Vec<NodeId> {
        self.tree().children_named(self.id, "w:tr")
    }

    pub fn row(self, index: usize) -> Option<TableRow<'a>> {
        let id = *self.rows().get(index)?;
        TableRow::new(self.doc, id)
    }

    /// Appends a row with one empty cell per grid column.
    pub fn add_row(mut self) -> TableRow<'a> {
        let columns = self.column_count().max(1);
        let row = (0..columns).fold(Element::new("w:tr"), |row, _| row.child(empty_cell()));
        let id = self.id;
        let tree = self.tree_mut();
        let row = tree.import(row);
        tree.append_child(id, row);
        TableRow::at(self.doc, row)
    }
}

impl<'a> TableRow<'a> {
    toggles! { ROW_PROPERTIES;
        /// Keep the row on one page.
        cant_split, is_cant_split => CantSplit;
        /// Repeat the row at the top of each page.
        header, is_header => TableHeader;
        hidden, is_hidden => Hidden;
    }

    values! { ROW_PROPERTIES;
        justification, justification_value => Justification: JustificationValues;
    }

    /// `None` height removes the rule too.
    pub fn height(mut self, height: Option<f64>, units: MeasuringUnits, rule: HeightRuleValues) -> Result<Self, Error> {
        let id = self.id;
        let tree = self.tree_mut();
        let Some(height) = height else {
            props::set_in::<TableRowHeight, i64>(tree, id, ROW_PROPERTIES, "val", None)?;
            return Ok(self);
        };
        props::set_in::<TableRowHeight, i64>(tree, id, ROW_PROPERTIES, "val", Some(units.from_other(height)))?;
        props::set_in::<TableRowHeight, HeightRuleValues>(tree, id, ROW_PROPERTIES, "rule", Some(rule))?;
        Ok(self)
    }

    pub fn height_value(&self, units: MeasuringUnits) -> Option<f64> {
        props::get_in::<TableRowHeight, i64>(self.tree(), self.id, ROW_PROPERTIES, "val")
            .map(|v| units.to_other(v))
    }

    /// A missing rule reads as `AtLeast`.
    pub fn height_rule(&self) -> Option<HeightRuleValues> {
        let tr_pr = self.tree().first_child(self.id, "w:trPr")?;
        props::child::<TableRowHeight>(self.tree(), tr_pr)?;
        Some(
            props::field::<TableRowHeight, HeightRuleValues>(self.tree(), tr_pr, "rule")
                .unwrap_or(HeightRuleValues::AtLeast),
        )
    }

    pub fn cells(&self) -> Vec<NodeId> {
        self.tree().children_named(self.id, "w:tc")
    }

    pub fn cell(self, index: usize) -> Option<TableCell<'a>> {
        let id = *self.cells().get(index)?;
        TableCell::new(self.doc, id)
    }

    pub fn add_cell(mut self) -> TableCell<'a> {
        let id = self.id;
        let tree = self.tree_mut();
        let cell = tree.import(empty_cell());
        tree.append_child(id, cell);
        TableCell::at(self.doc, cell)
    }
}

impl<'a> TableCell<'a> {
    toggles! { CELL_PROPERTIES;
        no_wrap, is_no_wrap => NoWrap;
        /// Ignore the end-of-cell mark when sizing the row.
        hide_mark, is_hide_mark => HideMark;
    }

    values! { CELL_PROPERTIES;
        /// Number of grid columns spanned.
        grid_span, grid_span_value => GridSpan: u32;
        horizontal_merge, horizontal_merge_value => HorizontalMerge: MergedCellValues;
        vertical_alignment, vertical_alignment_value => TableCellVerticalAlignment: VerticalJustificationValues;
        text_direction, text_direction_value => TextDirection: TextDirectionValues;
    }

    pub fn vertical_merge(mut self, merge: Option<MergedCellValues>) -> Result<Self, Error> {
        let id = self.id;
        props::set_in::<VerticalMerge, MergedCellValues>(self.tree_mut(), id, CELL_PROPERTIES, "val", merge)?;
        Ok(self)
    }

    /// A bare `w:vMerge` continues the merge above.
    pub fn vertical_merge_value(&self) -> Option<MergedCellValues> {
        let tc_pr = self.tree().first_child(self.id, "w:tcPr")?;
        props::child::<VerticalMerge>(self.tree(), tc_pr)?;
        Some(
            props::val::<VerticalMerge, MergedCellValues>(self.tree(), tc_pr)
                .unwrap_or(MergedCellValues::Continue),
        )
    }

    pub fn width(mut self, width: Option<f64>, units: WidthUnits) -> Result<Self, Error> {
        let id = self.id;
        super::set_width::<TableCellWidth>(self.tree_mut(), id, CELL_PROPERTIES, width, units)?;
        Ok(self)
    }

    pub fn width_value(&self) -> Option<(f64, WidthUnits)> {
        super::width_value::<TableCellWidth>(self.tree(), self.id, CELL_PROPERTIES)
    }

    pub fn fill_color(mut self, color: Option<&str>) -> Result<Self, Error> {
        let id = self.id;
        super::set_fill_color(self.tree_mut(), id, CELL_PROPERTIES, color)?;
        Ok(self)
    }

    pub fn fill_color_value(&self) -> Option<String> {
        super::fill_color(self.tree(), self.id, CELL_PROPERTIES)
    }

    pub fn border(mut self, edge: BorderEdge, border: Option<Border>) -> Result<Self, Error> {
        let id = self.id;
        super::set_border(self.tree_mut(), id, CELL_BORDERS, edge.element_name(), border.as_ref())?;
        Ok(self)
    }

    pub fn border_value(&self, edge: BorderEdge) -> Option<Border> {
        super::border_value(self.tree(), self.id, CELL_BORDERS, edge.element_name())
    }

    /// Margin of this cell in points, overriding the table default.
    pub fn margin(mut self, side: Side, points: Option<f64>) -> Result<Self, Error> {
        let id = self.id;
        set_margin(self.tree_mut(), id, CELL_MARGINS, side, points)?;
        Ok(self)
    }

    pub fn margin_value(&self, side: Side) -> Option<f64> {
        margin(self.tree(), self.id, CELL_MARGINS, side)
    }

    pub fn paragraphs(&self) -> Vec<NodeId> {
        self.tree().children_named(self.id, "w:p")
    }

    pub fn paragraph(self, index: usize) -> Option<Paragraph<'a>> {
        let id = *self.paragraphs().get(index)?;
        Paragraph::new(self.doc, id)
    }

    pub fn add_paragraph(mut self) -> Paragraph<'a> {
        let id = self.id;
        let tree = self.tree_mut();
        let paragraph = tree.create_element("w:p");
        tree.append_child(id, paragraph);
        Paragraph::at(self.doc, paragraph)
    }

    pub fn text(&self) -> String {
        self.paragraphs()
            .into_iter()
            .map(|p| super::paragraph::paragraph_text(self.tree(), p))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
