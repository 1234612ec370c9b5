use super::{Border, BorderEdge, Paragraph, Table};
use crate::docx::Document;
use crate::error::Error;
use crate::props;
use crate::schema::{PageMargin, PageSize};
use crate::tree::{Element, NodeId, Tree};
use crate::units::{LineUnits, MeasuringUnits, TextUnits, Unit};

/// US Letter in twips, the page size assumed when `w:pgSz` is absent.
const LETTER_WIDTH: i64 = 12240;
const LETTER_HEIGHT: i64 = 15840;

/// One of the `w:pgMar` distances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Margin {
    Left,
    Top,
    Right,
    Bottom,
    Header,
    Footer,
    Gutter,
}

impl Margin {
    fn field(self) -> &'static str {
        match self {
            Margin::Left => "left",
            Margin::Top => "top",
            Margin::Right => "right",
            Margin::Bottom => "bottom",
            Margin::Header => "header",
            Margin::Footer => "footer",
            Margin::Gutter => "gutter",
        }
    }
}

/// Edge of a horizontal line paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinePosition {
    Top,
    #[default]
    Bottom,
}

/// The document body. New blocks go before the trailing `w:sectPr`.
pub struct Body<'a> {
    doc: &'a mut Document,
    id: NodeId,
}

impl<'a> Body<'a> {
    pub(crate) fn new(doc: &'a mut Document, id: NodeId) -> Self {
        Body { doc, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    fn tree(&self) -> &Tree {
        &self.doc.tree
    }

    fn tree_mut(&mut self) -> &mut Tree {
        &mut self.doc.tree
    }

    fn section(&self) -> Option<NodeId> {
        let tree = self.tree();
        tree.child_elements(self.id)
            .last()
            .filter(|c| tree.is_element(*c, "w:sectPr"))
    }

    fn section_or_init(&mut self) -> NodeId {
        if let Some(section) = self.section() {
            return section;
        }
        let id = self.id;
        let tree = self.tree_mut();
        let section = tree.create_element("w:sectPr");
        tree.append_child(id, section);
        section
    }

    fn append_block(&mut self, element: Element) -> NodeId {
        let id = self.id;
        let index = match self.section() {
            Some(section) => self.tree().index_of(id, section).unwrap_or(0),
            None => self.tree().child_count(id),
        };
        let tree = self.tree_mut();
        let block = tree.import(element);
        tree.insert_child(id, index, block);
        block
    }

    pub fn add_paragraph(mut self) -> Paragraph<'a> {
        let paragraph = self.append_block(Element::new("w:p"));
        Paragraph::at(self.doc, paragraph)
    }

    /// A `rows` x `columns` grid of empty cells.
    pub fn add_table(mut self, rows: usize, columns: usize) -> Table<'a> {
        let columns = columns.max(1);
        let grid = (0..columns).fold(Element::new("w:tblGrid"), |grid, _| {
            grid.child(Element::new("w:gridCol"))
        });
        let row = (0..columns).fold(Element::new("w:tr"), |row, _| {
            row.child(Element::new("w:tc").child(Element::new("w:p")))
        });
        let table = (0..rows).fold(
            Element::new("w:tbl")
                .child(
                    Element::new("w:tblPr").child(
                        Element::new("w:tblW")
                            .attr("w:w", 0)
                            .attr("w:type", "auto"),
                    ),
                )
                .child(grid),
            |table, _| table.child(row.clone()),
        );
        let table = self.append_block(table);
        log::debug!("Added {rows}x{columns} table");
        Table::at(self.doc, table)
    }

    /// Top-level paragraphs, in document order.
    pub fn paragraphs(&self) -> Vec<NodeId> {
        self.tree().children_named(self.id, "w:p")
    }

    pub fn paragraph(self, index: usize) -> Option<Paragraph<'a>> {
        let id = *self.paragraphs().get(index)?;
        Paragraph::new(self.doc, id)
    }

    pub fn tables(&self) -> Vec<NodeId> {
        self.tree().children_named(self.id, "w:tbl")
    }

    pub fn table(self, index: usize) -> Option<Table<'a>> {
        let id = *self.tables().get(index)?;
        Table::new(self.doc, id)
    }

    /// Paragraph holding a single page break.
    pub fn page_break(mut self) -> Result<Self, Error> {
        let paragraph = self.append_block(Element::new("w:p"));
        Paragraph::at(&mut *self.doc, paragraph)
            .add_run()
            .page_break()?;
        Ok(self)
    }

    /// Blank 11pt paragraph with no space before and 8pt after.
    pub fn empty_line(mut self) -> Result<Self, Error> {
        let paragraph = self.append_block(Element::new("w:p"));
        Paragraph::at(&mut *self.doc, paragraph)
            .spacing_before(Some(0.0), LineUnits::Points)?
            .spacing_after(Some(8.0), LineUnits::Points)?
            .add_run()
            .font_size(Some(11.0), TextUnits::Points)?;
        Ok(self)
    }

    /// Empty paragraph drawing `border` across its top or bottom edge.
    pub fn horizontal_line(mut self, position: LinePosition, border: Border) -> Result<Self, Error> {
        let edge = match position {
            LinePosition::Top => BorderEdge::Top,
            LinePosition::Bottom => BorderEdge::Bottom,
        };
        let paragraph = self.append_block(Element::new("w:p"));
        Paragraph::at(&mut *self.doc, paragraph).border(edge, Some(border))?;
        Ok(self)
    }

    /// Plain text of every top-level paragraph, one per line.
    pub fn text(&self) -> String {
        self.paragraphs()
            .into_iter()
            .map(|p| super::paragraph::paragraph_text(self.tree(), p))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn margin(mut self, margin: Margin, value: Option<f64>, units: MeasuringUnits) -> Result<Self, Error> {
        let section = self.section_or_init();
        props::set_field_or_remove::<PageMargin, i64>(
            self.tree_mut(),
            section,
            margin.field(),
            value.map(|v| units.from_other(v)),
        )?;
        Ok(self)
    }

    pub fn margin_value(&self, margin: Margin, units: MeasuringUnits) -> Option<f64> {
        let section = self.section()?;
        props::field::<PageMargin, i64>(self.tree(), section, margin.field()).map(|v| units.to_other(v))
    }

    /// `None` falls back to Letter width.
    pub fn page_width(mut self, value: Option<f64>, units: MeasuringUnits) -> Result<Self, Error> {
        let section = self.section_or_init();
        props::set_field_or_remove::<PageSize, i64>(
            self.tree_mut(),
            section,
            "width",
            value.map(|v| units.from_other(v)),
        )?;
        Ok(self)
    }

    pub fn page_width_value(&self, units: MeasuringUnits) -> f64 {
        let width = self
            .section()
            .and_then(|s| props::field::<PageSize, i64>(self.tree(), s, "width"))
            .unwrap_or(LETTER_WIDTH);
        units.to_other(width)
    }

    /// `None` falls back to Letter height.
    pub fn page_height(mut self, value: Option<f64>, units: MeasuringUnits) -> Result<Self, Error> {
        let section = self.section_or_init();
        props::set_field_or_remove::<PageSize, i64>(
            self.tree_mut(),
            section,
            "height",
            value.map(|v| units.from_other(v)),
        )?;
        Ok(self)
    }

    pub fn page_height_value(&self, units: MeasuringUnits) -> f64 {
        let height = self
            .section()
            .and_then(|s| props::field::<PageSize, i64>(self.tree(), s, "height"))
            .unwrap_or(LETTER_HEIGHT);
        units.to_other(height)
    }
}
