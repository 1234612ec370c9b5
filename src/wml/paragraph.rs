use super::run::run_text;
use super::{Border, BorderEdge, Formatting, PARAGRAPH_PROPERTIES, Run};
use crate::docx::ImageRef;
use crate::drawing::Drawing;
use crate::error::Error;
use crate::props;
use crate::schema::{Indentation, SpacingBetweenLines};
use crate::tree::{Element, NodeId, Tree};
use crate::units::{IndentationUnits, LineUnits, Unit};
use crate::values::JustificationValues;

const PARAGRAPH_BORDERS: &[&str] = &["w:pPr", "w:pBdr"];

handle!(
    /// A `w:p` paragraph.
    Paragraph = "w:p"
);

/// Runs of `paragraph`, including those nested in hyperlinks and fields.
fn runs(tree: &Tree, paragraph: NodeId) -> Vec<NodeId> {
    tree.descendants_named(paragraph, "w:r")
}

pub(crate) fn paragraph_text(tree: &Tree, paragraph: NodeId) -> String {
    runs(tree, paragraph)
        .into_iter()
        .map(|r| run_text(tree, r))
        .collect()
}

/// Twip and character attribute names of one indentation.
struct IndentFields {
    twips: &'static str,
    chars: &'static str,
}

const LEFT: IndentFields = IndentFields {
    twips: "left",
    chars: "left_chars",
};
const RIGHT: IndentFields = IndentFields {
    twips: "right",
    chars: "right_chars",
};
const FIRST_LINE: IndentFields = IndentFields {
    twips: "first_line",
    chars: "first_line_chars",
};
const HANGING: IndentFields = IndentFields {
    twips: "hanging",
    chars: "hanging_chars",
};

impl<'a> Paragraph<'a> {
    toggles! { PARAGRAPH_PROPERTIES;
        keep_next, is_keep_next => KeepNext;
        keep_lines, is_keep_lines => KeepLines;
        page_break_before, is_page_break_before => PageBreakBefore;
        widow_control, is_widow_control => WidowControl;
        /// Ignore spacing between paragraphs of the same style.
        contextual_spacing, is_contextual_spacing => ContextualSpacing;
    }

    values! { PARAGRAPH_PROPERTIES;
        /// Paragraph style id.
        style, style_value => ParagraphStyleId: String;
        justification, justification_value => Justification: JustificationValues;
        /// 0-based; 9 is body text.
        outline_level, outline_level_value => OutlineLevel: u8;
    }

    pub fn text(&self) -> String {
        paragraph_text(self.tree(), self.id)
    }

    pub fn runs(&self) -> Vec<NodeId> {
        runs(self.tree(), self.id)
    }

    pub fn run(self, index: usize) -> Option<Run<'a>> {
        let id = *self.runs().get(index)?;
        Run::new(self.doc, id)
    }

    pub fn add_run(mut self) -> Run<'a> {
        let id = self.id;
        let tree = self.tree_mut();
        let run = tree.create_element("w:r");
        tree.append_child(id, run);
        Run::at(self.doc, run)
    }

    /// Appends a run holding `text`.
    pub fn add_text(mut self, text: &str) -> Result<Self, Error> {
        let id = self.id;
        let tree = self.tree_mut();
        let run = tree.import(Element::new("w:r"));
        tree.append_child(id, run);
        Run::at(&mut *self.doc, run).set_text(text)?;
        Ok(self)
    }

    /// Inline picture in a new run.
    pub fn add_image(self, image: &ImageRef) -> Result<Drawing<'a>, Error> {
        self.add_run().add_image(image)
    }

    fn set_spacing(&mut self, field: &str, value: Option<f64>, units: LineUnits) -> Result<(), Error> {
        let id = self.id;
        props::set_in::<SpacingBetweenLines, i64>(
            self.tree_mut(),
            id,
            PARAGRAPH_PROPERTIES,
            field,
            value.map(|v| units.from_other(v)),
        )
    }

    fn spacing(&self, field: &str, units: LineUnits) -> Option<f64> {
        props::get_in::<SpacingBetweenLines, i64>(self.tree(), self.id, PARAGRAPH_PROPERTIES, field)
            .map(|v| units.to_other(v))
    }

    /// Distance between lines; `WholeLines` of 1.0 is single spacing.
    pub fn line_spacing(mut self, value: Option<f64>, units: LineUnits) -> Result<Self, Error> {
        self.set_spacing("line", value, units)?;
        Ok(self)
    }

    pub fn line_spacing_value(&self, units: LineUnits) -> Option<f64> {
        self.spacing("line", units)
    }

    pub fn spacing_before(mut self, value: Option<f64>, units: LineUnits) -> Result<Self, Error> {
        self.set_spacing("before", value, units)?;
        Ok(self)
    }

    pub fn spacing_before_value(&self, units: LineUnits) -> Option<f64> {
        self.spacing("before", units)
    }

    pub fn spacing_after(mut self, value: Option<f64>, units: LineUnits) -> Result<Self, Error> {
        self.set_spacing("after", value, units)?;
        Ok(self)
    }

    pub fn spacing_after_value(&self, units: LineUnits) -> Option<f64> {
        self.spacing("after", units)
    }

    /// Writes one of the twip/character pair and clears the other.
    fn set_indentation(&mut self, fields: &IndentFields, value: Option<f64>, units: IndentationUnits) -> Result<(), Error> {
        let (set, clear) = if units.is_characters() {
            (fields.chars, fields.twips)
        } else {
            (fields.twips, fields.chars)
        };
        let id = self.id;
        let tree = self.tree_mut();
        props::set_in::<Indentation, i64>(tree, id, PARAGRAPH_PROPERTIES, clear, None)?;
        props::set_in::<Indentation, i64>(
            tree,
            id,
            PARAGRAPH_PROPERTIES,
            set,
            value.map(|v| units.from_other(v)),
        )
    }

    fn indentation(&self, fields: &IndentFields, units: IndentationUnits) -> Option<f64> {
        let field = if units.is_characters() { fields.chars } else { fields.twips };
        props::get_in::<Indentation, i64>(self.tree(), self.id, PARAGRAPH_PROPERTIES, field)
            .map(|v| units.to_other(v))
    }

    pub fn left_indentation(mut self, value: Option<f64>, units: IndentationUnits) -> Result<Self, Error> {
        self.set_indentation(&LEFT, value, units)?;
        Ok(self)
    }

    pub fn left_indentation_value(&self, units: IndentationUnits) -> Option<f64> {
        self.indentation(&LEFT, units)
    }

    pub fn right_indentation(mut self, value: Option<f64>, units: IndentationUnits) -> Result<Self, Error> {
        self.set_indentation(&RIGHT, value, units)?;
        Ok(self)
    }

    pub fn right_indentation_value(&self, units: IndentationUnits) -> Option<f64> {
        self.indentation(&RIGHT, units)
    }

    /// Also clears any hanging indentation.
    pub fn first_line_indentation(mut self, value: Option<f64>, units: IndentationUnits) -> Result<Self, Error> {
        if value.is_some() {
            self.set_indentation(&HANGING, None, units)?;
        }
        self.set_indentation(&FIRST_LINE, value, units)?;
        Ok(self)
    }

    pub fn first_line_indentation_value(&self, units: IndentationUnits) -> Option<f64> {
        self.indentation(&FIRST_LINE, units)
    }

    /// Also clears any first-line indentation.
    pub fn hanging_indentation(mut self, value: Option<f64>, units: IndentationUnits) -> Result<Self, Error> {
        if value.is_some() {
            self.set_indentation(&FIRST_LINE, None, units)?;
        }
        self.set_indentation(&HANGING, value, units)?;
        Ok(self)
    }

    pub fn hanging_indentation_value(&self, units: IndentationUnits) -> Option<f64> {
        self.indentation(&HANGING, units)
    }

    pub fn fill_color(mut self, color: Option<&str>) -> Result<Self, Error> {
        let id = self.id;
        super::set_fill_color(self.tree_mut(), id, PARAGRAPH_PROPERTIES, color)?;
        Ok(self)
    }

    pub fn fill_color_value(&self) -> Option<String> {
        super::fill_color(self.tree(), self.id, PARAGRAPH_PROPERTIES)
    }

    /// `InsideHorizontal` and `InsideVertical` are table-only and rejected.
    pub fn border(mut self, edge: BorderEdge, border: Option<Border>) -> Result<Self, Error> {
        let id = self.id;
        super::set_border(self.tree_mut(), id, PARAGRAPH_BORDERS, edge.element_name(), border.as_ref())?;
        Ok(self)
    }

    pub fn border_value(&self, edge: BorderEdge) -> Option<Border> {
        super::border_value(self.tree(), self.id, PARAGRAPH_BORDERS, edge.element_name())
    }

    pub fn formatting(&self) -> Formatting {
        Formatting::capture(self.tree(), self.id, "w:pPr")
    }

    pub fn apply_formatting(mut self, formatting: &Formatting, ignore_nulls: bool) -> Result<Self, Error> {
        let id = self.id;
        formatting.apply(self.tree_mut(), id, "w:pPr", ignore_nulls)?;
        Ok(self)
    }

    /// Applies run formatting to every run of the paragraph.
    pub fn apply_run_formatting(mut self, formatting: &Formatting, ignore_nulls: bool) -> Result<Self, Error> {
        for run in self.runs() {
            formatting.apply(self.tree_mut(), run, "w:rPr", ignore_nulls)?;
        }
        Ok(self)
    }

    pub fn reset_formatting(mut self, including_runs: bool) -> Result<Self, Error> {
        let id = self.id;
        self.tree_mut().remove_children_named(id, "w:pPr");
        if including_runs {
            return self.reset_run_formatting();
        }
        Ok(self)
    }

    pub fn reset_run_formatting(mut self) -> Result<Self, Error> {
        for run in self.runs() {
            self.tree_mut().remove_children_named(run, "w:rPr");
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::units::IndentationUnits;
    use crate::Document;

    #[test]
    fn character_indentation_replaces_twips() {
        let mut doc = Document::new();
        let paragraph = doc
            .body()
            .add_paragraph()
            .left_indentation(Some(0.5), IndentationUnits::Inches)
            .unwrap();
        assert_eq!(paragraph.left_indentation_value(IndentationUnits::Twips), Some(720.0));

        let paragraph = paragraph
            .left_indentation(Some(2.0), IndentationUnits::Characters)
            .unwrap();
        assert_eq!(paragraph.left_indentation_value(IndentationUnits::Twips), None);
        assert_eq!(paragraph.left_indentation_value(IndentationUnits::Characters), Some(2.0));

        let paragraph = paragraph
            .left_indentation(None, IndentationUnits::Characters)
            .unwrap();
        let id = paragraph.id();
        assert!(doc.tree().first_child(id, "w:pPr").is_none());
    }

    #[test]
    fn first_line_and_hanging_exclude_each_other() {
        let mut doc = Document::new();
        let paragraph = doc
            .body()
            .add_paragraph()
            .hanging_indentation(Some(10.0), IndentationUnits::Points)
            .unwrap()
            .first_line_indentation(Some(20.0), IndentationUnits::Points)
            .unwrap();
        assert_eq!(paragraph.hanging_indentation_value(IndentationUnits::Points), None);
        assert_eq!(paragraph.first_line_indentation_value(IndentationUnits::Points), Some(20.0));
    }
}
