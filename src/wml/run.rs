use super::{Border, Formatting, Paragraph, RUN_PROPERTIES};
use crate::docx::ImageRef;
use crate::drawing::{Drawing, inline_picture};
use crate::error::Error;
use crate::props;
use crate::schema::{
    CharacterSpacing, Color, FitText, FontSize, FontSizeComplexScript, Kern, Languages, Position,
    RunFonts, Underline,
};
use crate::tree::{Element, NodeId, Tree};
use crate::units::{MeasuringUnits, TextUnits, Unit};
use crate::values::{HighlightColorValues, UnderlineValues, VerticalPositionValues};

handle!(
    /// A `w:r` text run.
    Run = "w:r"
);

/// Breaks that read as a line break in plain text.
fn is_line_break(tree: &Tree, node: NodeId) -> bool {
    tree.attribute(node, "w:type")
        .is_none_or(|kind| kind == "textWrapping")
}

pub(crate) fn run_text(tree: &Tree, run: NodeId) -> String {
    let mut text = String::new();
    for child in tree.child_elements(run) {
        match tree.name(child) {
            Some("w:t") => text.push_str(&tree.text_content(child)),
            Some("w:tab") => text.push('\t'),
            Some("w:cr") => text.push('\n'),
            Some("w:br") if is_line_break(tree, child) => text.push('\n'),
            _ => {}
        }
    }
    text
}

impl<'a> Run<'a> {
    toggles! { RUN_PROPERTIES;
        bold, is_bold => Bold;
        bold_complex_script, is_bold_complex_script => BoldComplexScript;
        italic, is_italic => Italic;
        italic_complex_script, is_italic_complex_script => ItalicComplexScript;
        caps, is_caps => Caps;
        small_caps, is_small_caps => SmallCaps;
        strike, is_strike => Strike;
        double_strike, is_double_strike => DoubleStrike;
        outline, is_outline => OutlineText;
        shadow, is_shadow => Shadow;
        emboss, is_emboss => Emboss;
        imprint, is_imprint => Imprint;
        no_proof, is_no_proof => NoProof;
        snap_to_grid, is_snap_to_grid => SnapToGrid;
        /// `w:vanish`.
        hidden, is_hidden => Vanish;
        web_hidden, is_web_hidden => WebHidden;
        right_to_left, is_right_to_left => RightToLeftText;
    }

    values! { RUN_PROPERTIES;
        /// Character style id.
        style, style_value => RunStyle: String;
        highlight, highlight_value => Highlight: HighlightColorValues;
        vertical_alignment, vertical_alignment_value => VerticalTextAlignment: VerticalPositionValues;
        /// Horizontal stretch in percent.
        character_scale, character_scale_value => CharacterScale: u32;
    }

    /// Plain text: `w:t` contents, with line breaks as `\n` and tabs as `\t`.
    pub fn text(&self) -> String {
        run_text(self.tree(), self.id)
    }

    /// Replaces the run's text and line breaks. Anything else the run holds
    /// (properties, drawings) is kept.
    pub fn set_text(mut self, text: &str) -> Result<Self, Error> {
        let id = self.id;
        let tree = self.tree_mut();
        for child in tree.children(id).to_vec() {
            let remove = match tree.name(child) {
                Some("w:t" | "w:tab" | "w:cr") => true,
                Some("w:br") => is_line_break(tree, child),
                _ => false,
            };
            if remove {
                tree.remove(child);
            }
        }
        self.append_text(text)
    }

    /// Appends `text`; each `\n` becomes a `w:br`.
    pub fn append_text(mut self, text: &str) -> Result<Self, Error> {
        let id = self.id;
        let tree = self.tree_mut();
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                let br = tree.create_element("w:br");
                tree.append_child(id, br);
            }
            if line.is_empty() {
                continue;
            }
            let t = tree.import(
                Element::new("w:t")
                    .attr("xml:space", "preserve")
                    .text(line),
            );
            tree.append_child(id, t);
        }
        Ok(self)
    }

    /// Appends a hard page break.
    pub fn page_break(mut self) -> Result<Self, Error> {
        let id = self.id;
        let tree = self.tree_mut();
        let br = tree.import(Element::new("w:br").attr("w:type", "page"));
        tree.append_child(id, br);
        Ok(self)
    }

    pub fn font_size(mut self, size: Option<f64>, units: TextUnits) -> Result<Self, Error> {
        let id = self.id;
        props::set_in::<FontSize, i64>(
            self.tree_mut(),
            id,
            RUN_PROPERTIES,
            "val",
            size.map(|s| units.from_other(s)),
        )?;
        Ok(self)
    }

    pub fn font_size_value(&self, units: TextUnits) -> Option<f64> {
        props::get_in::<FontSize, i64>(self.tree(), self.id, RUN_PROPERTIES, "val")
            .map(|v| units.to_other(v))
    }

    pub fn font_size_complex_script(mut self, size: Option<f64>, units: TextUnits) -> Result<Self, Error> {
        let id = self.id;
        props::set_in::<FontSizeComplexScript, i64>(
            self.tree_mut(),
            id,
            RUN_PROPERTIES,
            "val",
            size.map(|s| units.from_other(s)),
        )?;
        Ok(self)
    }

    pub fn font_size_complex_script_value(&self, units: TextUnits) -> Option<f64> {
        props::get_in::<FontSizeComplexScript, i64>(self.tree(), self.id, RUN_PROPERTIES, "val")
            .map(|v| units.to_other(v))
    }

    /// Smallest font size that is kerned.
    pub fn kerning(mut self, size: Option<f64>, units: TextUnits) -> Result<Self, Error> {
        let id = self.id;
        props::set_in::<Kern, i64>(
            self.tree_mut(),
            id,
            RUN_PROPERTIES,
            "val",
            size.map(|s| units.from_other(s)),
        )?;
        Ok(self)
    }

    pub fn kerning_value(&self, units: TextUnits) -> Option<f64> {
        props::get_in::<Kern, i64>(self.tree(), self.id, RUN_PROPERTIES, "val").map(|v| units.to_other(v))
    }

    /// Raised (positive) or lowered text.
    pub fn vertical_position(mut self, offset: Option<f64>, units: TextUnits) -> Result<Self, Error> {
        let id = self.id;
        props::set_in::<Position, i64>(
            self.tree_mut(),
            id,
            RUN_PROPERTIES,
            "val",
            offset.map(|o| units.from_other(o)),
        )?;
        Ok(self)
    }

    pub fn vertical_position_value(&self, units: TextUnits) -> Option<f64> {
        props::get_in::<Position, i64>(self.tree(), self.id, RUN_PROPERTIES, "val")
            .map(|v| units.to_other(v))
    }

    /// Extra space between characters, negative to condense.
    pub fn character_spacing(mut self, spacing: Option<f64>, units: MeasuringUnits) -> Result<Self, Error> {
        let id = self.id;
        props::set_in::<CharacterSpacing, i64>(
            self.tree_mut(),
            id,
            RUN_PROPERTIES,
            "val",
            spacing.map(|s| units.from_other(s)),
        )?;
        Ok(self)
    }

    pub fn character_spacing_value(&self, units: MeasuringUnits) -> Option<f64> {
        props::get_in::<CharacterSpacing, i64>(self.tree(), self.id, RUN_PROPERTIES, "val")
            .map(|v| units.to_other(v))
    }

    /// Fits the run's text into `width`.
    pub fn manual_width(mut self, width: Option<f64>, units: MeasuringUnits) -> Result<Self, Error> {
        let id = self.id;
        props::set_in::<FitText, i64>(
            self.tree_mut(),
            id,
            RUN_PROPERTIES,
            "val",
            width.map(|w| units.from_other(w)),
        )?;
        Ok(self)
    }

    pub fn manual_width_value(&self, units: MeasuringUnits) -> Option<f64> {
        props::get_in::<FitText, i64>(self.tree(), self.id, RUN_PROPERTIES, "val").map(|v| units.to_other(v))
    }

    pub fn font_color(mut self, color: Option<&str>) -> Result<Self, Error> {
        let color = color.map(super::color_value).transpose()?;
        let id = self.id;
        props::set_in::<Color, String>(self.tree_mut(), id, RUN_PROPERTIES, "val", color)?;
        Ok(self)
    }

    pub fn font_color_value(&self) -> Option<String> {
        props::get_in::<Color, String>(self.tree(), self.id, RUN_PROPERTIES, "val")
    }

    /// Font for ASCII characters.
    pub fn font_face(mut self, font: Option<&str>) -> Result<Self, Error> {
        let id = self.id;
        props::set_in::<RunFonts, String>(
            self.tree_mut(),
            id,
            RUN_PROPERTIES,
            "ascii",
            font.map(str::to_string),
        )?;
        Ok(self)
    }

    pub fn font_face_value(&self) -> Option<String> {
        props::get_in::<RunFonts, String>(self.tree(), self.id, RUN_PROPERTIES, "ascii")
    }

    /// Proofing language, e.g. `en-US`.
    pub fn language(mut self, language: Option<&str>) -> Result<Self, Error> {
        let id = self.id;
        props::set_in::<Languages, String>(
            self.tree_mut(),
            id,
            RUN_PROPERTIES,
            "val",
            language.map(str::to_string),
        )?;
        Ok(self)
    }

    pub fn language_value(&self) -> Option<String> {
        props::get_in::<Languages, String>(self.tree(), self.id, RUN_PROPERTIES, "val")
    }

    /// `None` style removes the underline, color included.
    pub fn underline(mut self, style: Option<UnderlineValues>, color: Option<&str>) -> Result<Self, Error> {
        let id = self.id;
        let Some(style) = style else {
            props::set_in::<Underline, UnderlineValues>(self.tree_mut(), id, RUN_PROPERTIES, "val", None)?;
            return Ok(self);
        };
        let color = color.map(super::color_value).transpose()?;
        let tree = self.tree_mut();
        props::set_in::<Underline, UnderlineValues>(tree, id, RUN_PROPERTIES, "val", Some(style))?;
        props::set_in::<Underline, String>(tree, id, RUN_PROPERTIES, "color", color)?;
        Ok(self)
    }

    pub fn underline_value(&self) -> Option<UnderlineValues> {
        props::get_in::<Underline, UnderlineValues>(self.tree(), self.id, RUN_PROPERTIES, "val")
    }

    pub fn underline_color(&self) -> Option<String> {
        props::get_in::<Underline, String>(self.tree(), self.id, RUN_PROPERTIES, "color")
    }

    /// Replaces the whole `w:u` element.
    pub fn underline_class(mut self, underline: Option<Element>) -> Result<Self, Error> {
        let id = self.id;
        let tree = self.tree_mut();
        if let Some(rpr) = props::host_chain(tree, id, RUN_PROPERTIES, underline.is_some())? {
            props::set_property_class_or_remove::<Underline>(tree, rpr, underline)?;
        }
        Ok(self)
    }

    /// Box around the run (`w:bdr`).
    pub fn border(mut self, border: Option<Border>) -> Result<Self, Error> {
        let id = self.id;
        super::set_border(self.tree_mut(), id, RUN_PROPERTIES, "w:bdr", border.as_ref())?;
        Ok(self)
    }

    pub fn border_value(&self) -> Option<Border> {
        super::border_value(self.tree(), self.id, RUN_PROPERTIES, "w:bdr")
    }

    pub fn fill_color(mut self, color: Option<&str>) -> Result<Self, Error> {
        let id = self.id;
        super::set_fill_color(self.tree_mut(), id, RUN_PROPERTIES, color)?;
        Ok(self)
    }

    pub fn fill_color_value(&self) -> Option<String> {
        super::fill_color(self.tree(), self.id, RUN_PROPERTIES)
    }

    pub fn formatting(&self) -> Formatting {
        Formatting::capture(self.tree(), self.id, "w:rPr")
    }

    /// See [`Formatting`]: `ignore_nulls` merges instead of replacing.
    pub fn apply_formatting(mut self, formatting: &Formatting, ignore_nulls: bool) -> Result<Self, Error> {
        let id = self.id;
        formatting.apply(self.tree_mut(), id, "w:rPr", ignore_nulls)?;
        Ok(self)
    }

    pub fn reset_formatting(mut self) -> Result<Self, Error> {
        let id = self.id;
        self.tree_mut().remove_children_named(id, "w:rPr");
        Ok(self)
    }

    /// Inline picture of `image` at its native pixel size.
    pub fn add_image(self, image: &ImageRef) -> Result<Drawing<'a>, Error> {
        let (width, height) = image.pixel_size;
        self.add_image_sized(image, width as f64, height as f64)
    }

    pub fn add_image_sized(mut self, image: &ImageRef, width_px: f64, height_px: f64) -> Result<Drawing<'a>, Error> {
        let doc_pr_id = self.doc.next_drawing_id();
        let id = self.id;
        let tree = self.tree_mut();
        let drawing = tree.import(inline_picture(image, width_px, height_px, doc_pr_id));
        tree.append_child(id, drawing);
        log::debug!("Placed {} as drawing {doc_pr_id}", image.name);
        Drawing::new(self.doc, drawing).ok_or(Error::MalformedDrawing("missing wp:inline"))
    }

    /// Every `w:drawing` in this run.
    pub fn drawings(&self) -> Vec<NodeId> {
        self.tree().children_named(self.id, "w:drawing")
    }

    /// The paragraph containing this run.
    pub fn paragraph(self) -> Option<Paragraph<'a>> {
        let paragraph = self
            .tree()
            .ancestors(self.id)
            .find(|a| self.tree().is_element(*a, "w:p"))?;
        Paragraph::new(self.doc, paragraph)
    }
}

#[cfg(test)]
mod tests {
    use crate::Document;

    #[test]
    fn newlines_become_breaks() {
        let mut doc = Document::new();
        let run = doc
            .body()
            .add_paragraph()
            .add_run()
            .set_text("one\ntwo")
            .unwrap();
        let id = run.id();
        assert_eq!(run.text(), "one\ntwo");

        let names: Vec<_> = doc
            .tree()
            .child_elements(id)
            .filter_map(|c| doc.tree().name(c))
            .collect();
        assert_eq!(names, ["w:t", "w:br", "w:t"]);
    }

    #[test]
    fn set_text_keeps_page_breaks_and_properties() {
        let mut doc = Document::new();
        let run = doc
            .body()
            .add_paragraph()
            .add_run()
            .bold(Some(true))
            .unwrap()
            .page_break()
            .unwrap()
            .append_text("old")
            .unwrap()
            .set_text("new")
            .unwrap();
        assert_eq!(run.text(), "new");
        assert_eq!(run.is_bold(), Some(true));
        assert_eq!(run.drawings().len(), 0);
        let id = run.id();
        assert_eq!(doc.tree().children_named(id, "w:br").len(), 1);
    }
}
