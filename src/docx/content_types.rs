use crate::tree::xml::escape_xml;

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

pub(crate) const MAIN_DOCUMENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const RELS_TYPE: &str = "application/vnd.openxmlformats-package.relationships+xml";

/// `[Content_Types].xml`: per-extension defaults and per-part overrides.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContentTypes {
    defaults: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    pub fn new_package(main_part: &str) -> Self {
        let mut types = ContentTypes::default();
        types.ensure_default("rels", RELS_TYPE);
        types.ensure_default("xml", "application/xml");
        types
            .overrides
            .push((format!("/{main_part}"), MAIN_DOCUMENT_TYPE.to_string()));
        types
    }

    pub fn parse(xml_content: &str) -> Self {
        let mut types = ContentTypes::default();
        let Ok(xml) = roxmltree::Document::parse(xml_content) else {
            log::warn!("Unreadable [Content_Types].xml, starting empty");
            return types;
        };
        for node in xml.root_element().children().filter(|n| n.is_element()) {
            let Some(content_type) = node.attribute("ContentType") else {
                continue;
            };
            match (node.tag_name().name(), node.attribute("Extension"), node.attribute("PartName")) {
                ("Default", Some(ext), _) => {
                    types.defaults.push((ext.to_string(), content_type.to_string()))
                }
                ("Override", _, Some(part)) => {
                    types.overrides.push((part.to_string(), content_type.to_string()))
                }
                _ => {}
            }
        }
        types
    }

    pub fn ensure_default(&mut self, extension: &str, content_type: &str) {
        let known = self
            .defaults
            .iter()
            .any(|(ext, _)| ext.eq_ignore_ascii_case(extension));
        if !known {
            self.defaults
                .push((extension.to_string(), content_type.to_string()));
        }
    }

    pub fn content_type(&self, part_name: &str) -> Option<&str> {
        let absolute = format!("/{part_name}");
        if let Some((_, ct)) = self
            .overrides
            .iter()
            .find(|(part, _)| part.eq_ignore_ascii_case(&absolute))
        {
            return Some(ct);
        }
        let ext = part_name.rsplit_once('.')?.1;
        self.defaults
            .iter()
            .find(|(e, _)| e.eq_ignore_ascii_case(ext))
            .map(|(_, ct)| ct.as_str())
    }

    pub fn to_xml(&self) -> String {
        let mut out = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n<Types xmlns=\"{CONTENT_TYPES_NS}\">"
        );
        for (ext, ct) in &self.defaults {
            out.push_str(&format!(
                "<Default Extension=\"{}\" ContentType=\"{}\"/>",
                escape_xml(ext),
                escape_xml(ct)
            ));
        }
        for (part, ct) in &self.overrides {
            out.push_str(&format!(
                "<Override PartName=\"{}\" ContentType=\"{}\"/>",
                escape_xml(part),
                escape_xml(ct)
            ));
        }
        out.push_str("</Types>");
        out
    }
}
