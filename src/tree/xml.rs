use std::collections::BTreeMap;
use std::fmt::Write;

use super::{Content, Element, NodeId, Tree};
use crate::error::Error;

pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const DML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const WPD_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
pub const PIC_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
pub const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const MC_NS: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Prefixes the crate's element names are written with. Documents that bind
/// these URIs to other prefixes are renamed on load.
const CANONICAL: &[(&str, &str)] = &[
    ("w", WML_NS),
    ("a", DML_NS),
    ("wp", WPD_NS),
    ("pic", PIC_NS),
    ("r", REL_NS),
    ("mc", MC_NS),
    ("w14", "http://schemas.microsoft.com/office/word/2010/wordml"),
    ("wp14", "http://schemas.microsoft.com/office/word/2010/wordprocessingDrawing"),
    ("a14", "http://schemas.microsoft.com/office/drawing/2010/main"),
    ("v", "urn:schemas-microsoft-com:vml"),
    ("o", "urn:schemas-microsoft-com:office:office"),
];

/// Namespace declarations of a parsed part, prefix to URI.
pub type Namespaces = BTreeMap<String, String>;

pub fn canonical_namespaces() -> Namespaces {
    CANONICAL
        .iter()
        .take(5)
        .map(|(p, u)| (p.to_string(), u.to_string()))
        .collect()
}

fn canonical_prefix(uri: &str) -> Option<&'static str> {
    CANONICAL.iter().find(|(_, u)| *u == uri).map(|(p, _)| *p)
}

fn canonical_uri(prefix: &str) -> Option<&'static str> {
    CANONICAL.iter().find(|(p, _)| *p == prefix).map(|(_, u)| *u)
}

fn qualify(node: roxmltree::Node, uri: Option<&str>, local: &str) -> String {
    let prefix = match uri {
        Some(XML_NS) => Some("xml"),
        Some(uri) => canonical_prefix(uri).or_else(|| node.lookup_prefix(uri)),
        None => None,
    };
    match prefix {
        Some(p) if !p.is_empty() => format!("{p}:{local}"),
        _ => local.to_string(),
    }
}

/// Text nodes whose whitespace is content.
fn keeps_whitespace(parent: &str) -> bool {
    matches!(parent, "w:t" | "w:delText" | "w:instrText" | "a:t")
}

fn convert(node: roxmltree::Node) -> Element {
    let tag = node.tag_name();
    let name = qualify(node, tag.namespace(), tag.name());
    let mut element = Element::new(&name);
    for a in node.attributes() {
        let key = qualify(node, a.namespace(), a.name());
        element.attributes.push((key, a.value().to_string()));
    }
    for child in node.children() {
        if child.is_element() {
            element.children.push(Content::Element(convert(child)));
        } else if child.is_text() {
            let Some(text) = child.text() else {
                continue;
            };
            if text.trim().is_empty() && !keeps_whitespace(&name) {
                continue;
            }
            element.children.push(Content::Text(text.to_string()));
        }
    }
    element
}

/// Parses an XML part into an owned fragment plus its namespace bindings.
pub fn parse(xml_content: &str) -> Result<(Element, Namespaces), Error> {
    let xml = roxmltree::Document::parse(xml_content)?;
    let mut namespaces = Namespaces::new();
    for node in xml.descendants().filter(|n| n.is_element()) {
        for ns in node.namespaces() {
            let Some(prefix) = ns.name() else {
                continue;
            };
            let prefix = canonical_prefix(ns.uri()).unwrap_or(prefix);
            if prefix != "xml" {
                namespaces.insert(prefix.to_string(), ns.uri().to_string());
            }
        }
    }
    Ok((convert(xml.root_element()), namespaces))
}

pub fn parse_tree(xml_content: &str) -> Result<(Tree, Namespaces), Error> {
    let (root, namespaces) = parse(xml_content)?;
    Ok((Tree::new(root), namespaces))
}

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn used_prefixes(tree: &Tree, out: &mut Namespaces) {
    let root = tree.root();
    for id in std::iter::once(root).chain(tree.descendants(root)) {
        let Some(name) = tree.name(id) else {
            continue;
        };
        let attrs = tree.attributes(id).iter().map(|(k, _)| k.as_str());
        for qname in std::iter::once(name).chain(attrs) {
            let Some((prefix, _)) = qname.split_once(':') else {
                continue;
            };
            if out.contains_key(prefix) {
                continue;
            }
            if let Some(uri) = canonical_uri(prefix) {
                out.insert(prefix.to_string(), uri.to_string());
            }
        }
    }
}

fn write_node(tree: &Tree, id: NodeId, out: &mut String, declarations: Option<&Namespaces>) {
    if let Some(text) = tree.text(id) {
        out.push_str(&escape_xml(text));
        return;
    }
    let Some(name) = tree.name(id) else {
        return;
    };
    let _ = write!(out, "<{name}");
    if let Some(namespaces) = declarations {
        for (prefix, uri) in namespaces {
            let _ = write!(out, " xmlns:{prefix}=\"{}\"", escape_xml(uri));
        }
    }
    for (key, value) in tree.attributes(id) {
        let _ = write!(out, " {key}=\"{}\"", escape_xml(value));
    }
    let children = tree.children(id);
    if children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in children {
        write_node(tree, *child, out, None);
    }
    let _ = write!(out, "</{name}>");
}

/// Serializes the tree as a standalone part, declaring every namespace on the
/// root element.
pub fn write_tree(tree: &Tree, namespaces: &Namespaces) -> String {
    let mut declarations = namespaces.clone();
    used_prefixes(tree, &mut declarations);
    let mut out =
        String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n");
    write_node(tree, tree.root(), &mut out, Some(&declarations));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_prefixes_are_canonicalized() {
        let xml = r#"<x:document xmlns:x="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <x:body><x:p><x:r><x:t xml:space="preserve"> a </x:t></x:r></x:p></x:body>
        </x:document>"#;
        let (root, namespaces) = parse(xml).unwrap();
        assert_eq!(root.name, "w:document");
        assert_eq!(namespaces.get("w").map(String::as_str), Some(WML_NS));
        let t = root.find_path(&["w:body", "w:p", "w:r", "w:t"]).unwrap();
        assert_eq!(t.attribute("xml:space"), Some("preserve"));
        assert_eq!(t.children, vec![Content::Text(" a ".into())]);
    }

    #[test]
    fn written_part_parses_back_identically() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>1 &lt; 2 &amp; "q"</w:t></w:r></w:p></w:body></w:document>"#;
        let (tree, namespaces) = parse_tree(xml).unwrap();
        let written = write_tree(&tree, &namespaces);
        let (again, _) = parse(&written).unwrap();
        assert_eq!(Some(again), tree.export(tree.root()));
    }

    #[test]
    fn used_prefixes_get_declared() {
        let tree = Tree::new(Element::new("w:document").child(Element::new("wp:inline")));
        let written = write_tree(&tree, &Namespaces::new());
        assert!(written.contains(&format!("xmlns:wp=\"{WPD_NS}\"")));
        assert!(written.contains(&format!("xmlns:w=\"{WML_NS}\"")));
    }
}
