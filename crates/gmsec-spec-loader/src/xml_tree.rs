use std::path::Path;

use indexmap::IndexMap;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::SpecError;

/// A minimal, fully-materialized XML element tree.
///
/// The XSD shapes this crate walks (`HEADER` complex types, `CONTENT`/
/// `SUBJECT` field lists, `api:dependency` attributes, CONTROL-field
/// `xs:sequence` references) nest conditionally enough that a tree beats a
/// hand-rolled streaming state machine for correctness — this is built once
/// per document with `quick_xml::Reader`, then walked with plain recursion.
#[derive(Debug, Clone)]
pub struct XmlNode {
    pub name: String,
    pub attrs: IndexMap<String, String>,
    pub children: Vec<XmlNode>,
    pub text: String,
}

impl XmlNode {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.local_name() == name)
    }

    pub fn child_named(&self, name: &str) -> Option<&XmlNode> {
        self.children_named(name).next()
    }

    /// Depth-first search for the first descendant (at any depth) with this local name.
    pub fn find_descendant(&self, name: &str) -> Option<&XmlNode> {
        for child in &self.children {
            if child.local_name() == name {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// Depth-first search for every descendant with this local name.
    pub fn find_descendants<'a>(&'a self, name: &'a str, out: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if child.local_name() == name {
                out.push(child);
            }
            child.find_descendants(name, out);
        }
    }
}

/// Parses a whole XML document into a single root [`XmlNode`].
pub fn parse_document(path: &Path) -> Result<XmlNode, SpecError> {
    let content = std::fs::read_to_string(path).map_err(|e| SpecError::TemplateDirError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_str(&content, path)
}

pub fn parse_str(content: &str, path: &Path) -> Result<XmlNode, SpecError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut root = XmlNode {
        name: "#document".to_string(),
        attrs: IndexMap::new(),
        children: Vec::new(),
        text: String::new(),
    };
    let mut stack: Vec<XmlNode> = vec![];
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(XmlNode {
                    name: qname(e),
                    attrs: attrs(e),
                    children: Vec::new(),
                    text: String::new(),
                });
            }
            Ok(Event::Empty(ref e)) => {
                let node = XmlNode {
                    name: qname(e),
                    attrs: attrs(e),
                    children: Vec::new(),
                    text: String::new(),
                };
                push_node(&mut stack, &mut root, node);
            }
            Ok(Event::Text(ref t)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&t.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(_)) => {
                if let Some(node) = stack.pop() {
                    push_node(&mut stack, &mut root, node);
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(SpecError::SchemaFailedToParse {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                    source: Some(err),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(root)
}

fn push_node(stack: &mut Vec<XmlNode>, root: &mut XmlNode, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.children.push(node),
    }
}

fn qname(e: &quick_xml::events::BytesStart) -> String {
    std::str::from_utf8(e.name().as_ref()).unwrap_or("").to_string()
}

fn attrs(e: &quick_xml::events::BytesStart) -> IndexMap<String, String> {
    e.attributes()
        .flatten()
        .filter_map(|a| {
            let key = std::str::from_utf8(a.key.as_ref()).ok()?.to_string();
            let value = a.unescape_value().ok()?.to_string();
            Some((key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_nested_elements_and_attributes() {
        let path = Path::new("test.xsd");
        let doc = parse_str(
            r#"<xs:schema><xs:element name="F" TYPE="I32"><xs:complexType/></xs:element></xs:schema>"#,
            path,
        )
        .unwrap();
        let schema = doc.child_named("schema").unwrap();
        let field = schema.child_named("element").unwrap();
        assert_eq!(field.attr("name"), Some("F"));
        assert_eq!(field.attr("TYPE"), Some("I32"));
    }

    #[test]
    fn test_find_descendant_searches_recursively() {
        let path = Path::new("test.xsd");
        let doc = parse_str(
            r#"<a><b><c name="x"/></b></a>"#,
            path,
        )
        .unwrap();
        let c = doc.find_descendant("c").unwrap();
        assert_eq!(c.attr("name"), Some("x"));
    }

    #[test]
    fn test_text_content_is_captured() {
        let path = Path::new("test.xsd");
        let doc = parse_str(r#"<a><b>hello</b></a>"#, path).unwrap();
        assert_eq!(doc.child_named("a").unwrap().child_named("b").unwrap().text, "hello");
    }
}
