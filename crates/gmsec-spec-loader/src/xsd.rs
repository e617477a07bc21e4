use std::path::{Path, PathBuf};

use gmsec_schema::{Dependency, DependencyPredicate, FieldTemplate, SubjectElement};
use gmsec_types::{FieldClass, FieldMode, TypeTag};

use crate::error::SpecError;
use crate::xml_tree::{parse_document, XmlNode};

/// The result of walking one `*.xsd` template file.
pub struct ParsedXsd {
    pub short_id: String,
    pub is_header: bool,
    pub fields: Vec<FieldTemplate>,
    pub subject_elements: Vec<SubjectElement>,
}

/// Derives the short schema ID from a template filename: `<level>_<parts...>.xsd`
/// becomes `parts` joined with `.`, e.g. `C2MS_Msg_Log.xsd -> MSG.LOG`.
pub fn derive_short_id(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".xsd").unwrap_or(file_name);
    let mut parts = stem.split('_');
    parts.next(); // leading level token, discarded
    parts
        .map(|p| p.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(".")
}

/// Parses `path`, resolving `xs:include` into the same document set used
/// for enumeration and CONTROL-field-reference lookups.
pub fn parse_xsd_file(path: &Path) -> Result<ParsedXsd, SpecError> {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let short_id = derive_short_id(&file_name);

    let current = parse_document(path)?;
    let current_for_includes = current.clone();
    let mut documents = vec![current];
    load_includes(path, &current_for_includes, &mut documents)?;

    let schema = documents[0]
        .child_named("schema")
        .ok_or_else(|| SpecError::schema_parse(path, "missing <xs:schema> root"))?
        .clone();

    if let Some(header_type) = find_complex_type(&schema, "HEADER") {
        let fields = parse_field_container(header_type, &documents, path, &mut Vec::new())?;
        let subject_elements = schema
            .children_named("complexType")
            .nth(1)
            .map(|ct| parse_subject_elements(ct))
            .unwrap_or_default();
        return Ok(ParsedXsd {
            short_id,
            is_header: true,
            fields,
            subject_elements,
        });
    }

    let message_element = schema
        .children_named("element")
        .filter(|el| {
            el.child_named("complexType")
                .map(|ct| {
                    find_named_child(ct, "SUBJECT").is_some() && find_named_child(ct, "CONTENT").is_some()
                })
                .unwrap_or(false)
        })
        .last()
        .ok_or_else(|| {
            SpecError::schema_parse(path, "no top-level message <xs:element> with SUBJECT/CONTENT")
        })?;

    let complex_type = message_element
        .child_named("complexType")
        .ok_or_else(|| SpecError::schema_parse(path, "message element missing <xs:complexType>"))?;

    let subject_node = find_named_child(complex_type, "SUBJECT")
        .ok_or_else(|| SpecError::schema_parse(path, "message element missing SUBJECT"))?;
    let content_node = find_named_child(complex_type, "CONTENT")
        .ok_or_else(|| SpecError::schema_parse(path, "message element missing CONTENT"))?;

    let subject_elements = match subject_node.attr("type") {
        Some(type_name) => find_complex_type_in_docs(&documents, type_name)
            .map(parse_subject_elements)
            .unwrap_or_default(),
        None => subject_node
            .child_named("complexType")
            .map(parse_subject_elements)
            .unwrap_or_default(),
    };

    let content_type = match content_node.attr("type") {
        Some(type_name) => find_complex_type_in_docs(&documents, type_name)
            .ok_or_else(|| SpecError::schema_parse(path, format!("CONTENT type {type_name} not found")))?,
        None => content_node
            .child_named("complexType")
            .ok_or_else(|| SpecError::schema_parse(path, "CONTENT missing inline complexType"))?,
    };

    let fields = parse_field_container(content_type, &documents, path, &mut Vec::new())?;

    Ok(ParsedXsd {
        short_id,
        is_header: false,
        fields,
        subject_elements,
    })
}

fn load_includes(
    path: &Path,
    doc: &XmlNode,
    out: &mut Vec<XmlNode>,
) -> Result<(), SpecError> {
    let schema = match doc.child_named("schema") {
        Some(s) => s,
        None => return Ok(()),
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    for include in schema.children_named("include") {
        let Some(location) = include.attr("schemaLocation") else {
            continue;
        };
        let include_path: PathBuf = dir.join(location);
        let included_doc = parse_document(&include_path)?;
        load_includes(&include_path, &included_doc, out)?;
        out.push(included_doc);
    }
    Ok(())
}

/// Finds a top-level `<xs:complexType name="...">` directly under `schema`.
fn find_complex_type<'a>(schema: &'a XmlNode, name: &str) -> Option<&'a XmlNode> {
    schema
        .children_named("complexType")
        .find(|ct| ct.attr("name") == Some(name))
}

fn find_complex_type_in_docs<'a>(documents: &'a [XmlNode], name: &str) -> Option<&'a XmlNode> {
    documents.iter().find_map(|doc| {
        doc.child_named("schema")
            .and_then(|schema| find_complex_type(schema, name))
    })
}

fn find_named_child<'a>(complex_type: &'a XmlNode, name: &str) -> Option<&'a XmlNode> {
    let mut found = None;
    let mut stack = vec![complex_type];
    while let Some(node) = stack.pop() {
        for child in &node.children {
            if child.local_name() == "element" && child.attr("name") == Some(name) {
                found = Some(child);
                break;
            }
            stack.push(child);
        }
        if found.is_some() {
            break;
        }
    }
    found
}

/// Parses every `<xs:element>` under a complex type's `<xs:all>` into field templates.
fn parse_field_container(
    complex_type: &XmlNode,
    documents: &[XmlNode],
    path: &Path,
    ancestors: &mut Vec<String>,
) -> Result<Vec<FieldTemplate>, SpecError> {
    let all = complex_type
        .find_descendant("all")
        .ok_or_else(|| SpecError::schema_parse(path, "complex type missing <xs:all>"))?;

    let mut fields = Vec::new();
    for element in all.children_named("element") {
        fields.push(parse_field(element, documents, path, ancestors)?);
    }
    Ok(fields)
}

fn parse_field(
    element: &XmlNode,
    documents: &[XmlNode],
    path: &Path,
    ancestors: &mut Vec<String>,
) -> Result<FieldTemplate, SpecError> {
    let name = element
        .attr("name")
        .ok_or_else(|| SpecError::schema_parse(path, "field element missing name"))?
        .to_string();

    if ancestors.iter().any(|a| a.eq_ignore_ascii_case(&name)) {
        return Err(SpecError::schema_parse(
            path,
            format!("CONTROL field reference cycle detected at {name}"),
        ));
    }

    let complex_type = element.child_named("complexType");

    // CONTROL field: <xs:sequence><xs:element ref="RefName"/></xs:sequence>
    if let Some(ct) = complex_type {
        if let Some(sequence) = ct.find_descendant("sequence") {
            if let Some(reference) = sequence
                .children_named("element")
                .find_map(|e| e.attr("ref"))
            {
                ancestors.push(name.clone());
                let referenced = find_element_by_name(documents, reference)
                    .ok_or_else(|| {
                        SpecError::schema_parse(path, format!("CONTROL reference {reference} not found"))
                    })?;
                let ref_type = referenced.child_named("complexType").ok_or_else(|| {
                    SpecError::schema_parse(path, format!("{reference} missing <xs:complexType>"))
                })?;
                let children = parse_field_container(ref_type, documents, path, ancestors)?;
                ancestors.pop();

                let mut template =
                    FieldTemplate::new(name.clone(), FieldClass::Control, FieldMode::Required);
                template.prefix = ct
                    .attr("prefix")
                    .unwrap_or(&name)
                    .to_string();
                template.children = children;
                template.description = element.attr("description").unwrap_or_default().to_string();
                return Ok(template);
            }
        }
    }

    let class = FieldClass::Standard;
    let mode = if ct_has_attribute(complex_type, "TRACKING") {
        FieldMode::Tracking
    } else if element.attr("minOccurs") == Some("0") {
        FieldMode::Optional
    } else {
        FieldMode::Required
    };

    let mut template = FieldTemplate::new(name.clone(), class, mode);
    template.description = element.attr("description").unwrap_or_default().to_string();

    let extension = complex_type.and_then(|ct| ct.find_descendant("extension"));
    if let Some(ext) = extension {
        template.types = resolve_types(ext, documents);
        template.values = resolve_base_enumeration(ext, documents);
        template.pattern = resolve_base_pattern(ext, &documents[0]);
    }

    template.dependencies = complex_type
        .map(|ct| parse_dependencies(ct, documents))
        .unwrap_or_default();

    Ok(template)
}

fn ct_has_attribute(complex_type: Option<&XmlNode>, attr_name: &str) -> bool {
    complex_type
        .map(|ct| {
            let mut out = Vec::new();
            ct.find_descendants("attribute", &mut out);
            out.iter().any(|a| a.attr("name") == Some(attr_name))
        })
        .unwrap_or(false)
}

/// Resolves the TYPE attribute of a `simpleContent/extension`: a `fixed`
/// value names a single type directly; otherwise its `type` attribute names
/// a simpleType whose enumeration lists permitted type names.
fn resolve_types(extension: &XmlNode, documents: &[XmlNode]) -> Vec<TypeTag> {
    let mut out = Vec::new();
    let mut attrs = Vec::new();
    extension.find_descendants("attribute", &mut attrs);
    let Some(type_attr) = attrs.into_iter().find(|a| a.attr("name") == Some("TYPE")) else {
        return out;
    };
    if let Some(fixed) = type_attr.attr("fixed") {
        if let Some(tag) = TypeTag::parse(fixed) {
            out.push(tag);
        }
        return out;
    }
    if let Some(type_name) = type_attr.attr("type") {
        if let Some(simple_type) = find_simple_type_in_docs(documents, type_name) {
            for value in simple_type_enumeration(simple_type) {
                if let Some(tag) = TypeTag::parse(&value) {
                    out.push(tag);
                }
            }
        }
    }
    out
}

/// Resolves the `base` attribute of `simpleContent/extension`: when it
/// names a custom simpleType (not an `xs:` scalar), that type's
/// enumeration gives the field's legal values.
fn resolve_base_enumeration(extension: &XmlNode, documents: &[XmlNode]) -> Vec<String> {
    let Some(base) = extension.attr("base") else {
        return Vec::new();
    };
    if base.starts_with("xs:") {
        return Vec::new();
    }
    find_simple_type_in_docs(documents, base)
        .map(simple_type_enumeration)
        .unwrap_or_default()
}

/// Resolves a `<xs:pattern>` restriction on the `base` simpleType, searched
/// only in the current document (not included documents — see the
/// documented enumeration/pattern asymmetry).
fn resolve_base_pattern(extension: &XmlNode, current_doc: &XmlNode) -> Option<String> {
    let base = extension.attr("base")?;
    if base.starts_with("xs:") {
        return None;
    }
    let schema = current_doc.child_named("schema")?;
    let simple_type = schema
        .children_named("simpleType")
        .find(|st| st.attr("name") == Some(base))?;
    let restriction = simple_type.child_named("restriction")?;
    restriction.child_named("pattern")?.attr("value").map(str::to_string)
}

fn simple_type_enumeration(simple_type: &XmlNode) -> Vec<String> {
    simple_type
        .child_named("restriction")
        .map(|r| {
            r.children_named("enumeration")
                .filter_map(|e| e.attr("value").map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn find_simple_type_in_docs<'a>(documents: &'a [XmlNode], name: &str) -> Option<&'a XmlNode> {
    documents.iter().find_map(|doc| {
        doc.child_named("schema")
            .and_then(|schema| schema.children_named("simpleType").find(|st| st.attr("name") == Some(name)))
    })
}

fn find_element_by_name<'a>(documents: &'a [XmlNode], name: &str) -> Option<&'a XmlNode> {
    documents.iter().find_map(|doc| {
        let mut out = Vec::new();
        doc.find_descendants("element", &mut out);
        out.into_iter().find(|e| e.attr("name") == Some(name))
    })
}

fn parse_dependencies(complex_type: &XmlNode, documents: &[XmlNode]) -> Vec<Dependency> {
    let mut nodes = Vec::new();
    complex_type.find_descendants("dependency", &mut nodes);
    nodes
        .into_iter()
        .filter_map(|dep| {
            let name = dep.attr("name")?.to_string();
            let predicate = if let Some(v) = dep.attr("valueEquals") {
                DependencyPredicate::EqualsValue(v.to_string())
            } else if let Some(v) = dep.attr("valueGreaterThan") {
                DependencyPredicate::GreaterThan(v.parse().ok()?)
            } else if let Some(v) = dep.attr("valueLessThan") {
                DependencyPredicate::LessThan(v.parse().ok()?)
            } else {
                return None;
            };
            let mut d = Dependency::new(name, predicate);
            d.mode_override = match dep.attr("use") {
                Some("REQUIRED") => Some(FieldMode::Required),
                Some("OPTIONAL") => Some(FieldMode::Optional),
                _ => None,
            };
            if let Some(type_name) = dep.attr("type") {
                if let Some(simple_type) = find_simple_type_in_docs(documents, type_name) {
                    d.types_override = simple_type_enumeration(simple_type)
                        .iter()
                        .filter_map(|v| TypeTag::parse(v))
                        .collect();
                }
            }
            if let Some(base_name) = dep.attr("base") {
                if let Some(simple_type) = find_simple_type_in_docs(documents, base_name) {
                    d.values_override = simple_type_enumeration(simple_type);
                }
            }
            Some(d)
        })
        .collect()
}

fn parse_subject_elements(complex_type: &XmlNode) -> Vec<SubjectElement> {
    complex_type
        .children_named("element")
        .map(|e| {
            let name = e.attr("name").unwrap_or_default().to_string();
            let optional = e.attr("minOccurs") == Some("0");
            let default_value = e.attr("fixed").unwrap_or_default().to_string();
            let raw = if optional && !default_value.starts_with('!') {
                format!("!{default_value}")
            } else {
                default_value
            };
            SubjectElement::new(name, raw)
        })
        .collect()
}
