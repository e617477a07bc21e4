use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use gmsec_schema::SchemaEntry;

use crate::error::SpecError;

/// Parses a `DirectoryFile.xml` document into its `<SCHEMA>` rows.
///
/// Each `<SCHEMA>` element may carry several `LEVEL-<n>` attributes — one
/// `SchemaEntry` is emitted per such attribute, all sharing the element's
/// `NAME`/`DEFINITION`/`DESCRIPTION`, so that a single element can declare
/// the same schema ID's definition across several addendum levels.
pub fn parse_directory(path: &Path, configured_level: u8) -> Result<Vec<SchemaEntry>, SpecError> {
    let content = std::fs::read_to_string(path).map_err(|e| SpecError::TemplateDirError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut reader = Reader::from_str(&content);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) if elem_name(e) == "SCHEMA" => {
                entries.extend(parse_schema_element(e, path)?);
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

    validate_header_coverage(&entries, configured_level, path)?;
    Ok(entries)
}

fn parse_schema_element(e: &BytesStart, path: &Path) -> Result<Vec<SchemaEntry>, SpecError> {
    let name = get_attr(e, "NAME").ok_or_else(|| SpecError::schema_parse(
        path,
        "<SCHEMA> element missing required NAME attribute",
    ))?;
    let definition_raw = get_attr(e, "DEFINITION").ok_or_else(|| SpecError::schema_parse(
        path,
        format!("<SCHEMA NAME=\"{name}\"> missing required DEFINITION attribute"),
    ))?;
    let definition: Vec<String> = definition_raw
        .split('.')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let description = get_attr(e, "DESCRIPTION").unwrap_or_default();

    let mut entries = Vec::new();
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref()).unwrap_or("");
        let Some(level_str) = key.strip_prefix("LEVEL-") else {
            continue;
        };
        let level: u8 = level_str.parse().map_err(|_| {
            SpecError::schema_parse(
                path,
                format!("<SCHEMA NAME=\"{name}\"> has non-numeric level suffix in {key}"),
            )
        })?;
        let level_name = attr
            .unescape_value()
            .map_err(|e| SpecError::SchemaFailedToParse {
                path: path.to_path_buf(),
                message: e.to_string(),
                source: Some(e),
            })?
            .to_string();
        let mut entry = SchemaEntry::new(name.clone(), level, level_name, definition.clone());
        entry.description = description.clone();
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(SpecError::schema_parse(
            path,
            format!("<SCHEMA NAME=\"{name}\"> declares no LEVEL-n attribute"),
        ));
    }
    Ok(entries)
}

fn validate_header_coverage(
    entries: &[SchemaEntry],
    configured_level: u8,
    path: &Path,
) -> Result<(), SpecError> {
    for level in 0..=configured_level {
        let has_header = entries
            .iter()
            .any(|e| e.is_header() && e.level == level);
        if !has_header {
            return Err(SpecError::schema_parse(
                path,
                format!("no HEADER entry declared for level {level}"),
            ));
        }
    }
    Ok(())
}

fn elem_name(e: &BytesStart) -> String {
    std::str::from_utf8(e.name().as_ref()).unwrap_or("").to_string()
}

fn get_attr(e: &BytesStart, key: &str) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key.as_bytes())
        .and_then(|a| a.unescape_value().ok().map(|v| v.to_string()))
}
