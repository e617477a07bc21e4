use std::path::{Path, PathBuf};
use std::sync::Mutex;

use indexmap::IndexMap;

use gmsec_schema::{FieldTemplate, MessageTemplate, SchemaEntry};

use crate::config::Config;
use crate::directory::parse_directory;
use crate::error::SpecError;
use crate::xsd::parse_xsd_file;

/// Serializes concurrent `Specification::load` calls against the
/// filesystem — the only shared mutable state the core owns (§5).
static LOAD_MUTEX: Mutex<()> = Mutex::new(());

const DEFAULT_VERSION: u32 = 201900;

/// One stored field-spec/subject snapshot, as returned by
/// [`Specification::get_message_specifications`].
#[derive(Debug, Clone)]
pub struct MessageSpecification {
    pub schema_id: String,
    pub subject_template: Vec<String>,
    pub field_specs: Vec<FieldTemplate>,
}

/// Orchestrator owning the schema directory, the short/full ID → template
/// map, the level-name → header-field-list map, and the configured level
/// ceiling.
#[derive(Debug, Clone)]
pub struct Specification {
    pub version: u32,
    pub schema_level: u8,
    templates: IndexMap<String, MessageTemplate>,
    headers: IndexMap<String, Vec<FieldTemplate>>,
    directory: Vec<SchemaEntry>,
}

impl Specification {
    /// Loads a `Specification` from the template directory tree named by
    /// `config`. See SPEC_FULL.md §4.5/§6 for the recognized keys.
    pub fn load(config: &Config) -> Result<Self, SpecError> {
        let _guard = LOAD_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let schema_path = config.get_or("GMSEC-SCHEMA-PATH", "gmsec_messages");
        tracing::debug!(schema_path, "loading specification template directory");
        let version = config.get_i32("GMSEC-MESSAGE-SPEC-VERSION", DEFAULT_VERSION as i32)? as u32;
        let schema_level = config.get_i32("GMSEC-SCHEMA-LEVEL", 0)?;
        if !(0..=6).contains(&schema_level) {
            return Err(SpecError::InvalidConfigValue {
                key: "GMSEC-SCHEMA-LEVEL".to_string(),
                value: schema_level.to_string(),
            });
        }
        let schema_level = schema_level as u8;

        let year = version / 100;
        let month = version % 100;
        let template_dir = Path::new(schema_path).join(format!("{year:04}.{month:02}"));

        if !template_dir.is_dir() {
            return Err(SpecError::TemplateDirNotFound(template_dir));
        }

        let directory_path = find_directory_file(&template_dir)?;
        tracing::debug!(path = %directory_path.display(), "parsing DirectoryFile.xml");
        let directory = parse_directory(&directory_path, schema_level)?;

        let mut spec = Specification {
            version,
            schema_level,
            templates: IndexMap::new(),
            headers: IndexMap::new(),
            directory,
        };

        let entries = std::fs::read_dir(&template_dir).map_err(|e| SpecError::TemplateDirError {
            path: template_dir.clone(),
            message: e.to_string(),
        })?;

        let mut xsd_paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("xsd"))
            .collect();
        xsd_paths.sort();

        for path in xsd_paths {
            let span = tracing::debug_span!("load_xsd_file", path = %path.display());
            let _enter = span.enter();

            let parsed = parse_xsd_file(&path)?;
            let Some(entry) = spec.directory_entry_for(&parsed.short_id, schema_level) else {
                tracing::warn!(schema_id = %parsed.short_id, "no directory entry at or below the configured level, skipping");
                continue; // not declared at or below the configured level: skip entirely
            };
            let level = entry.level;
            let level_name = entry.level_name.clone();
            tracing::debug!(schema_id = %parsed.short_id, level, level_name = %level_name, "loaded template");

            if parsed.is_header {
                spec.headers.insert(level_name.clone(), parsed.fields.clone());
                if level == schema_level {
                    spec.headers.insert("DEFAULT".to_string(), parsed.fields);
                }
                continue;
            }

            let full_id = format!("{year:04}.{month:02}.{level_name}.{}", parsed.short_id);
            if spec.templates.contains_key(&full_id) {
                return Err(SpecError::TemplateDirError {
                    path: path.clone(),
                    message: format!("duplicate full schema ID {full_id}"),
                });
            }

            let mut template = MessageTemplate::new(full_id.clone(), level);
            template.fields = parsed.fields;
            template.subject_elements = parsed.subject_elements;
            template.definition = entry.definition.join(".");

            let replace_short = match spec.templates.get(&parsed.short_id) {
                Some(existing) => level <= schema_level && level >= existing.schema_level,
                None => level <= schema_level,
            };
            if replace_short {
                spec.templates.insert(parsed.short_id.clone(), template.clone());
            }
            spec.templates.insert(full_id, template);
        }

        Ok(spec)
    }

    fn directory_entry_for(&self, short_id: &str, max_level: u8) -> Option<&SchemaEntry> {
        self.directory
            .iter()
            .filter(|e| e.id == short_id && e.level <= max_level)
            .max_by_key(|e| e.level)
    }

    /// Exact match first, then progressively strips trailing `.TOKEN`
    /// segments (stopping with at least two segments left) and retries.
    pub fn find_template(&self, schema_id: &str) -> Result<&MessageTemplate, SpecError> {
        if schema_id.is_empty() {
            return Err(SpecError::TemplateIdDoesNotExist(schema_id.to_string()));
        }
        if let Some(t) = self.templates.get(schema_id) {
            return Ok(t);
        }
        let mut segments: Vec<&str> = schema_id.split('.').collect();
        while segments.len() > 2 {
            segments.pop();
            let candidate = segments.join(".");
            if let Some(t) = self.templates.get(&candidate) {
                return Ok(t);
            }
        }
        Err(SpecError::TemplateIdDoesNotExist(schema_id.to_string()))
    }

    /// Extends `name` in place with successive key-field values read from
    /// `lookup`, walking the directory from `level` outward. Returns
    /// whether at least one specialization was applied.
    pub fn find_definition<L>(&self, level: u8, name: &mut String, lookup: &L) -> bool
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut extended = false;
        let mut current_level = level;
        loop {
            let Some(entry) = self.directory_entry_for(name, current_level) else {
                break;
            };
            let mut next = name.clone();
            let mut specialized = false;
            for key_field in &entry.definition {
                let Some(value) = lookup(key_field) else {
                    break;
                };
                next.push('.');
                next.push_str(&value);
                specialized = true;
            }
            if !specialized || next == *name {
                break;
            }
            *name = next;
            extended = true;
            if current_level == 0 {
                break;
            }
            current_level -= 1;
        }
        extended
    }

    /// Header field names for `schema_name`'s level, falling back to `DEFAULT`.
    pub fn header_field_names(&self, schema_name: &str) -> Vec<&str> {
        self.header_fields_for(schema_name)
            .iter()
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Header field templates for `schema_name`'s level, falling back to `DEFAULT`.
    pub fn header_fields_for(&self, schema_name: &str) -> &[FieldTemplate] {
        let level_name = self
            .directory
            .iter()
            .find(|e| e.id == schema_name)
            .map(|e| e.level_name.as_str());
        level_name
            .and_then(|ln| self.headers.get(ln))
            .or_else(|| self.headers.get("DEFAULT"))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn headers_for_level_name(&self, level_name: &str) -> Option<&[FieldTemplate]> {
        self.headers.get(level_name).map(Vec::as_slice)
    }

    pub fn default_headers(&self) -> Option<&[FieldTemplate]> {
        self.headers.get("DEFAULT").map(Vec::as_slice)
    }

    /// Snapshot of every stored short-ID template (full-ID duplicates suppressed).
    pub fn get_message_specifications(&self) -> Vec<MessageSpecification> {
        self.directory
            .iter()
            .filter(|e| !e.is_header())
            .filter_map(|e| self.templates.get(&e.id))
            .map(|t| MessageSpecification {
                schema_id: t.schema_id.clone(),
                subject_template: t.subject_elements.iter().map(|s| s.name.clone()).collect(),
                field_specs: t.fields.clone(),
            })
            .collect()
    }

    /// Lazy, restartable iteration over every stored schema ID (insertion order).
    pub fn schema_id_iterator(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn directory(&self) -> &[SchemaEntry] {
        &self.directory
    }
}

fn find_directory_file(template_dir: &Path) -> Result<PathBuf, SpecError> {
    let visible = template_dir.join("DirectoryFile.xml");
    if visible.is_file() {
        return Ok(visible);
    }
    let hidden = template_dir.join(".DirectoryFile.xml");
    if hidden.is_file() {
        return Ok(hidden);
    }
    Err(SpecError::TemplateDirError {
        path: template_dir.to_path_buf(),
        message: "no DirectoryFile.xml (or .DirectoryFile.xml) found".to_string(),
    })
}
