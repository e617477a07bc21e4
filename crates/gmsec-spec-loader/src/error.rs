use std::path::PathBuf;

/// `SPECIFICATION_ERROR`-class failures raised while loading a template
/// directory or resolving a schema ID against it.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("template directory not found: {0}")]
    TemplateDirNotFound(PathBuf),

    #[error("template directory error in {path}: {message}")]
    TemplateDirError { path: PathBuf, message: String },

    #[error("failed to parse schema {path}: {message}")]
    SchemaFailedToParse {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<quick_xml::Error>,
    },

    #[error("invalid value for config key {key}: {value}")]
    InvalidConfigValue { key: String, value: String },

    #[error("no template exists for schema ID {0}")]
    TemplateIdDoesNotExist(String),
}

impl SpecError {
    /// The stable machine code within the `SPECIFICATION_ERROR` class.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TemplateDirNotFound(_) => "TEMPLATE_DIR_NOT_FOUND",
            Self::TemplateDirError { .. } => "TEMPLATE_DIR_ERROR",
            Self::SchemaFailedToParse { .. } => "SCHEMA_FAILED_TO_PARSE",
            Self::InvalidConfigValue { .. } => "INVALID_CONFIG_VALUE",
            Self::TemplateIdDoesNotExist(_) => "TEMPLATE_ID_DOES_NOT_EXIST",
        }
    }

    pub fn class(&self) -> &'static str {
        "SPECIFICATION_ERROR"
    }

    pub fn schema_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SchemaFailedToParse {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }
}
