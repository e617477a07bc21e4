//! Schema directory and XSD template loader.
//!
//! Builds a [`Specification`] from a `<SchemaPath>/YYYY.MM/` template
//! directory tree: [`directory`] parses `DirectoryFile.xml` (C1), [`xsd`]
//! walks each `*.xsd` template file (C2), and [`Specification`] (C5) owns
//! the resulting templates and header field lists.

mod config;
mod directory;
mod error;
mod specification;
mod xml_tree;
mod xsd;

pub use config::Config;
pub use directory::parse_directory;
pub use error::SpecError;
pub use specification::{MessageSpecification, Specification};
pub use xsd::{derive_short_id, parse_xsd_file, ParsedXsd};
