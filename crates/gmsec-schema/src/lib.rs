//! Field template, dependency, and message template model for the GMSEC
//! schema tree.
//!
//! This crate defines the immutable records `Specification::load` produces:
//! [`FieldTemplate`] (one field's contract), [`Dependency`] (a conditional
//! override of that contract), [`MessageTemplate`] (a complete message's
//! field and subject-element list), [`SchemaEntry`] (one `DirectoryFile.xml`
//! row), and [`SubjectElement`] (one positional token of a subject string).

mod dependency;
mod field_template;
mod message_template;
mod schema_entry;
mod subject_element;

pub use dependency::{Dependency, DependencyPredicate};
pub use field_template::{EffectiveFieldTemplate, FieldLookup, FieldTemplate};
pub use message_template::MessageTemplate;
pub use schema_entry::SchemaEntry;
pub use subject_element::SubjectElement;
