//! Facade crate binding the schema directory loader (C1/C2/C5), the field
//! and message template model (C3/C4), the mutable message model (C7), and
//! the validation engine (C6) behind a single dependency.
//!
//! # Quick Start
//!
//! ```no_run
//! use gmsec_spec::{validate, Config, MessageFactory, Specification};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::new();
//! config
//!     .set("GMSEC-SCHEMA-PATH", "gmsec_messages")
//!     .set("GMSEC-MESSAGE-SPEC-VERSION", "201900")
//!     .set("GMSEC-SCHEMA-LEVEL", "0");
//!
//! let specification = Specification::load(&config)?;
//! let factory = MessageFactory::new(specification);
//!
//! let message = factory.create_message("MSG.LOG")?;
//! let status = validate(factory.specification(), &message);
//! if !status.is_ok() {
//!     eprintln!("invalid message: {status}");
//! }
//! # Ok(())
//! # }
//! ```

pub use gmsec_message::{
    from_json, from_xml, to_json, to_xml, validate_field_name, FieldError, Format, Message,
    MessageError, MessageFactory, Selector,
};
pub use gmsec_schema::{
    Dependency, DependencyPredicate, EffectiveFieldTemplate, FieldLookup, FieldTemplate,
    MessageTemplate, SchemaEntry, SubjectElement,
};
pub use gmsec_spec_loader::{Config, MessageSpecification, SpecError, Specification};
pub use gmsec_types::{Field, FieldClass, FieldMode, FieldValue, MessageKind, TypeTag};
pub use gmsec_validation::{validate, ErrorCodes, Severity, Status, Violation};
