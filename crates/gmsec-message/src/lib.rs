//! Mutable `Message`/`Field` model, schema-driven construction, and
//! XML/JSON serialization (C7).
//!
//! [`Message`] holds an insertion-ordered field map plus subject and kind
//! state; [`MessageFactory`] wraps a loaded `gmsec_spec_loader::Specification`
//! to pre-populate header fields from a schema ID (§4.5) and to parse
//! messages back from their serialized forms (§6).

mod coerce;
mod error;
mod factory;
mod json;
mod message;
mod selector;
mod xml;

pub use error::{FieldError, MessageError};
pub use factory::{Format, MessageFactory};
pub use json::{from_json, to_json};
pub use message::{validate_field_name, Message};
pub use selector::Selector;
pub use xml::{from_xml, to_xml};
