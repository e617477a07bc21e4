//! Shared GMSEC primitive types.
//!
//! This crate defines the core scalar value model used across the schema
//! loader, validation engine, and message model. It has zero external
//! dependencies.
//!
//! # Types
//!
//! - [`TypeTag`] — the GMSEC scalar type set, plus the pseudo-types used in templates
//! - [`FieldValue`] — a concrete typed value
//! - [`Field`] — a named value with header/tracking flags
//! - [`FieldClass`] — HEADER / STANDARD / CONTROL
//! - [`FieldMode`] — REQUIRED / OPTIONAL / TRACKING
//! - [`MessageKind`] — PUBLISH / REQUEST / REPLY

mod class;
mod field;
mod kind;
mod mode;
mod type_tag;

pub use class::FieldClass;
pub use field::{Field, FieldValue};
pub use kind::MessageKind;
pub use mode::FieldMode;
pub use type_tag::TypeTag;
