//! Message validation engine (C6): checks a [`gmsec_message::Message`]
//! against its [`gmsec_schema::MessageTemplate`] and reports a [`Status`].
//!
//! Every field-level finding is aggregated rather than raised — construction
//! errors in `gmsec-spec-loader` are the only `Result::Err` surface this
//! system exposes to callers.

mod codes;
mod numeric;
mod status;
mod subject;
mod time;
mod validator;
mod violation;

pub use codes::ErrorCodes;
pub use status::Status;
pub use validator::validate;
pub use violation::{Severity, Violation};
