//! Runtime model for webhook API records.
//!
//! Every API payload is a record: a struct whose fields are required,
//! optional (`Option<T>`) or nullable ([`Nullable<T>`]). Records carry a
//! static field-classification table ([`RecordSchema`]) and move across the
//! JSON boundary through the [`codec`] functions, which keep the
//! absent / null / value distinction of nullable fields intact.

pub mod codec;
mod error;
mod nullable;
mod record;
mod schema;

pub use error::ModelError;
pub use nullable::Nullable;
pub use record::Record;
pub use schema::{FieldKind, FieldSpec, FieldState, RecordSchema};
