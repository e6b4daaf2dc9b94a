//! Tri-state JSON records for webhook API payloads.
//!
//! A field of a `#[record]` struct is required, optional (`Option<T>`) or
//! nullable ([`Nullable<T>`]). Nullable fields keep apart a key that was
//! never sent, a key sent as `null` and a key carrying a value, and encode
//! back exactly what they hold.
//!
//! ```
//! use hookwire::{Nullable, Record, record};
//!
//! #[record]
//! #[derive(Debug)]
//! pub struct EventTypeUpdate {
//!     pub description: String,
//!     pub feature_flag: Nullable<String>,
//! }
//!
//! let update = EventTypeUpdate::decode_str(r#"{"description":"d","featureFlag":null}"#)?;
//! assert!(update.feature_flag.is_set() && update.feature_flag.is_null());
//! assert_eq!(r#"{"description":"d","featureFlag":null}"#, update.encode_to_string()?);
//! # Ok::<(), hookwire::ModelError>(())
//! ```

pub use hookwire_macro::record;
pub use hookwire_model::*;

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}
