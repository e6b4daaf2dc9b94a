use serde::{Serialize, de::DeserializeOwned};

use crate::{
    codec,
    error::ModelError,
    schema::{FieldState, RecordSchema},
};

/// A structured API payload with a static field-classification table.
///
/// Implemented by the `#[record]` attribute; the provided methods are the
/// table-driven operations shared by every record type.
pub trait Record: Serialize + DeserializeOwned {
    const SCHEMA: RecordSchema;

    /// The state of the field with the given JSON key, or `None` if the
    /// record has no such field.
    fn field_state(&self, key: &str) -> Option<FieldState>;

    /// An instance carrying only declared defaults.
    fn with_defaults() -> Self;

    /// JSON keys that [`Record::encode`] will write, in table order.
    fn present_keys(&self) -> Vec<&'static str> {
        Self::SCHEMA
            .fields
            .iter()
            .filter(|f| self.field_state(f.key).is_some_and(|s| s.is_present()))
            .map(|f| f.key)
            .collect()
    }

    fn encode(&self) -> Result<Vec<u8>, ModelError> {
        codec::encode(self)
    }

    fn encode_to_string(&self) -> Result<String, ModelError> {
        codec::encode_to_string(self)
    }

    fn to_value(&self) -> Result<serde_json::Value, ModelError> {
        codec::to_value(self)
    }

    fn decode(bytes: &[u8]) -> Result<Self, ModelError> {
        codec::decode(bytes)
    }

    fn decode_str(s: &str) -> Result<Self, ModelError> {
        codec::decode_str(s)
    }

    fn from_value(value: serde_json::Value) -> Result<Self, ModelError> {
        codec::from_value(value)
    }
}
