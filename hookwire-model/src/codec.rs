//! JSON encode/decode entry points for records.
//!
//! Field presence is decided by the serde attributes `#[record]` puts on
//! each field; these functions only pick the serde_json entry point and
//! attach the record name to errors.

use crate::{error::ModelError, nullable::Nullable, record::Record};

pub fn encode<R: Record>(record: &R) -> Result<Vec<u8>, ModelError> {
    serde_json::to_vec(record).map_err(ModelError::encode(R::SCHEMA.name))
}

pub fn encode_to_string<R: Record>(record: &R) -> Result<String, ModelError> {
    serde_json::to_string(record).map_err(ModelError::encode(R::SCHEMA.name))
}

pub fn to_value<R: Record>(record: &R) -> Result<serde_json::Value, ModelError> {
    serde_json::to_value(record).map_err(ModelError::encode(R::SCHEMA.name))
}

pub fn decode<R: Record>(bytes: &[u8]) -> Result<R, ModelError> {
    serde_json::from_slice(bytes).map_err(ModelError::malformed(R::SCHEMA.name))
}

pub fn decode_str<R: Record>(s: &str) -> Result<R, ModelError> {
    serde_json::from_str(s).map_err(ModelError::malformed(R::SCHEMA.name))
}

pub fn from_value<R: Record>(value: serde_json::Value) -> Result<R, ModelError> {
    serde_json::from_value(value).map_err(ModelError::malformed(R::SCHEMA.name))
}

/// Decodes a whole record that may itself be `null`.
///
/// A top-level document is always present, so the result is never absent.
pub fn decode_nullable<R: Record>(bytes: &[u8]) -> Result<Nullable<R>, ModelError> {
    serde_json::from_slice(bytes).map_err(ModelError::malformed(R::SCHEMA.name))
}

/// Encodes a nullable record; an absent or null wrapper encodes as `null`.
pub fn encode_nullable<R: Record>(record: &Nullable<R>) -> Result<Vec<u8>, ModelError> {
    serde_json::to_vec(record).map_err(ModelError::encode(R::SCHEMA.name))
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;
    use crate::schema::{FieldKind, FieldSpec, FieldState, RecordSchema};

    // written out the way `#[record]` expands a struct
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct EventTypeUpdate {
        #[serde(rename = "archived", default, skip_serializing_if = "Option::is_none")]
        archived: Option<bool>,
        #[serde(rename = "description")]
        description: String,
        #[serde(rename = "featureFlag", default, skip_serializing_if = "Nullable::is_unset")]
        feature_flag: Nullable<String>,
    }

    impl Record for EventTypeUpdate {
        const SCHEMA: RecordSchema = RecordSchema {
            name: "EventTypeUpdate",
            fields: &[
                FieldSpec {
                    name: "archived",
                    key: "archived",
                    kind: FieldKind::Optional,
                    default: Some("false"),
                },
                FieldSpec {
                    name: "description",
                    key: "description",
                    kind: FieldKind::Required,
                    default: None,
                },
                FieldSpec {
                    name: "feature_flag",
                    key: "featureFlag",
                    kind: FieldKind::Nullable,
                    default: None,
                },
            ],
        };

        fn field_state(&self, key: &str) -> Option<FieldState> {
            match key {
                "archived" => Some(FieldState::of_option(&self.archived)),
                "description" => Some(FieldState::Value),
                "featureFlag" => Some(self.feature_flag.state()),
                _ => None,
            }
        }

        fn with_defaults() -> Self {
            EventTypeUpdate {
                archived: Some(false),
                description: String::new(),
                feature_flag: Nullable::absent(),
            }
        }
    }

    #[test]
    fn test_present_keys() {
        let mut r = EventTypeUpdate::with_defaults();
        assert_eq!(vec!["archived", "description"], r.present_keys());
        r.archived = None;
        r.feature_flag.set_nil();
        assert_eq!(vec!["description", "featureFlag"], r.present_keys());
        assert_eq!(None, r.field_state("nope"));
    }

    #[test]
    fn test_decode_missing_key_stays_absent() -> anyhow::Result<()> {
        let r: EventTypeUpdate = decode(br#"{"description":"d"}"#)?;
        assert_eq!("d", r.description);
        assert!(r.feature_flag.is_unset());
        assert_eq!(None, r.archived);
        Ok(())
    }

    #[test]
    fn test_encode_null_and_value() -> anyhow::Result<()> {
        let mut r = EventTypeUpdate::with_defaults();
        r.archived = None;
        r.feature_flag.set_nil();
        assert_eq!(
            json!({ "description": "", "featureFlag": null }),
            to_value(&r)?
        );
        r.feature_flag.set_value("beta".to_string());
        assert_eq!(
            r#"{"description":"","featureFlag":"beta"}"#,
            encode_to_string(&r)?
        );
        Ok(())
    }

    #[test]
    fn test_malformed_input() {
        let err = decode::<EventTypeUpdate>(br#"{"description":5}"#).unwrap_err();
        assert!(matches!(err, ModelError::MalformedInput { .. }));
        assert_eq!("EventTypeUpdate", err.record());

        let err = decode_str::<EventTypeUpdate>("{").unwrap_err();
        assert!(matches!(err, ModelError::MalformedInput { .. }));

        let err = from_value::<EventTypeUpdate>(json!({ "featureFlag": "x" })).unwrap_err();
        assert!(err.to_string().contains("description"), "{err}");
    }

    #[test]
    fn test_nullable_record() -> anyhow::Result<()> {
        let r = decode_nullable::<EventTypeUpdate>(b"null")?;
        assert!(r.is_null());
        assert_eq!(b"null".to_vec(), encode_nullable(&r)?);

        let r = decode_nullable::<EventTypeUpdate>(br#"{"description":"d"}"#)?;
        assert_eq!("d", r.get().unwrap().description);
        Ok(())
    }
}
