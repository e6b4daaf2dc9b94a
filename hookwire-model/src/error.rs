/// Errors produced while moving records across the JSON boundary.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The input does not have the shape of the expected record: invalid
    /// JSON, a value of the wrong type, or a missing required key.
    #[error("malformed input for '{record}': {source}")]
    MalformedInput {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode '{record}': {source}")]
    Encode {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ModelError {
    /// Name of the record type the error occurred for.
    pub fn record(&self) -> &'static str {
        match self {
            ModelError::MalformedInput { record, .. } | ModelError::Encode { record, .. } => {
                record
            }
        }
    }

    pub(crate) fn malformed(record: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| ModelError::MalformedInput { record, source }
    }

    pub(crate) fn encode(record: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| ModelError::Encode { record, source }
    }
}
