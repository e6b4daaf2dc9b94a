#[cfg(feature = "oas30")]
pub mod oas30;

use crate::oasprobe::OasProbeError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OASMajorVersion {
    #[cfg(feature = "oas30")]
    OAS30,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenApiError {
    #[error("could not determine the OpenAPI version: {0}")]
    Probe(#[from] OasProbeError),
    #[error("failed to parse the OpenAPI document: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("error while reading the OpenAPI document")]
    Io(#[from] std::io::Error),
    #[error("schema '{0}' not found in components")]
    UnknownSchema(String),
    #[error("schema '{0}' does not describe an object")]
    NotAnObject(String),
    #[error("reference '{0}' cannot be resolved")]
    UnresolvedReference(String),
}
