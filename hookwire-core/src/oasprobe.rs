use lazy_static::lazy_static;
use regex::Regex;

use crate::adapters::OASMajorVersion;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OasProbeError {
    #[error("no OAS version declaration found in input")]
    NoVersionFound,
    #[error("unsupported OAS version '{0}'")]
    UnsupportedVersion(String),
}

lazy_static! {
    // matches both `openapi: 3.0.3` (YAML) and `"openapi": "3.0.3"` (JSON)
    static ref OAS_VERSION: Regex =
        Regex::new(r#"^\s*[{,]?\s*"?openapi"?\s*:\s*['"]?((\d+\.\d+)\.\d+)"#).unwrap();
}

const MAX_PROBE_LINES: usize = 5;

/// Looks for the `openapi` version declaration within the first few
/// non-empty lines of a document.
pub(crate) fn probe_oas_version(input: &str) -> Result<OASMajorVersion, OasProbeError> {
    let lines = input
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(MAX_PROBE_LINES);

    for line in lines {
        let Some(captures) = OAS_VERSION.captures(line) else {
            continue;
        };
        let full_version = &captures[1];
        return match &captures[2] {
            #[cfg(feature = "oas30")]
            "3.0" => Ok(OASMajorVersion::OAS30),
            _ => Err(OasProbeError::UnsupportedVersion(full_version.to_string())),
        };
    }

    Err(OasProbeError::NoVersionFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_yaml() {
        let input = r"
            # leading comment
            openapi: 3.0.3
            ";
        assert_eq!(Ok(OASMajorVersion::OAS30), probe_oas_version(input));
    }

    #[test]
    fn test_match_json() {
        let input = r#"{
            "openapi": "3.0.2",
            "info": {}
        }"#;
        assert_eq!(Ok(OASMajorVersion::OAS30), probe_oas_version(input));
    }

    #[test]
    fn test_unsupported_version() {
        assert_eq!(
            Err(OasProbeError::UnsupportedVersion("3.1.0".to_string())),
            probe_oas_version("openapi: 3.1.0\n")
        );
    }

    #[test]
    fn test_not_found() {
        let input = "a: 1\nb: 2\nc: 3\nd: 4\ne: 5\nopenapi: 3.0.0\n";
        assert_eq!(Err(OasProbeError::NoVersionFound), probe_oas_version(input));
        assert_eq!(Err(OasProbeError::NoVersionFound), probe_oas_version(""));
    }
}
