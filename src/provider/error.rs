// ABOUTME: Provider error classification.
// ABOUTME: Maps AWS error codes onto the three failure kinds the controller distinguishes.

use thiserror::Error;

/// Errors returned by provider operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// A resource with the requested name already exists.
    #[error("resource already exists: {0}")]
    AlreadyExists(String),

    /// The provider rejected a request parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Anything else: network, credentials, throttling, unexpected service errors.
    #[error("provider request failed: {0}")]
    Transport(String),
}

impl ProviderError {
    pub fn is_already_exists(&self) -> bool {
        matches!(self, ProviderError::AlreadyExists(_))
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, ProviderError::InvalidParameter(_))
    }
}

/// Error codes for "already exists" conditions.
const ALREADY_EXISTS_CODES: &[&str] = &["AlreadyExists", "AlreadyExistsFault"];

/// Error codes for rejected parameters.
const INVALID_PARAMETER_CODES: &[&str] = &[
    "ValidationError",
    "InvalidParameter",
    "InvalidParameterValue",
    "InvalidParameterCombination",
    "InvalidConfigurationRequest",
];

/// Classify a provider error by its service error code.
pub fn classify_error_code(code: Option<&str>, message: Option<&str>) -> ProviderError {
    let message = message.unwrap_or("unknown error").to_string();

    match code {
        Some(c) if ALREADY_EXISTS_CODES.contains(&c) => ProviderError::AlreadyExists(message),
        Some(c) if INVALID_PARAMETER_CODES.contains(&c) => {
            ProviderError::InvalidParameter(message)
        }
        Some(c) => ProviderError::Transport(format!("{c}: {message}")),
        None => ProviderError::Transport(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_exists_codes() {
        for code in ALREADY_EXISTS_CODES {
            let err = classify_error_code(Some(code), Some("Launch configuration web-1a2b3c"));
            assert!(err.is_already_exists(), "Expected AlreadyExists for code: {code}");
        }
    }

    #[test]
    fn invalid_parameter_codes() {
        for code in INVALID_PARAMETER_CODES {
            let err = classify_error_code(Some(code), Some("bad"));
            assert!(
                err.is_invalid_parameter(),
                "Expected InvalidParameter for code: {code}"
            );
        }
    }

    #[test]
    fn unknown_codes_are_transport_errors() {
        let err = classify_error_code(Some("Throttling"), Some("Rate exceeded"));
        assert_eq!(
            err,
            ProviderError::Transport("Throttling: Rate exceeded".to_string())
        );

        let err = classify_error_code(None, None);
        assert_eq!(err, ProviderError::Transport("unknown error".to_string()));
    }
}
