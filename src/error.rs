/*!
 * Error Handling for the QaSa GCM Engine
 *
 * Provides typed error values with numeric error codes, user-friendly
 * messages and suggested remediation strategies.
 */

use std::collections::HashMap;
use thiserror::Error;

/// Error type for all GCM engine operations
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key length: expected {expected} - got {actual} bytes")]
    InvalidKeyLength {
        expected: String,
        actual: usize,
        error_code: u32,
    },

    #[error("Invalid state: {operation} is not permitted while {state}")]
    InvalidState {
        operation: String,
        state: String,
        error_code: u32,
    },

    #[error("Invalid tag length: expected 4 to 16 bytes - got {actual} bytes")]
    InvalidTagLength { actual: usize, error_code: u32 },

    #[error("Authentication failed: {operation}")]
    AuthenticationFailure { operation: String, error_code: u32 },

    #[error("Invalid parameter: {parameter} - {expected} - got {actual}")]
    InvalidParameter {
        parameter: String,
        expected: String,
        actual: String,
        error_code: u32,
    },

    #[error("Resource exhaustion: {resource} - {limit}")]
    ResourceExhaustion {
        resource: String,
        limit: String,
        error_code: u32,
    },

    #[error("Self-test failed: {case} - {details}")]
    SelfTestFailure {
        case: String,
        details: String,
        error_code: u32,
    },

    #[error("Side-channel violation in {test_name}: {details}")]
    SideChannelViolation {
        test_name: String,
        details: String,
        error_code: u32,
    },
}

/// Error code constants for different error categories
pub mod error_codes {
    // GCM errors: 3000-3999
    pub const GCM_INVALID_KEY_SIZE: u32 = 3003;
    pub const GCM_INVALID_IV_SIZE: u32 = 3004;
    pub const GCM_AUTHENTICATION_FAILED: u32 = 3005;
    pub const GCM_INVALID_TAG_SIZE: u32 = 3006;
    pub const GCM_STATE_INVALID: u32 = 3007;
    pub const GCM_AAD_TOO_LONG: u32 = 3008;
    pub const GCM_MESSAGE_TOO_LONG: u32 = 3009;
    pub const GCM_LENGTH_OVERFLOW: u32 = 3010;
    pub const GCM_BUFFER_MISMATCH: u32 = 3011;

    // Self-test errors: 5000-5999
    pub const SELF_TEST_FAILED: u32 = 5006;

    // Side-channel errors: 6000-6999
    pub const SIDE_CHANNEL_LEAK: u32 = 6001;

    pub const INVALID_PARAMETER: u32 = 9999;
}

impl CryptoError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            CryptoError::InvalidKeyLength { error_code, .. } => *error_code,
            CryptoError::InvalidState { error_code, .. } => *error_code,
            CryptoError::InvalidTagLength { error_code, .. } => *error_code,
            CryptoError::AuthenticationFailure { error_code, .. } => *error_code,
            CryptoError::InvalidParameter { error_code, .. } => *error_code,
            CryptoError::ResourceExhaustion { error_code, .. } => *error_code,
            CryptoError::SelfTestFailure { error_code, .. } => *error_code,
            CryptoError::SideChannelViolation { error_code, .. } => *error_code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_friendly_message(&self) -> String {
        match self {
            CryptoError::InvalidKeyLength { actual, .. } => format!(
                "A {}-byte key was supplied. AES-GCM keys must be 16, 24 or 32 bytes long.",
                actual
            ),
            CryptoError::InvalidState {
                operation, state, ..
            } => format!(
                "The GCM context cannot perform '{}' while {}. Check the call sequence.",
                operation, state
            ),
            CryptoError::InvalidTagLength { actual, .. } => format!(
                "A {}-byte authentication tag is not supported. Use between 4 and 16 bytes.",
                actual
            ),
            CryptoError::AuthenticationFailure { .. } => {
                "Message authentication failed. The data may have been tampered with.".to_string()
            }
            CryptoError::InvalidParameter {
                parameter,
                expected,
                ..
            } => format!(
                "Invalid parameter '{}'. Expected '{}'.",
                parameter, expected
            ),
            CryptoError::ResourceExhaustion { resource, .. } => format!(
                "The GCM limit for '{}' was exceeded. Split the data across several messages.",
                resource
            ),
            CryptoError::SelfTestFailure { case, .. } => format!(
                "Known-answer self-test '{}' failed. The engine must not be used.",
                case
            ),
            CryptoError::SideChannelViolation { test_name, .. } => format!(
                "Timing check '{}' detected data-dependent execution time.",
                test_name
            ),
        }
    }

    /// Get technical details for debugging
    pub fn technical_details(&self) -> HashMap<String, String> {
        let mut details = HashMap::new();

        details.insert("error_code".to_string(), self.error_code().to_string());
        details.insert("error_type".to_string(), self.error_type().to_string());

        match self {
            CryptoError::InvalidState {
                operation, state, ..
            } => {
                details.insert("operation".to_string(), operation.clone());
                details.insert("state".to_string(), state.clone());
            }
            CryptoError::InvalidParameter {
                parameter,
                expected,
                actual,
                ..
            } => {
                details.insert("parameter".to_string(), parameter.clone());
                details.insert("expected".to_string(), expected.clone());
                details.insert("actual".to_string(), actual.clone());
            }
            CryptoError::AuthenticationFailure { operation, .. } => {
                details.insert("operation".to_string(), operation.clone());
            }
            _ => {
                details.insert("details".to_string(), self.to_string());
            }
        }

        details
    }

    /// Get suggested remediation steps
    pub fn suggested_remediation(&self) -> Option<String> {
        match self {
            CryptoError::InvalidKeyLength { .. } => Some(
                "Use a 128, 192 or 256-bit key.".to_string(),
            ),
            CryptoError::InvalidState { .. } => Some(
                "Bind a key, call start, then update and finish. Call reset before reusing a finished context."
                    .to_string(),
            ),
            CryptoError::AuthenticationFailure { .. } => Some(
                "Discard any plaintext already produced and treat the message as forged.".to_string(),
            ),
            CryptoError::ResourceExhaustion { .. } => Some(
                "Encrypt at most 2^36 - 32 bytes per IV and rekey or change the IV.".to_string(),
            ),
            CryptoError::SelfTestFailure { .. } => Some(
                "Check the block cipher backend and rebuild the library.".to_string(),
            ),
            _ => None,
        }
    }

    /// Get the error category/type as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            CryptoError::InvalidKeyLength { .. } => "InvalidKeyLength",
            CryptoError::InvalidState { .. } => "InvalidState",
            CryptoError::InvalidTagLength { .. } => "InvalidTagLength",
            CryptoError::AuthenticationFailure { .. } => "AuthenticationFailure",
            CryptoError::InvalidParameter { .. } => "InvalidParameter",
            CryptoError::ResourceExhaustion { .. } => "ResourceExhaustion",
            CryptoError::SelfTestFailure { .. } => "SelfTestFailure",
            CryptoError::SideChannelViolation { .. } => "SideChannelViolation",
        }
    }
}

/// Convenience constructors for common error types
impl CryptoError {
    pub fn invalid_key_length(actual: usize) -> Self {
        CryptoError::InvalidKeyLength {
            expected: "16, 24 or 32 bytes".to_string(),
            actual,
            error_code: error_codes::GCM_INVALID_KEY_SIZE,
        }
    }

    pub fn invalid_state(operation: &str, state: &str) -> Self {
        CryptoError::InvalidState {
            operation: operation.to_string(),
            state: state.to_string(),
            error_code: error_codes::GCM_STATE_INVALID,
        }
    }

    pub fn invalid_tag_length(actual: usize) -> Self {
        CryptoError::InvalidTagLength {
            actual,
            error_code: error_codes::GCM_INVALID_TAG_SIZE,
        }
    }

    pub fn authentication_failure(operation: &str) -> Self {
        CryptoError::AuthenticationFailure {
            operation: operation.to_string(),
            error_code: error_codes::GCM_AUTHENTICATION_FAILED,
        }
    }

    pub fn invalid_parameter(parameter: &str, expected: &str, actual: &str) -> Self {
        CryptoError::InvalidParameter {
            parameter: parameter.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            error_code: error_codes::INVALID_PARAMETER,
        }
    }

    pub fn resource_exhaustion(resource: &str, limit: &str, error_code: u32) -> Self {
        CryptoError::ResourceExhaustion {
            resource: resource.to_string(),
            limit: limit.to_string(),
            error_code,
        }
    }

    pub fn self_test_failure(case: &str, details: &str) -> Self {
        CryptoError::SelfTestFailure {
            case: case.to_string(),
            details: details.to_string(),
            error_code: error_codes::SELF_TEST_FAILED,
        }
    }
}

/// Result type alias for GCM operations
pub type CryptoResult<T> = Result<T, CryptoError>;
