//! API response envelope
//!
//! Every backend endpoint returns the same envelope shape:
//! ```json
//! { "success": true, "data": { ... } }
//! { "success": false, "error": "message" }
//! ```

use crate::error::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};

/// Unified backend response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Server-provided error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Create a successful envelope
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create a failed envelope
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Convert the envelope into a result, requiring data on success.
    ///
    /// A failed envelope becomes a [`ErrorCode::BackendError`] carrying
    /// the server-provided message, with a generic fallback when the
    /// server sent none.
    pub fn into_result(self) -> AppResult<T> {
        if self.success {
            self.data.ok_or_else(|| {
                AppError::with_message(ErrorCode::BackendError, "Response missing data")
            })
        } else {
            let message = self
                .error
                .unwrap_or_else(|| ErrorCode::BackendError.default_message().to_string());
            Err(AppError::backend(message))
        }
    }

    /// Convert the envelope into a result, ignoring any data.
    pub fn into_unit(self) -> AppResult<()> {
        if self.success {
            Ok(())
        } else {
            let message = self
                .error
                .unwrap_or_else(|| ErrorCode::BackendError.default_message().to_string());
            Err(AppError::backend(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_unwraps_data() {
        let env = ApiEnvelope::ok(42);
        assert_eq!(env.into_result().unwrap(), 42);
    }

    #[test]
    fn test_failed_envelope_carries_server_message() {
        let env: ApiEnvelope<i32> = ApiEnvelope::fail("item is out of stock");
        let err = env.into_result().unwrap_err();
        assert_eq!(err.code, ErrorCode::BackendError);
        assert_eq!(err.message, "item is out of stock");
    }

    #[test]
    fn test_failed_envelope_without_message_uses_fallback() {
        let env: ApiEnvelope<i32> = ApiEnvelope {
            success: false,
            data: None,
            error: None,
        };
        let err = env.into_result().unwrap_err();
        assert_eq!(err.message, "Backend request failed");
    }

    #[test]
    fn test_success_without_data_is_error_when_data_required() {
        let env: ApiEnvelope<i32> = ApiEnvelope {
            success: true,
            data: None,
            error: None,
        };
        assert!(env.into_result().is_err());
    }

    #[test]
    fn test_into_unit_ignores_missing_data() {
        let env: ApiEnvelope<()> = ApiEnvelope {
            success: true,
            data: None,
            error: None,
        };
        assert!(env.into_unit().is_ok());
    }
}
