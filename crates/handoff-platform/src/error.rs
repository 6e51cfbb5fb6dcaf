//! Error types for the platform layer.

use crate::ResultCode;

/// Errors surfaced by the platform seams.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The Steam client library failed to start (Steam not running, no
    /// `steam_appid.txt`, user not logged in, and so on).
    #[error("steam api init failed: {0}")]
    SteamInit(String),

    /// An EOS call returned something other than `Success`.
    #[error("{operation} returned {code}")]
    Sdk {
        /// The SDK call that failed, e.g. `"EOS_Initialize"`.
        operation: &'static str,
        code: ResultCode,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_error_display_names_operation_and_code() {
        let err = PlatformError::Sdk {
            operation: "EOS_Initialize",
            code: ResultCode::AlreadyConfigured,
        };
        assert_eq!(err.to_string(), "EOS_Initialize returned AlreadyConfigured");
    }
}
