//! Unified API error codes

use serde_repr::{Deserialize_repr, Serialize_repr};
use ts_rs::TS;

use crate::errors::RotatorError;

use super::types::TS_EXPORT_PATH;

/// API error code enum
///
/// Serialized as numbers via serde_repr, exported to TypeScript via ts-rs.
/// Banded by thousands:
/// - 0: success
/// - 1000-1099: generic errors
/// - 3000-3099: content errors
/// - 4000-4099: export errors
/// - 6000-6099: analytics errors
/// - 7000-7099: AI assist errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[ts(rename = "ErrorCode")]
#[ts(repr(enum))]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // Generic errors 1000-1099
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,
    BatchSizeTooLarge = 1010,

    // Content errors 3000-3099
    ContentNotFound = 3000,
    ContentAlreadyExists = 3001,
    ContentValidationFailed = 3002,
    ContentDatabaseError = 3005,

    // Export errors 4000-4099
    ExportFailed = 4001,
    CsvGenerationError = 4006,

    // Analytics errors 6000-6099
    AnalyticsQueryFailed = 6000,

    // AI assist errors 7000-7099
    AssistGatewayError = 7000,
    AssistRateLimited = 7001,
    AssistPaymentRequired = 7002,
}

impl From<RotatorError> for ErrorCode {
    fn from(err: RotatorError) -> Self {
        match err {
            RotatorError::Validation(_) => ErrorCode::ContentValidationFailed,
            RotatorError::NotFound(_) => ErrorCode::ContentNotFound,
            RotatorError::DuplicateKey(_) => ErrorCode::ContentAlreadyExists,
            RotatorError::DatabaseConfig(_)
            | RotatorError::DatabaseConnection(_)
            | RotatorError::DatabaseOperation(_) => ErrorCode::ContentDatabaseError,
            RotatorError::Serialization(_) | RotatorError::FileOperation(_) => {
                ErrorCode::InternalServerError
            }
            RotatorError::Gateway(_) => ErrorCode::AssistGatewayError,
            RotatorError::RateLimited(_) => ErrorCode::AssistRateLimited,
            RotatorError::PaymentRequired(_) => ErrorCode::AssistPaymentRequired,
        }
    }
}
