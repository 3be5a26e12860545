use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum RotatorError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    DuplicateKey(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    FileOperation(String),
    Gateway(String),
    RateLimited(String),
    PaymentRequired(String),
}

impl RotatorError {
    /// Stable error code, also used in log output
    pub fn code(&self) -> &'static str {
        match self {
            RotatorError::DatabaseConfig(_) => "E001",
            RotatorError::DatabaseConnection(_) => "E002",
            RotatorError::DatabaseOperation(_) => "E003",
            RotatorError::DuplicateKey(_) => "E004",
            RotatorError::Validation(_) => "E005",
            RotatorError::NotFound(_) => "E006",
            RotatorError::Serialization(_) => "E007",
            RotatorError::FileOperation(_) => "E008",
            RotatorError::Gateway(_) => "E009",
            RotatorError::RateLimited(_) => "E010",
            RotatorError::PaymentRequired(_) => "E011",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            RotatorError::DatabaseConfig(_) => "Database Configuration Error",
            RotatorError::DatabaseConnection(_) => "Database Connection Error",
            RotatorError::DatabaseOperation(_) => "Database Operation Error",
            RotatorError::DuplicateKey(_) => "Duplicate Key",
            RotatorError::Validation(_) => "Validation Error",
            RotatorError::NotFound(_) => "Resource Not Found",
            RotatorError::Serialization(_) => "Serialization Error",
            RotatorError::FileOperation(_) => "File Operation Error",
            RotatorError::Gateway(_) => "Gateway Error",
            RotatorError::RateLimited(_) => "Rate Limited",
            RotatorError::PaymentRequired(_) => "Payment Required",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RotatorError::DatabaseConfig(msg)
            | RotatorError::DatabaseConnection(msg)
            | RotatorError::DatabaseOperation(msg)
            | RotatorError::DuplicateKey(msg)
            | RotatorError::Validation(msg)
            | RotatorError::NotFound(msg)
            | RotatorError::Serialization(msg)
            | RotatorError::FileOperation(msg)
            | RotatorError::Gateway(msg)
            | RotatorError::RateLimited(msg)
            | RotatorError::PaymentRequired(msg) => msg,
        }
    }

    /// HTTP status the admin/visitor APIs map this error to
    pub fn http_status(&self) -> StatusCode {
        match self {
            RotatorError::Validation(_) => StatusCode::BAD_REQUEST,
            RotatorError::NotFound(_) => StatusCode::NOT_FOUND,
            RotatorError::DuplicateKey(_) => StatusCode::CONFLICT,
            RotatorError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            RotatorError::PaymentRequired(_) => StatusCode::PAYMENT_REQUIRED,
            RotatorError::Gateway(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for RotatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RotatorError {}

// Convenience constructors
impl RotatorError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        RotatorError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        RotatorError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        RotatorError::DatabaseOperation(msg.into())
    }

    pub fn duplicate_key<T: Into<String>>(msg: T) -> Self {
        RotatorError::DuplicateKey(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        RotatorError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        RotatorError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        RotatorError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        RotatorError::FileOperation(msg.into())
    }

    pub fn gateway<T: Into<String>>(msg: T) -> Self {
        RotatorError::Gateway(msg.into())
    }

    pub fn rate_limited<T: Into<String>>(msg: T) -> Self {
        RotatorError::RateLimited(msg.into())
    }

    pub fn payment_required<T: Into<String>>(msg: T) -> Self {
        RotatorError::PaymentRequired(msg.into())
    }
}

impl From<sea_orm::DbErr> for RotatorError {
    fn from(err: sea_orm::DbErr) -> Self {
        RotatorError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for RotatorError {
    fn from(err: std::io::Error) -> Self {
        RotatorError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for RotatorError {
    fn from(err: serde_json::Error) -> Self {
        RotatorError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RotatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(RotatorError::validation("x").code(), "E005");
        assert_eq!(RotatorError::not_found("x").code(), "E006");
        assert_eq!(RotatorError::duplicate_key("x").code(), "E004");
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            RotatorError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RotatorError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RotatorError::duplicate_key("x").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RotatorError::rate_limited("x").http_status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            RotatorError::payment_required("x").http_status(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            RotatorError::database_operation("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = RotatorError::not_found("no such prelanding");
        assert_eq!(err.to_string(), "Resource Not Found: no such prelanding");
    }

    #[test]
    fn test_from_db_err() {
        let err: RotatorError = sea_orm::DbErr::Custom("boom".into()).into();
        assert!(matches!(err, RotatorError::DatabaseOperation(_)));
    }
}
