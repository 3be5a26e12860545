//! Admin API helper functions

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::RotatorError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// Build a JSON response with the standard envelope
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// Build a success response
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// Build an error response
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// Build an error response from a RotatorError, mapping HTTP status and ErrorCode
pub fn error_from_rotator(err: &RotatorError) -> HttpResponse {
    let status = err.http_status();
    let error_code = ErrorCode::from(err.clone());
    error_response(status, error_code, err.message())
}

/// Unified Result → HttpResponse conversion
///
/// 200 OK + JSON data on success, mapped RotatorError otherwise.
pub fn api_result<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<RotatorError>,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => {
            let err: RotatorError = e.into();
            error_from_rotator(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response = success_response("ok");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_error_response() {
        let response = error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            "Something went wrong",
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_from_rotator_maps_status() {
        let response = error_from_rotator(&RotatorError::not_found("missing"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = error_from_rotator(&RotatorError::duplicate_key("dup"));
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = error_from_rotator(&RotatorError::rate_limited("later"));
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_api_result_error_path() {
        let result: Result<(), RotatorError> = Err(RotatorError::validation("bad input"));
        let response = api_result(result);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
