//! Admin API: captured emails listing and CSV export

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use tracing::{info, trace};

use crate::storage::ContentStore;
use crate::utils::csv_export::{export_filename, to_csv_string};

use super::error_code::ErrorCode;
use super::helpers::{api_result, error_from_rotator, error_response};
use super::types::EmailCaptureResponse;

pub async fn list_emails(
    _req: HttpRequest,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: list email captures");
    let result = store.list_email_captures().await.map(|rows| {
        rows.into_iter()
            .map(EmailCaptureResponse::from)
            .collect::<Vec<_>>()
    });
    Ok(api_result(result))
}

pub async fn export_emails(
    _req: HttpRequest,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let rows = match store.list_email_captures().await {
        Ok(rows) => rows,
        Err(e) => return Ok(error_from_rotator(&e)),
    };

    let data: Vec<Vec<String>> = rows
        .into_iter()
        .map(|r| {
            vec![
                r.email,
                r.prelanding_key,
                r.web_result_id.unwrap_or_default(),
                r.created_at.to_rfc3339(),
            ]
        })
        .collect();

    let headers = ["email", "prelanding_key", "web_result_id", "created_at"];

    match to_csv_string(&headers, &data) {
        Ok(csv) => {
            info!("Admin API: exported {} email captures", data.len());
            Ok(HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .append_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", export_filename("emails")),
                ))
                .body(csv))
        }
        Err(e) => Ok(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::CsvGenerationError,
            e.message(),
        )),
    }
}
