//! Admin API: web-result CRUD, bulk operations and CSV export

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use serde::Deserialize;
use tracing::{info, trace};

use crate::storage::{ContentStore, WebResultInput};
use crate::utils::csv_export::{export_filename, to_csv_string};

use super::batch::{check_batch_size, delete_each, parse_id_subset};
use super::error_code::ErrorCode;
use super::helpers::{api_result, error_from_rotator, error_response, success_response};
use super::types::{BulkIdsRequest, BulkUpdateResponse, ExportQuery, WebResultPayload, WebResultResponse};

fn input_from(payload: WebResultPayload) -> WebResultInput {
    WebResultInput {
        title: payload.title,
        description: payload.description,
        original_link: payload.original_link,
        logo_url: payload.logo_url,
        web_result_page: payload.web_result_page.unwrap_or(1),
        position: payload.position.unwrap_or(0),
        is_sponsored: payload.is_sponsored.unwrap_or(false),
        prelanding_key: payload.prelanding_key,
        backlink: payload.backlink,
        country_codes: payload.country_codes,
        worldwide: payload.worldwide.unwrap_or(true),
        is_active: payload.is_active.unwrap_or(true),
    }
}

#[derive(Deserialize)]
pub struct ListResultsQuery {
    /// Restrict the listing to one results page
    pub page: Option<i32>,
}

pub async fn list_results(
    _req: HttpRequest,
    query: web::Query<ListResultsQuery>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: list web results");
    let result = store.list_web_results(query.page, false).await.map(|rows| {
        rows.into_iter()
            .map(WebResultResponse::from)
            .collect::<Vec<_>>()
    });
    Ok(api_result(result))
}

pub async fn get_result(
    _req: HttpRequest,
    path: web::Path<String>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let result = store.get_web_result(&id).await.map(WebResultResponse::from);
    Ok(api_result(result))
}

pub async fn post_result(
    _req: HttpRequest,
    payload: web::Json<WebResultPayload>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    info!("Admin API: create web result");
    let result = store
        .create_web_result(input_from(payload.into_inner()))
        .await
        .map(WebResultResponse::from);
    Ok(api_result(result))
}

pub async fn update_result(
    _req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<WebResultPayload>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    info!("Admin API: update web result {}", id);
    let result = store
        .update_web_result(&id, input_from(payload.into_inner()))
        .await
        .map(WebResultResponse::from);
    Ok(api_result(result))
}

pub async fn delete_result(
    _req: HttpRequest,
    path: web::Path<String>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    info!("Admin API: delete web result {}", id);
    Ok(api_result(store.delete_web_result(&id).await))
}

pub async fn bulk_activate_results(
    _req: HttpRequest,
    batch: web::Json<BulkIdsRequest>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    set_active(batch.into_inner(), store, true).await
}

pub async fn bulk_deactivate_results(
    _req: HttpRequest,
    batch: web::Json<BulkIdsRequest>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    set_active(batch.into_inner(), store, false).await
}

async fn set_active(
    batch: BulkIdsRequest,
    store: web::Data<ContentStore>,
    active: bool,
) -> ActixResult<HttpResponse> {
    if let Some(resp) = check_batch_size(batch.ids.len()) {
        return Ok(resp);
    }
    info!(
        "Admin API: bulk set {} web results active={}",
        batch.ids.len(),
        active
    );
    let result = store
        .set_web_results_active(&batch.ids, active)
        .await
        .map(|affected| BulkUpdateResponse { affected });
    Ok(api_result(result))
}

pub async fn bulk_delete_results(
    _req: HttpRequest,
    batch: web::Json<BulkIdsRequest>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let batch = batch.into_inner();
    if let Some(resp) = check_batch_size(batch.ids.len()) {
        return Ok(resp);
    }
    info!("Admin API: bulk delete {} web results", batch.ids.len());

    let response = delete_each(&batch.ids, |id| {
        let store = store.clone();
        let id = id.to_string();
        async move { store.delete_web_result(&id).await }
    })
    .await;

    Ok(success_response(response))
}

pub async fn export_results(
    _req: HttpRequest,
    query: web::Query<ExportQuery>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let subset = parse_id_subset(query.ids.as_deref());

    let rows = match store.list_web_results(None, false).await {
        Ok(rows) => rows,
        Err(e) => return Ok(error_from_rotator(&e)),
    };

    let data: Vec<Vec<String>> = rows
        .into_iter()
        .filter(|r| subset.as_ref().is_none_or(|ids| ids.contains(&r.id)))
        .map(|r| {
            vec![
                r.id,
                r.title,
                r.original_link,
                r.web_result_page.to_string(),
                r.position.to_string(),
                r.is_sponsored.to_string(),
                r.prelanding_key.unwrap_or_default(),
                r.worldwide.to_string(),
                r.country_codes.unwrap_or_default(),
                r.is_active.to_string(),
                r.created_at.to_rfc3339(),
            ]
        })
        .collect();

    let headers = [
        "id",
        "title",
        "original_link",
        "web_result_page",
        "position",
        "is_sponsored",
        "prelanding_key",
        "worldwide",
        "country_codes",
        "is_active",
        "created_at",
    ];

    match to_csv_string(&headers, &data) {
        Ok(csv) => {
            info!("Admin API: exported {} web results", data.len());
            Ok(HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .append_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", export_filename("web_results")),
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
