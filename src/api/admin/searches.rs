//! Admin API: related-search CRUD, bulk operations and CSV export

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use tracing::{info, trace};

use crate::storage::{ContentStore, RelatedSearchInput};
use crate::utils::csv_export::{export_filename, to_csv_string};

use super::batch::{check_batch_size, delete_each, parse_id_subset};
use super::error_code::ErrorCode;
use super::helpers::{api_result, error_from_rotator, error_response, success_response};
use super::types::{
    BulkIdsRequest, BulkUpdateResponse, ExportQuery, RelatedSearchPayload, RelatedSearchResponse,
};

fn input_from(payload: RelatedSearchPayload) -> RelatedSearchInput {
    RelatedSearchInput {
        search_text: payload.search_text,
        title: payload.title,
        web_result_page: payload.web_result_page.unwrap_or(1),
        position: payload.position.unwrap_or(0),
        display_order: payload.display_order.unwrap_or(0),
        is_active: payload.is_active.unwrap_or(true),
        blog_id: payload.blog_id,
    }
}

pub async fn list_searches(
    _req: HttpRequest,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: list related searches");
    let result = store.list_related_searches(false).await.map(|rows| {
        rows.into_iter()
            .map(RelatedSearchResponse::from)
            .collect::<Vec<_>>()
    });
    Ok(api_result(result))
}

pub async fn get_search(
    _req: HttpRequest,
    path: web::Path<String>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let result = store
        .get_related_search(&id)
        .await
        .map(RelatedSearchResponse::from);
    Ok(api_result(result))
}

pub async fn post_search(
    _req: HttpRequest,
    payload: web::Json<RelatedSearchPayload>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    info!("Admin API: create related search");
    let result = store
        .create_related_search(input_from(payload.into_inner()))
        .await
        .map(RelatedSearchResponse::from);
    Ok(api_result(result))
}

pub async fn update_search(
    _req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<RelatedSearchPayload>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    info!("Admin API: update related search {}", id);
    let result = store
        .update_related_search(&id, input_from(payload.into_inner()))
        .await
        .map(RelatedSearchResponse::from);
    Ok(api_result(result))
}

pub async fn delete_search(
    _req: HttpRequest,
    path: web::Path<String>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    info!("Admin API: delete related search {}", id);
    Ok(api_result(store.delete_related_search(&id).await))
}

pub async fn bulk_activate_searches(
    _req: HttpRequest,
    batch: web::Json<BulkIdsRequest>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    set_active(batch.into_inner(), store, true).await
}

pub async fn bulk_deactivate_searches(
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
        "Admin API: bulk set {} related searches active={}",
        batch.ids.len(),
        active
    );
    let result = store
        .set_related_searches_active(&batch.ids, active)
        .await
        .map(|affected| BulkUpdateResponse { affected });
    Ok(api_result(result))
}

pub async fn bulk_delete_searches(
    _req: HttpRequest,
    batch: web::Json<BulkIdsRequest>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let batch = batch.into_inner();
    if let Some(resp) = check_batch_size(batch.ids.len()) {
        return Ok(resp);
    }
    info!("Admin API: bulk delete {} related searches", batch.ids.len());

    let response = delete_each(&batch.ids, |id| {
        let store = store.clone();
        let id = id.to_string();
        async move { store.delete_related_search(&id).await }
    })
    .await;

    Ok(success_response(response))
}

pub async fn export_searches(
    _req: HttpRequest,
    query: web::Query<ExportQuery>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let subset = parse_id_subset(query.ids.as_deref());

    let rows = match store.list_related_searches(false).await {
        Ok(rows) => rows,
        Err(e) => return Ok(error_from_rotator(&e)),
    };

    let data: Vec<Vec<String>> = rows
        .into_iter()
        .filter(|r| subset.as_ref().is_none_or(|ids| ids.contains(&r.id)))
        .map(|r| {
            vec![
                r.id,
                r.search_text,
                r.title.unwrap_or_default(),
                r.web_result_page.to_string(),
                r.position.to_string(),
                r.display_order.to_string(),
                r.is_active.to_string(),
                r.created_at.to_rfc3339(),
            ]
        })
        .collect();

    let headers = [
        "id",
        "search_text",
        "title",
        "web_result_page",
        "position",
        "display_order",
        "is_active",
        "created_at",
    ];

    match to_csv_string(&headers, &data) {
        Ok(csv) => {
            info!("Admin API: exported {} related searches", data.len());
            Ok(HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .append_header((
                    "Content-Disposition",
                    format!(
                        "attachment; filename=\"{}\"",
                        export_filename("related_searches")
                    ),
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
