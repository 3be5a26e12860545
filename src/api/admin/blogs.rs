//! Admin API: blog CRUD, bulk status changes and CSV export

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use tracing::{info, trace};

use crate::storage::{BlogInput, ContentStore};
use crate::utils::csv_export::{export_filename, to_csv_string};

use super::batch::{check_batch_size, delete_each, parse_id_subset};
use super::error_code::ErrorCode;
use super::helpers::{api_result, error_from_rotator, error_response, success_response};
use super::types::{
    BlogPayload, BlogResponse, BulkIdsRequest, BulkStatusRequest, BulkUpdateResponse, ExportQuery,
};

fn input_from(payload: BlogPayload) -> BlogInput {
    BlogInput {
        title: payload.title,
        slug: payload.slug,
        author: payload.author,
        category: payload.category,
        content: payload.content,
        featured_image: payload.featured_image,
        status: payload.status.unwrap_or_else(|| "draft".to_string()),
        related_search_id: payload.related_search_id,
    }
}

pub async fn list_blogs(
    _req: HttpRequest,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: list blogs");
    let result = store
        .list_blogs(false)
        .await
        .map(|rows| rows.into_iter().map(BlogResponse::from).collect::<Vec<_>>());
    Ok(api_result(result))
}

pub async fn get_blog(
    _req: HttpRequest,
    path: web::Path<String>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let result = store.get_blog(&id).await.map(BlogResponse::from);
    Ok(api_result(result))
}

pub async fn post_blog(
    _req: HttpRequest,
    payload: web::Json<BlogPayload>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    info!("Admin API: create blog");
    let result = store
        .create_blog(input_from(payload.into_inner()))
        .await
        .map(BlogResponse::from);
    Ok(api_result(result))
}

pub async fn update_blog(
    _req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<BlogPayload>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    info!("Admin API: update blog {}", id);
    let result = store
        .update_blog(&id, input_from(payload.into_inner()))
        .await
        .map(BlogResponse::from);
    Ok(api_result(result))
}

pub async fn delete_blog(
    _req: HttpRequest,
    path: web::Path<String>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    info!("Admin API: delete blog {}", id);
    Ok(api_result(store.delete_blog(&id).await))
}

/// Move a batch of blogs between draft and published
pub async fn bulk_set_blog_status(
    _req: HttpRequest,
    batch: web::Json<BulkStatusRequest>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let batch = batch.into_inner();
    if let Some(resp) = check_batch_size(batch.ids.len()) {
        return Ok(resp);
    }
    info!(
        "Admin API: bulk set {} blogs to status {}",
        batch.ids.len(),
        batch.status
    );
    let result = store
        .set_blogs_status(&batch.ids, &batch.status)
        .await
        .map(|affected| BulkUpdateResponse { affected });
    Ok(api_result(result))
}

pub async fn export_blogs(
    _req: HttpRequest,
    query: web::Query<ExportQuery>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let subset = parse_id_subset(query.ids.as_deref());

    let rows = match store.list_blogs(false).await {
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
                r.slug,
                r.author.unwrap_or_default(),
                r.category.unwrap_or_default(),
                r.status,
            ]
        })
        .collect();

    let headers = ["id", "title", "slug", "author", "category", "status"];

    match to_csv_string(&headers, &data) {
        Ok(csv) => {
            info!("Admin API: exported {} blogs", data.len());
            Ok(HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .append_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", export_filename("blogs")),
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

pub async fn bulk_delete_blogs(
    _req: HttpRequest,
    batch: web::Json<BulkIdsRequest>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let batch = batch.into_inner();
    if let Some(resp) = check_batch_size(batch.ids.len()) {
        return Ok(resp);
    }
    info!("Admin API: bulk delete {} blogs", batch.ids.len());

    let response = delete_each(&batch.ids, |id| {
        let store = store.clone();
        let id = id.to_string();
        async move { store.delete_blog(&id).await }
    })
    .await;

    Ok(success_response(response))
}
