//! Admin API: prelanding CRUD and bulk operations
//!
//! The routing key is generated from the headline on create and never
//! changes afterwards, so links embedded in the wild stay valid.

use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use tracing::{info, trace};

use crate::storage::{ContentStore, PrelandingInput};

use super::batch::{check_batch_size, delete_each};
use super::helpers::{api_result, success_response};
use super::types::{BulkIdsRequest, BulkUpdateResponse, PrelandingPayload, PrelandingResponse};

fn input_from(payload: PrelandingPayload) -> PrelandingInput {
    PrelandingInput {
        headline: payload.headline,
        subtitle: payload.subtitle,
        description: payload.description,
        logo_url: payload.logo_url,
        main_image_url: payload.main_image_url,
        redirect_description: payload.redirect_description,
        is_active: payload.is_active.unwrap_or(true),
    }
}

pub async fn list_prelandings(
    _req: HttpRequest,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: list prelandings");
    let result = store.list_prelandings(false).await.map(|rows| {
        rows.into_iter()
            .map(PrelandingResponse::from)
            .collect::<Vec<_>>()
    });
    Ok(api_result(result))
}

pub async fn get_prelanding(
    _req: HttpRequest,
    path: web::Path<String>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let result = store.get_prelanding(&id).await.map(PrelandingResponse::from);
    Ok(api_result(result))
}

pub async fn post_prelanding(
    _req: HttpRequest,
    payload: web::Json<PrelandingPayload>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    info!("Admin API: create prelanding");
    let result = store
        .create_prelanding(input_from(payload.into_inner()))
        .await
        .map(PrelandingResponse::from);
    Ok(api_result(result))
}

pub async fn update_prelanding(
    _req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<PrelandingPayload>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    info!("Admin API: update prelanding {}", id);
    let result = store
        .update_prelanding(&id, input_from(payload.into_inner()))
        .await
        .map(PrelandingResponse::from);
    Ok(api_result(result))
}

pub async fn delete_prelanding(
    _req: HttpRequest,
    path: web::Path<String>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    info!("Admin API: delete prelanding {}", id);
    Ok(api_result(store.delete_prelanding(&id).await))
}

pub async fn bulk_activate_prelandings(
    _req: HttpRequest,
    batch: web::Json<BulkIdsRequest>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    set_active(batch.into_inner(), store, true).await
}

pub async fn bulk_deactivate_prelandings(
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
        "Admin API: bulk set {} prelandings active={}",
        batch.ids.len(),
        active
    );
    let result = store
        .set_prelandings_active(&batch.ids, active)
        .await
        .map(|affected| BulkUpdateResponse { affected });
    Ok(api_result(result))
}

pub async fn bulk_delete_prelandings(
    _req: HttpRequest,
    batch: web::Json<BulkIdsRequest>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let batch = batch.into_inner();
    if let Some(resp) = check_batch_size(batch.ids.len()) {
        return Ok(resp);
    }
    info!("Admin API: bulk delete {} prelandings", batch.ids.len());

    let response = delete_each(&batch.ids, |id| {
        let store = store.clone();
        let id = id.to_string();
        async move { store.delete_prelanding(&id).await }
    })
    .await;

    Ok(success_response(response))
}
