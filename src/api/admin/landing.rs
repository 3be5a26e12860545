//! Admin API: landing page content
//!
//! The landing content is a singleton row; PUT creates it on first save.

use actix_web::{HttpRequest, Responder, Result as ActixResult, web};
use tracing::info;

use crate::storage::ContentStore;

use super::helpers::{api_result, success_response};
use super::types::{LandingContentResponse, LandingPayload};

pub async fn get_landing(
    _req: HttpRequest,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let result = store
        .get_landing_content()
        .await
        .map(|opt| opt.map(LandingContentResponse::from));
    Ok(api_result(result))
}

pub async fn put_landing(
    _req: HttpRequest,
    payload: web::Json<LandingPayload>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let payload = payload.into_inner();
    info!("Admin API: update landing content");

    match store
        .upsert_landing_content(payload.title, payload.description)
        .await
    {
        Ok(model) => Ok(success_response(LandingContentResponse::from(model))),
        Err(e) => Ok(super::helpers::error_from_rotator(&e)),
    }
}
