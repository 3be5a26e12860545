//! Admin API: traffic analytics
//!
//! Read-only views over the session and click tables. Heavy aggregation
//! happens in the storage layer; handlers only shape the response.

use actix_web::{HttpRequest, Responder, Result as ActixResult, web};
use serde::Deserialize;
use tracing::trace;

use crate::storage::ContentStore;

use super::helpers::api_result;

pub async fn get_overview(
    _req: HttpRequest,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: analytics overview");
    Ok(api_result(store.analytics_overview().await))
}

pub async fn get_sessions(
    _req: HttpRequest,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: recent sessions");
    Ok(api_result(store.recent_sessions().await))
}

pub async fn get_search_clicks(
    _req: HttpRequest,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: per-search click counts");
    Ok(api_result(store.search_click_counts().await))
}

#[derive(Deserialize)]
pub struct ClickDetailsQuery {
    /// Narrow the detail window to one related search
    pub related_search_id: Option<String>,
}

pub async fn get_click_details(
    _req: HttpRequest,
    query: web::Query<ClickDetailsQuery>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: click details");
    Ok(api_result(
        store.click_details(query.related_search_id.as_deref()).await,
    ))
}
