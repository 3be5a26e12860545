//! Visitor-facing API
//!
//! Drives the page chain the frontend renders: landing → web results →
//! optional prelanding → external redirect. Click and session recording
//! happens here as a side effect and never blocks the visitor: a failed
//! write is logged and the response proceeds as if it succeeded.

use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::api::admin::helpers::{api_result, error_from_rotator, success_response};
use crate::api::admin::types::{
    BlogResponse, LandingContentResponse, PrelandingResponse, RelatedSearchResponse,
    TS_EXPORT_PATH,
};
use crate::errors::RotatorError;
use crate::services::redirect::{
    Destination, REDIRECT_DELAY_MS, ResultsPage, parse_page_param, partition_results,
    resolve_destination,
};
use crate::services::session::{SESSION_STORAGE_KEY, generate_session_token};
use crate::services::{ClickRecorder, VisitorContext};
use crate::storage::ContentStore;
use crate::utils::ip::extract_client_ip;

// ---- Request/response types ----

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SessionInitRequest {
    /// Token the frontend read back from localStorage, if any
    pub session_id: Option<String>,
    pub source: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SessionInitResponse {
    pub session_id: String,
    /// localStorage key the frontend persists the token under
    pub storage_key: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LandingView {
    pub content: Option<LandingContentResponse>,
    pub searches: Vec<RelatedSearchResponse>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SearchClickRequest {
    pub session_id: String,
    pub related_search_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SearchClickResponse {
    /// Frontend route for the results page the search points at
    pub destination: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ResultClickRequest {
    pub session_id: String,
    pub web_result_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PrelandingView {
    pub key: String,
    pub headline: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub main_image_url: Option<String>,
    pub redirect_description: Option<String>,
    pub redirect_delay_ms: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct EmailSubmitRequest {
    pub email: String,
    /// External URL carried through the prelanding query string
    pub redirect: String,
    /// Originating web-result id, when the frontend still has it
    pub rid: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct EmailSubmitResponse {
    pub redirect_url: String,
    pub delay_ms: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct BlogView {
    pub blog: BlogResponse,
    pub searches: Vec<RelatedSearchResponse>,
}

fn visitor_context(req: &HttpRequest, session_id: &str, source: Option<String>) -> VisitorContext {
    VisitorContext {
        session_id: session_id.to_string(),
        user_agent: req
            .headers()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        ip_address: extract_client_ip(req),
        source,
    }
}

// ---- Handlers ----

/// Establish or refresh the visitor session
pub async fn init_session(
    req: HttpRequest,
    payload: web::Json<SessionInitRequest>,
    recorder: web::Data<ClickRecorder>,
) -> ActixResult<impl Responder> {
    let payload = payload.into_inner();
    let session_id = payload
        .session_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(generate_session_token);

    let ctx = visitor_context(&req, &session_id, payload.source);
    if let Err(e) = recorder.record_landing_visit(&ctx).await {
        warn!("Session visit recording failed: {}", e);
    }

    Ok(success_response(SessionInitResponse {
        session_id,
        storage_key: SESSION_STORAGE_KEY.to_string(),
    }))
}

/// Landing page content plus its active search buttons
pub async fn get_landing(
    _req: HttpRequest,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let content = match store.get_landing_content().await {
        Ok(content) => content.map(LandingContentResponse::from),
        Err(e) => return Ok(error_from_rotator(&e)),
    };

    let searches = match store.list_related_searches(true).await {
        Ok(rows) => rows
            .into_iter()
            .map(RelatedSearchResponse::from)
            .collect(),
        Err(e) => return Ok(error_from_rotator(&e)),
    };

    Ok(success_response(LandingView { content, searches }))
}

/// Record a search-button click and resolve its results page
pub async fn click_search(
    req: HttpRequest,
    payload: web::Json<SearchClickRequest>,
    store: web::Data<ContentStore>,
    recorder: web::Data<ClickRecorder>,
) -> ActixResult<impl Responder> {
    let payload = payload.into_inner();

    let search = match store.get_related_search(&payload.related_search_id).await {
        Ok(search) if search.is_active => search,
        Ok(_) => {
            return Ok(error_from_rotator(&RotatorError::not_found(
                "Related search not found",
            )));
        }
        Err(e) => return Ok(error_from_rotator(&e)),
    };

    let ctx = visitor_context(&req, &payload.session_id, None);
    if let Err(e) = recorder.record_search_click(&ctx, &search.id).await {
        warn!("Search click recording failed: {}", e);
    }

    Ok(success_response(SearchClickResponse {
        destination: format!("/webresult/{}", search.web_result_page),
    }))
}

/// Active results for one page, sponsored group first
pub async fn get_results(
    _req: HttpRequest,
    path: web::Path<String>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let raw = path.into_inner();
    let Some(page) = parse_page_param(&raw) else {
        return Ok(error_from_rotator(&RotatorError::validation(format!(
            "Invalid page parameter: {}",
            raw
        ))));
    };

    let result: Result<ResultsPage, RotatorError> = store
        .list_web_results(Some(page), true)
        .await
        .map(|rows| partition_results(page, rows));
    Ok(api_result(result))
}

/// Record a result click and resolve where the visitor goes next
pub async fn click_result(
    req: HttpRequest,
    payload: web::Json<ResultClickRequest>,
    store: web::Data<ContentStore>,
    recorder: web::Data<ClickRecorder>,
) -> ActixResult<impl Responder> {
    let payload = payload.into_inner();

    let result = match store.get_web_result(&payload.web_result_id).await {
        Ok(result) if result.is_active => result,
        Ok(_) => {
            return Ok(error_from_rotator(&RotatorError::not_found(
                "Web result not found",
            )));
        }
        Err(e) => return Ok(error_from_rotator(&e)),
    };

    let ctx = visitor_context(&req, &payload.session_id, None);
    if let Err(e) = recorder.record_result_click(&ctx, &result.id).await {
        warn!("Result click recording failed: {}", e);
    }

    let destination: Destination = resolve_destination(&result);
    debug!("Result {} resolved to {:?}", result.id, destination);
    Ok(success_response(destination))
}

/// Prelanding page content; missing or deactivated keys are a hard 404
pub async fn get_prelanding(
    _req: HttpRequest,
    path: web::Path<String>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let key = path.into_inner();
    let result = store.get_active_prelanding_by_key(&key).await.map(|m| {
        let m = PrelandingResponse::from(m);
        PrelandingView {
            key: m.key,
            headline: m.headline,
            subtitle: m.subtitle,
            description: m.description,
            logo_url: m.logo_url,
            main_image_url: m.main_image_url,
            redirect_description: m.redirect_description,
            redirect_delay_ms: REDIRECT_DELAY_MS,
        }
    });
    Ok(api_result(result))
}

/// Capture an email and release the visitor to the external URL
pub async fn submit_email(
    _req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<EmailSubmitRequest>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let key = path.into_inner();
    let payload = payload.into_inner();

    // Non-empty is the only server-side check; format is the frontend's job
    let email = payload.email.trim();
    if email.is_empty() {
        return Ok(error_from_rotator(&RotatorError::validation(
            "Email is required",
        )));
    }

    // The prelanding must still be live; a deactivated page stops capturing
    if let Err(e) = store.get_active_prelanding_by_key(&key).await {
        return Ok(error_from_rotator(&e));
    }

    if let Err(e) = store
        .insert_email_capture(email.to_string(), key, payload.rid)
        .await
    {
        return Ok(error_from_rotator(&e));
    }

    Ok(success_response(EmailSubmitResponse {
        redirect_url: payload.redirect,
        delay_ms: REDIRECT_DELAY_MS,
    }))
}

/// Published blog posts, newest first
pub async fn list_blogs(
    _req: HttpRequest,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let result = store
        .list_blogs(true)
        .await
        .map(|rows| rows.into_iter().map(BlogResponse::from).collect::<Vec<_>>());
    Ok(api_result(result))
}

/// One published blog post with its attached search buttons
pub async fn get_blog(
    _req: HttpRequest,
    path: web::Path<String>,
    store: web::Data<ContentStore>,
) -> ActixResult<impl Responder> {
    let slug = path.into_inner();

    let blog = match store.get_published_blog_by_slug(&slug).await {
        Ok(blog) => blog,
        Err(e) => return Ok(error_from_rotator(&e)),
    };

    let searches = match store.list_related_searches_for_blog(&blog.id).await {
        Ok(rows) => rows
            .into_iter()
            .map(RelatedSearchResponse::from)
            .collect(),
        Err(e) => return Ok(error_from_rotator(&e)),
    };

    Ok(success_response(BlogView {
        blog: BlogResponse::from(blog),
        searches,
    }))
}

/// Liveness probe
pub async fn health(store: web::Data<ContentStore>) -> ActixResult<impl Responder> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "backend": store.backend_name(),
    })))
}

/// Visitor API routes, mounted at the configured API prefix
pub fn visitor_scope(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .route("/health", web::get().to(health))
        .route("/session", web::post().to(init_session))
        .route("/landing", web::get().to(get_landing))
        .route("/clicks/search", web::post().to(click_search))
        .route("/clicks/result", web::post().to(click_result))
        .route("/results/{page}", web::get().to(get_results))
        .route("/prelanding/{key}/email", web::post().to(submit_email))
        .route("/prelanding/{key}", web::get().to(get_prelanding))
        .route("/blogs", web::get().to(list_blogs))
        .route("/blogs/{slug}", web::get().to(get_blog))
}
