//! Admin API integration tests
//!
//! Tests the management endpoints (CRUD, bulk operations, CSV export and
//! analytics) through the full actix route tree.

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use tempfile::TempDir;

use linkrotator::api::admin::admin_v1_routes;
use linkrotator::api::admin::types::{
    ApiResponse, BatchResponse, BlogResponse, BulkUpdateResponse, LandingContentResponse,
    PrelandingResponse, RelatedSearchResponse, WebResultResponse,
};
use linkrotator::storage::{AnalyticsOverview, ContentStore};

async fn create_temp_store() -> (ContentStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("admin_api_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let store = ContentStore::new(&db_url, "sqlite")
        .await
        .expect("Failed to create store");

    (store, temp_dir)
}

macro_rules! test_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($store.clone()))
                .service(web::scope("/admin").service(admin_v1_routes())),
        )
        .await
    };
}

// =============================================================================
// Landing content
// =============================================================================

#[actix_rt::test]
async fn test_landing_put_then_get() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let resp: ApiResponse<LandingContentResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::put()
            .uri("/admin/v1/landing")
            .set_json(serde_json::json!({
                "title": "Hot Deals",
                "description": "Curated offers",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.code, 0);
    assert_eq!(resp.data.unwrap().title, "Hot Deals");

    let resp: ApiResponse<LandingContentResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/admin/v1/landing").to_request(),
    )
    .await;
    assert_eq!(resp.data.unwrap().description, "Curated offers");
}

// =============================================================================
// Related searches
// =============================================================================

#[actix_rt::test]
async fn test_search_crud_roundtrip() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let created: ApiResponse<RelatedSearchResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri("/admin/v1/searches")
            .set_json(serde_json::json!({"search_text": "cheap flights"}))
            .to_request(),
    )
    .await;
    let created = created.data.unwrap();
    assert_eq!(created.title.as_deref(), Some("cheap flights"));
    assert_eq!(created.web_result_page, 1);

    let updated: ApiResponse<RelatedSearchResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::put()
            .uri(&format!("/admin/v1/searches/{}", created.id))
            .set_json(serde_json::json!({
                "search_text": "cheap flights",
                "title": "Cheap Flights ✈",
                "web_result_page": 2,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(updated.data.unwrap().web_result_page, 2);

    let resp = test::call_service(
        &app,
        TestRequest::delete()
            .uri(&format!("/admin/v1/searches/{}", created.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!("/admin/v1/searches/{}", created.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_search_create_requires_text() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/admin/v1/searches")
            .set_json(serde_json::json!({"search_text": "   "}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_search_bulk_activate_and_delete() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let mut ids = Vec::new();
    for text in ["one", "two", "three"] {
        let resp: ApiResponse<RelatedSearchResponse> = test::call_and_read_body_json(
            &app,
            TestRequest::post()
                .uri("/admin/v1/searches")
                .set_json(serde_json::json!({"search_text": text}))
                .to_request(),
        )
        .await;
        ids.push(resp.data.unwrap().id);
    }

    let resp: ApiResponse<BulkUpdateResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri("/admin/v1/searches/bulk/deactivate")
            .set_json(serde_json::json!({"ids": ids}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.data.unwrap().affected, 3);
    assert!(store.list_related_searches(true).await.unwrap().is_empty());

    let resp: ApiResponse<BatchResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::delete()
            .uri("/admin/v1/searches/bulk")
            .set_json(serde_json::json!({"ids": [ids[0], ids[1], "missing-id"]}))
            .to_request(),
    )
    .await;
    let batch = resp.data.unwrap();
    assert_eq!(batch.success.len(), 2);
    assert_eq!(batch.failed.len(), 1);
    assert_eq!(batch.failed[0].id, "missing-id");
}

#[actix_rt::test]
async fn test_search_export_csv() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let _: ApiResponse<RelatedSearchResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri("/admin/v1/searches")
            .set_json(serde_json::json!({"search_text": "exported"}))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/admin/v1/searches/export").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.starts_with("id,search_text,title"));
    assert!(body.contains("exported"));
}

// =============================================================================
// Web results
// =============================================================================

#[actix_rt::test]
async fn test_result_create_defaults() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let resp: ApiResponse<WebResultResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri("/admin/v1/results")
            .set_json(serde_json::json!({
                "title": "An Offer",
                "original_link": "https://offer.test/x",
            }))
            .to_request(),
    )
    .await;

    let result = resp.data.unwrap();
    assert!(!result.is_sponsored);
    assert!(result.worldwide);
    assert!(result.is_active);
    assert_eq!(result.web_result_page, 1);
}

#[actix_rt::test]
async fn test_result_list_filtered_by_page() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    for (title, page) in [("p1", 1), ("p2", 2)] {
        let _: ApiResponse<WebResultResponse> = test::call_and_read_body_json(
            &app,
            TestRequest::post()
                .uri("/admin/v1/results")
                .set_json(serde_json::json!({
                    "title": title,
                    "original_link": "https://offer.test/x",
                    "web_result_page": page,
                }))
                .to_request(),
        )
        .await;
    }

    let resp: ApiResponse<Vec<WebResultResponse>> = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/admin/v1/results?page=2").to_request(),
    )
    .await;
    let rows = resp.data.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "p2");
}

// =============================================================================
// Prelandings
// =============================================================================

#[actix_rt::test]
async fn test_prelanding_key_generated_and_stable() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let created: ApiResponse<PrelandingResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri("/admin/v1/prelandings")
            .set_json(serde_json::json!({"headline": "Grab The Deal"}))
            .to_request(),
    )
    .await;
    let created = created.data.unwrap();
    assert!(created.key.starts_with("grab-the-deal-"));

    let updated: ApiResponse<PrelandingResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::put()
            .uri(&format!("/admin/v1/prelandings/{}", created.id))
            .set_json(serde_json::json!({"headline": "A New Headline"}))
            .to_request(),
    )
    .await;
    let updated = updated.data.unwrap();
    assert_eq!(updated.key, created.key);
    assert_eq!(updated.headline, "A New Headline");
}

// =============================================================================
// Blogs
// =============================================================================

#[actix_rt::test]
async fn test_blog_duplicate_slug_is_conflict() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/admin/v1/blogs")
            .set_json(serde_json::json!({"title": "First", "slug": "shared"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/admin/v1/blogs")
            .set_json(serde_json::json!({"title": "Second", "slug": "shared"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_blog_bulk_status_change() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let created: ApiResponse<BlogResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri("/admin/v1/blogs")
            .set_json(serde_json::json!({"title": "Draft Post", "slug": "draft-post"}))
            .to_request(),
    )
    .await;
    let blog = created.data.unwrap();
    assert_eq!(blog.status, "draft");

    let resp: ApiResponse<BulkUpdateResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri("/admin/v1/blogs/bulk/status")
            .set_json(serde_json::json!({"ids": [blog.id], "status": "published"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.data.unwrap().affected, 1);
    assert_eq!(store.list_blogs(true).await.unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_blog_export_csv_with_id_subset() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let mut ids = Vec::new();
    for slug in ["kept", "skipped"] {
        let resp: ApiResponse<BlogResponse> = test::call_and_read_body_json(
            &app,
            TestRequest::post()
                .uri("/admin/v1/blogs")
                .set_json(serde_json::json!({
                    "title": format!("Post {}", slug),
                    "slug": slug,
                    "author": "Sam",
                }))
                .to_request(),
        )
        .await;
        ids.push(resp.data.unwrap().id);
    }

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!("/admin/v1/blogs/export?ids={}", ids[0]))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.starts_with("id,title,slug,author,category,status"));
    assert!(body.contains("kept"));
    assert!(!body.contains("skipped"));
}

// =============================================================================
// Bulk limits
// =============================================================================

#[actix_rt::test]
async fn test_bulk_size_limit_enforced() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let ids: Vec<String> = (0..5001).map(|i| format!("id-{}", i)).collect();
    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/admin/v1/searches/bulk/deactivate")
            .set_json(serde_json::json!({"ids": ids}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ApiResponse<()> = test::read_body_json(resp).await;
    assert_eq!(body.code, 1010);
}

// =============================================================================
// Analytics
// =============================================================================

#[actix_rt::test]
async fn test_analytics_overview_empty_store() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let resp: ApiResponse<AnalyticsOverview> = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/admin/v1/analytics/overview").to_request(),
    )
    .await;

    let overview = resp.data.unwrap();
    assert_eq!(overview.total_sessions, 0);
    assert_eq!(overview.total_clicks, 0);
}
