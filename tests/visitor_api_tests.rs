//! Visitor API integration tests
//!
//! Spins up the visitor scope against a temporary SQLite database and
//! walks the page chain end to end: session, landing, search click,
//! results page, result click, prelanding and email capture.

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use tempfile::TempDir;

use linkrotator::api::admin::types::ApiResponse;
use linkrotator::api::visitor::{
    BlogView, EmailSubmitResponse, LandingView, PrelandingView, SearchClickResponse,
    SessionInitResponse, visitor_scope,
};
use linkrotator::config::AnalyticsConfig;
use linkrotator::services::geoip::GeoIpProvider;
use linkrotator::services::redirect::{Destination, ResultsPage};
use linkrotator::services::ClickRecorder;
use linkrotator::storage::{
    BlogInput, ContentStore, PrelandingInput, RelatedSearchInput, WebResultInput,
};

async fn create_temp_store() -> (ContentStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("visitor_api_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let store = ContentStore::new(&db_url, "sqlite")
        .await
        .expect("Failed to create store");

    (store, temp_dir)
}

fn test_recorder(store: &ContentStore) -> ClickRecorder {
    // No MaxMind database and no resolvable client IP, so lookups no-op
    let geoip = GeoIpProvider::new(&AnalyticsConfig {
        maxminddb_path: None,
        geoip_api_url: "http://ip-api.com/json/{ip}".to_string(),
    });
    ClickRecorder::new(store.clone(), geoip)
}

macro_rules! test_app {
    ($store:expr) => {{
        let recorder = test_recorder(&$store);
        test::init_service(
            App::new()
                .app_data(web::Data::new($store.clone()))
                .app_data(web::Data::new(recorder))
                .service(visitor_scope("/api")),
        )
        .await
    }};
}

fn search_input(text: &str, page: i32) -> RelatedSearchInput {
    RelatedSearchInput {
        search_text: text.to_string(),
        title: None,
        web_result_page: page,
        position: 0,
        display_order: 0,
        is_active: true,
        blog_id: None,
    }
}

fn result_input(title: &str, link: &str, sponsored: bool) -> WebResultInput {
    WebResultInput {
        title: title.to_string(),
        description: None,
        original_link: link.to_string(),
        logo_url: None,
        web_result_page: 1,
        position: 0,
        is_sponsored: sponsored,
        prelanding_key: None,
        backlink: None,
        country_codes: None,
        worldwide: true,
        is_active: true,
    }
}

fn prelanding_input(headline: &str) -> PrelandingInput {
    PrelandingInput {
        headline: headline.to_string(),
        subtitle: None,
        description: None,
        logo_url: None,
        main_image_url: None,
        redirect_description: None,
        is_active: true,
    }
}

// =============================================================================
// Session
// =============================================================================

#[actix_rt::test]
async fn test_session_init_generates_token() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let resp: ApiResponse<SessionInitResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri("/api/session")
            .set_json(serde_json::json!({"session_id": null, "source": "google"}))
            .to_request(),
    )
    .await;

    let data = resp.data.unwrap();
    assert!(!data.session_id.is_empty());
    assert_eq!(data.storage_key, "linkrotator_session");
}

#[actix_rt::test]
async fn test_session_init_reuses_existing_token() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let resp: ApiResponse<SessionInitResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri("/api/session")
            .set_json(serde_json::json!({"session_id": "returning-visitor"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.data.unwrap().session_id, "returning-visitor");
    let sessions = store.recent_sessions().await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].session_id, "returning-visitor");
}

// =============================================================================
// Landing
// =============================================================================

#[actix_rt::test]
async fn test_landing_shows_only_active_searches() {
    let (store, _dir) = create_temp_store().await;

    store
        .upsert_landing_content("Find Deals".to_string(), "Best offers".to_string())
        .await
        .unwrap();
    store.create_related_search(search_input("visible", 1)).await.unwrap();
    let mut hidden = search_input("hidden", 1);
    hidden.is_active = false;
    store.create_related_search(hidden).await.unwrap();

    let app = test_app!(store);

    let resp: ApiResponse<LandingView> = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/api/landing").to_request(),
    )
    .await;

    let view = resp.data.unwrap();
    assert_eq!(view.content.unwrap().title, "Find Deals");
    assert_eq!(view.searches.len(), 1);
    assert_eq!(view.searches[0].search_text, "visible");
}

// =============================================================================
// Search clicks
// =============================================================================

#[actix_rt::test]
async fn test_search_click_routes_to_results_page() {
    let (store, _dir) = create_temp_store().await;
    let search = store.create_related_search(search_input("deals", 3)).await.unwrap();
    let app = test_app!(store);

    let resp: ApiResponse<SearchClickResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri("/api/clicks/search")
            .set_json(serde_json::json!({
                "session_id": "s1",
                "related_search_id": search.id,
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.data.unwrap().destination, "/webresult/3");
    assert_eq!(store.count_clicks_for_search(&search.id).await.unwrap(), 1);
}

#[actix_rt::test]
async fn test_search_click_on_inactive_search_is_404() {
    let (store, _dir) = create_temp_store().await;
    let mut input = search_input("off", 1);
    input.is_active = false;
    let search = store.create_related_search(input).await.unwrap();
    let app = test_app!(store);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/clicks/search")
            .set_json(serde_json::json!({
                "session_id": "s1",
                "related_search_id": search.id,
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.count_clicks_for_search(&search.id).await.unwrap(), 0);
}

// =============================================================================
// Results page
// =============================================================================

#[actix_rt::test]
async fn test_results_page_sponsored_first_with_masked_labels() {
    let (store, _dir) = create_temp_store().await;

    store
        .create_web_result(result_input("Organic", "https://organic.test/a", false))
        .await
        .unwrap();
    store
        .create_web_result(result_input("Paid", "https://paid.test/b", true))
        .await
        .unwrap();
    let mut inactive = result_input("Off", "https://off.test/c", true);
    inactive.is_active = false;
    store.create_web_result(inactive).await.unwrap();

    let app = test_app!(store);

    let resp: ApiResponse<ResultsPage> = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/api/results/1").to_request(),
    )
    .await;

    let page = resp.data.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.sponsored.len(), 1);
    assert_eq!(page.organic.len(), 1);
    assert_eq!(page.sponsored[0].display_link, "paid.test.lid=1");
    assert_eq!(page.organic[0].display_link, "organic.test");
}

#[actix_rt::test]
async fn test_results_page_accepts_wr_variant() {
    let (store, _dir) = create_temp_store().await;
    let app = test_app!(store);

    let resp: ApiResponse<ResultsPage> = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/api/results/wr=2").to_request(),
    )
    .await;
    assert_eq!(resp.data.unwrap().page, 2);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/api/results/garbage").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Result clicks
// =============================================================================

#[actix_rt::test]
async fn test_result_click_external_destination_and_counter() {
    let (store, _dir) = create_temp_store().await;
    let result = store
        .create_web_result(result_input("Direct", "https://direct.test/go", false))
        .await
        .unwrap();
    let app = test_app!(store);

    let resp: ApiResponse<Destination> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri("/api/clicks/result")
            .set_json(serde_json::json!({
                "session_id": "s1",
                "web_result_id": result.id,
            }))
            .to_request(),
    )
    .await;

    match resp.data.unwrap() {
        Destination::External { url } => assert_eq!(url, "https://direct.test/go"),
        other => panic!("expected external destination, got {:?}", other),
    }

    let counter = store.get_link_counter(&result.id).await.unwrap().unwrap();
    assert_eq!(counter.total_clicks, 1);
}

#[actix_rt::test]
async fn test_result_click_prelanding_destination() {
    let (store, _dir) = create_temp_store().await;

    let prelanding = store
        .create_prelanding(prelanding_input("Claim Your Offer"))
        .await
        .unwrap();
    let mut input = result_input("Gated", "https://gated.test/offer?x=1", true);
    input.prelanding_key = Some(prelanding.key.clone());
    let result = store.create_web_result(input).await.unwrap();

    let app = test_app!(store);

    let resp: ApiResponse<Destination> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri("/api/clicks/result")
            .set_json(serde_json::json!({
                "session_id": "s1",
                "web_result_id": result.id,
            }))
            .to_request(),
    )
    .await;

    match resp.data.unwrap() {
        Destination::Prelanding { key, url } => {
            assert_eq!(key, prelanding.key);
            assert_eq!(
                url,
                format!(
                    "/prelanding/{}?redirect=https%3A%2F%2Fgated.test%2Foffer%3Fx%3D1&rid={}",
                    prelanding.key, result.id
                )
            );
        }
        other => panic!("expected prelanding destination, got {:?}", other),
    }
}

// =============================================================================
// Prelanding and email capture
// =============================================================================

#[actix_rt::test]
async fn test_prelanding_view_and_missing_key() {
    let (store, _dir) = create_temp_store().await;
    let prelanding = store
        .create_prelanding(prelanding_input("Almost There"))
        .await
        .unwrap();
    let app = test_app!(store);

    let resp: ApiResponse<PrelandingView> = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri(&format!("/api/prelanding/{}", prelanding.key))
            .to_request(),
    )
    .await;

    let view = resp.data.unwrap();
    assert_eq!(view.headline, "Almost There");
    assert_eq!(view.redirect_delay_ms, 1500);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/api/prelanding/no-such-key").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_email_capture_releases_redirect() {
    let (store, _dir) = create_temp_store().await;
    let prelanding = store
        .create_prelanding(prelanding_input("Sign Up"))
        .await
        .unwrap();
    let app = test_app!(store);

    let resp: ApiResponse<EmailSubmitResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri(&format!("/api/prelanding/{}/email", prelanding.key))
            .set_json(serde_json::json!({
                "email": "visitor@example.com",
                "redirect": "https://external.test/landing",
                "rid": "r1",
            }))
            .to_request(),
    )
    .await;

    let data = resp.data.unwrap();
    assert_eq!(data.redirect_url, "https://external.test/landing");
    assert_eq!(data.delay_ms, 1500);

    let captures = store.list_email_captures().await.unwrap();
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].email, "visitor@example.com");
    assert_eq!(captures[0].web_result_id.as_deref(), Some("r1"));
}

#[actix_rt::test]
async fn test_email_capture_rejects_empty_email() {
    let (store, _dir) = create_temp_store().await;
    let prelanding = store
        .create_prelanding(prelanding_input("Sign Up"))
        .await
        .unwrap();
    let app = test_app!(store);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri(&format!("/api/prelanding/{}/email", prelanding.key))
            .set_json(serde_json::json!({
                "email": "   ",
                "redirect": "https://external.test/landing",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(store.list_email_captures().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_email_capture_accepts_any_non_empty_string() {
    // Format checking lives in the frontend; the server only requires
    // a non-empty value and still releases the redirect
    let (store, _dir) = create_temp_store().await;
    let prelanding = store
        .create_prelanding(prelanding_input("Sign Up"))
        .await
        .unwrap();
    let app = test_app!(store);

    let resp: ApiResponse<EmailSubmitResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri(&format!("/api/prelanding/{}/email", prelanding.key))
            .set_json(serde_json::json!({
                "email": "test",
                "redirect": "https://external.test/landing",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.data.unwrap().redirect_url, "https://external.test/landing");
    let captures = store.list_email_captures().await.unwrap();
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].email, "test");
}

// =============================================================================
// Blogs
// =============================================================================

#[actix_rt::test]
async fn test_blog_detail_includes_attached_searches() {
    let (store, _dir) = create_temp_store().await;

    let blog = store
        .create_blog(BlogInput {
            title: "Deep Dive".to_string(),
            slug: "deep-dive".to_string(),
            author: None,
            category: None,
            content: Some("Body".to_string()),
            featured_image: None,
            status: "published".to_string(),
            related_search_id: None,
        })
        .await
        .unwrap();

    let mut attached = search_input("from the blog", 1);
    attached.blog_id = Some(blog.id.clone());
    store.create_related_search(attached).await.unwrap();
    store.create_related_search(search_input("unrelated", 1)).await.unwrap();

    let app = test_app!(store);

    let resp: ApiResponse<BlogView> = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/api/blogs/deep-dive").to_request(),
    )
    .await;

    let view = resp.data.unwrap();
    assert_eq!(view.blog.slug, "deep-dive");
    assert_eq!(view.searches.len(), 1);
    assert_eq!(view.searches[0].search_text, "from the blog");
}

#[actix_rt::test]
async fn test_draft_blog_is_not_served() {
    let (store, _dir) = create_temp_store().await;

    store
        .create_blog(BlogInput {
            title: "Unfinished".to_string(),
            slug: "unfinished".to_string(),
            author: None,
            category: None,
            content: None,
            featured_image: None,
            status: "draft".to_string(),
            related_search_id: None,
        })
        .await
        .unwrap();

    let app = test_app!(store);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/api/blogs/unfinished").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
