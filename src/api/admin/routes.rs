//! Admin API route configuration
//!
//! Routes under /v1 are split by entity to keep each module small.

use actix_web::web;

use super::analytics::{get_click_details, get_overview, get_search_clicks, get_sessions};
use super::assist_ops::{generate_blog_content, generate_blog_image, generate_web_results};
use super::blogs::{
    bulk_delete_blogs, bulk_set_blog_status, delete_blog, export_blogs, get_blog, list_blogs,
    post_blog, update_blog,
};
use super::emails::{export_emails, list_emails};
use super::landing::{get_landing, put_landing};
use super::prelandings::{
    bulk_activate_prelandings, bulk_deactivate_prelandings, bulk_delete_prelandings,
    delete_prelanding, get_prelanding, list_prelandings, post_prelanding, update_prelanding,
};
use super::results::{
    bulk_activate_results, bulk_deactivate_results, bulk_delete_results, delete_result,
    export_results, get_result, list_results, post_result, update_result,
};
use super::searches::{
    bulk_activate_searches, bulk_deactivate_searches, bulk_delete_searches, delete_search,
    export_searches, get_search, list_searches, post_search, update_search,
};

/// Landing content routes `/landing`
pub fn landing_routes() -> actix_web::Scope {
    web::scope("/landing")
        .route("", web::get().to(get_landing))
        .route("", web::put().to(put_landing))
}

/// Related-search routes `/searches`
///
/// Bulk and export routes must register before `/{id}`.
pub fn searches_routes() -> actix_web::Scope {
    web::scope("/searches")
        .route("", web::get().to(list_searches))
        .route("", web::post().to(post_search))
        .route("/bulk/activate", web::post().to(bulk_activate_searches))
        .route("/bulk/deactivate", web::post().to(bulk_deactivate_searches))
        .route("/bulk", web::delete().to(bulk_delete_searches))
        .route("/export", web::get().to(export_searches))
        .route("/{id}", web::get().to(get_search))
        .route("/{id}", web::put().to(update_search))
        .route("/{id}", web::delete().to(delete_search))
}

/// Web-result routes `/results`
pub fn results_routes() -> actix_web::Scope {
    web::scope("/results")
        .route("", web::get().to(list_results))
        .route("", web::post().to(post_result))
        .route("/bulk/activate", web::post().to(bulk_activate_results))
        .route("/bulk/deactivate", web::post().to(bulk_deactivate_results))
        .route("/bulk", web::delete().to(bulk_delete_results))
        .route("/export", web::get().to(export_results))
        .route("/{id}", web::get().to(get_result))
        .route("/{id}", web::put().to(update_result))
        .route("/{id}", web::delete().to(delete_result))
}

/// Prelanding routes `/prelandings`
pub fn prelandings_routes() -> actix_web::Scope {
    web::scope("/prelandings")
        .route("", web::get().to(list_prelandings))
        .route("", web::post().to(post_prelanding))
        .route("/bulk/activate", web::post().to(bulk_activate_prelandings))
        .route(
            "/bulk/deactivate",
            web::post().to(bulk_deactivate_prelandings),
        )
        .route("/bulk", web::delete().to(bulk_delete_prelandings))
        .route("/{id}", web::get().to(get_prelanding))
        .route("/{id}", web::put().to(update_prelanding))
        .route("/{id}", web::delete().to(delete_prelanding))
}

/// Blog routes `/blogs`
pub fn blogs_routes() -> actix_web::Scope {
    web::scope("/blogs")
        .route("", web::get().to(list_blogs))
        .route("", web::post().to(post_blog))
        .route("/bulk/status", web::post().to(bulk_set_blog_status))
        .route("/bulk", web::delete().to(bulk_delete_blogs))
        .route("/export", web::get().to(export_blogs))
        .route("/{id}", web::get().to(get_blog))
        .route("/{id}", web::put().to(update_blog))
        .route("/{id}", web::delete().to(delete_blog))
}

/// Email-capture routes `/emails`
pub fn emails_routes() -> actix_web::Scope {
    web::scope("/emails")
        .route("", web::get().to(list_emails))
        .route("/export", web::get().to(export_emails))
}

/// Analytics routes `/analytics`
pub fn analytics_routes() -> actix_web::Scope {
    web::scope("/analytics")
        .route("/overview", web::get().to(get_overview))
        .route("/sessions", web::get().to(get_sessions))
        .route("/search-clicks", web::get().to(get_search_clicks))
        .route("/click-details", web::get().to(get_click_details))
}

/// AI assist routes `/assist`
pub fn assist_routes() -> actix_web::Scope {
    web::scope("/assist")
        .route("/blog-content", web::post().to(generate_blog_content))
        .route("/web-results", web::post().to(generate_web_results))
        .route("/blog-image", web::post().to(generate_blog_image))
}

/// Admin API v1 routes, combining all entity sub-scopes
pub fn admin_v1_routes() -> actix_web::Scope {
    web::scope("/v1")
        .service(landing_routes())
        .service(searches_routes())
        .service(results_routes())
        .service(prelandings_routes())
        .service(blogs_routes())
        .service(emails_routes())
        .service(analytics_routes())
        .service(assist_routes())
}
