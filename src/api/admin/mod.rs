//! Admin management API
//!
//! JSON API consumed by the admin panel, mounted at
//! `{admin_prefix}/v1`. All responses use the `ApiResponse` envelope.

pub mod analytics;
pub mod assist_ops;
pub mod batch;
pub mod blogs;
pub mod emails;
pub mod error_code;
pub mod helpers;
pub mod landing;
pub mod prelandings;
pub mod results;
pub mod routes;
pub mod searches;
pub mod types;

pub use routes::admin_v1_routes;
