//! Admin API type definitions

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use migration::entities::{blog, email_capture, landing_content, prelanding, related_search, web_result};

/// Output path for generated TypeScript bindings
pub const TS_EXPORT_PATH: &str = "../admin-panel/src/services/types.generated.ts";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

// ---- Entity responses ----

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LandingContentResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub updated_at: String,
}

impl From<landing_content::Model> for LandingContentResponse {
    fn from(m: landing_content::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct RelatedSearchResponse {
    pub id: String,
    pub search_text: String,
    pub title: Option<String>,
    pub web_result_page: i32,
    pub position: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub blog_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<related_search::Model> for RelatedSearchResponse {
    fn from(m: related_search::Model) -> Self {
        Self {
            id: m.id,
            search_text: m.search_text,
            title: m.title,
            web_result_page: m.web_result_page,
            position: m.position,
            display_order: m.display_order,
            is_active: m.is_active,
            blog_id: m.blog_id,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct WebResultResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub original_link: String,
    pub logo_url: Option<String>,
    pub web_result_page: i32,
    pub position: i32,
    pub is_sponsored: bool,
    pub prelanding_key: Option<String>,
    pub backlink: Option<String>,
    pub country_codes: Option<String>,
    pub worldwide: bool,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<web_result::Model> for WebResultResponse {
    fn from(m: web_result::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            original_link: m.original_link,
            logo_url: m.logo_url,
            web_result_page: m.web_result_page,
            position: m.position,
            is_sponsored: m.is_sponsored,
            prelanding_key: m.prelanding_key,
            backlink: m.backlink,
            country_codes: m.country_codes,
            worldwide: m.worldwide,
            is_active: m.is_active,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PrelandingResponse {
    pub id: String,
    pub key: String,
    pub headline: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub main_image_url: Option<String>,
    pub redirect_description: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<prelanding::Model> for PrelandingResponse {
    fn from(m: prelanding::Model) -> Self {
        Self {
            id: m.id,
            key: m.key,
            headline: m.headline,
            subtitle: m.subtitle,
            description: m.description,
            logo_url: m.logo_url,
            main_image_url: m.main_image_url,
            redirect_description: m.redirect_description,
            is_active: m.is_active,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct BlogResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<String>,
    pub status: String,
    pub related_search_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<blog::Model> for BlogResponse {
    fn from(m: blog::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            slug: m.slug,
            author: m.author,
            category: m.category,
            content: m.content,
            featured_image: m.featured_image,
            status: m.status,
            related_search_id: m.related_search_id,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct EmailCaptureResponse {
    pub id: String,
    pub email: String,
    pub prelanding_key: String,
    pub web_result_id: Option<String>,
    pub created_at: String,
}

impl From<email_capture::Model> for EmailCaptureResponse {
    fn from(m: email_capture::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            prelanding_key: m.prelanding_key,
            web_result_id: m.web_result_id,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

// ---- Create/update payloads ----

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LandingPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct RelatedSearchPayload {
    pub search_text: String,
    pub title: Option<String>,
    pub web_result_page: Option<i32>,
    pub position: Option<i32>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    pub blog_id: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct WebResultPayload {
    pub title: String,
    pub description: Option<String>,
    pub original_link: String,
    pub logo_url: Option<String>,
    pub web_result_page: Option<i32>,
    pub position: Option<i32>,
    pub is_sponsored: Option<bool>,
    pub prelanding_key: Option<String>,
    pub backlink: Option<String>,
    pub country_codes: Option<String>,
    pub worldwide: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PrelandingPayload {
    pub headline: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub main_image_url: Option<String>,
    pub redirect_description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct BlogPayload {
    pub title: String,
    pub slug: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<String>,
    pub related_search_id: Option<String>,
}

// ---- Bulk operations ----

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct BulkIdsRequest {
    pub ids: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct BulkStatusRequest {
    pub ids: Vec<String>,
    pub status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct BulkUpdateResponse {
    pub affected: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct BatchResponse {
    pub success: Vec<String>,
    pub failed: Vec<BatchFailedItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct BatchFailedItem {
    pub id: String,
    pub error: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ExportQuery {
    /// Comma-separated id subset; absent exports everything
    pub ids: Option<String>,
}

// ---- AI assist ----

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct GenerateBlogContentRequest {
    pub title: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct GenerateWebResultsRequest {
    pub search_text: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct GenerateBlogImageRequest {
    pub title: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct GeneratedImageResponse {
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ts_rs::TS;

    #[test]
    fn export_typescript_types() {
        // Running this test regenerates the TypeScript bindings:
        // cargo test export_typescript_types -- --nocapture

        use crate::api::admin::error_code::ErrorCode;
        use crate::api::visitor::{
            BlogView, EmailSubmitRequest, EmailSubmitResponse, LandingView, PrelandingView,
            ResultClickRequest, SearchClickRequest, SearchClickResponse, SessionInitRequest,
            SessionInitResponse,
        };
        use crate::services::assist::{BlogContentDraft, GeneratedWebResult};
        use crate::services::redirect::{Destination, ResultListing, ResultsPage};
        use crate::services::session::DeviceType;
        use crate::storage::{
            AnalyticsOverview, ClickDetailRow, ClickDetails, SearchClickCount, SessionSummary,
        };

        let cfg = ts_rs::Config::from_env();

        // Entity responses
        LandingContentResponse::export_all(&cfg).expect("Failed to export LandingContentResponse");
        RelatedSearchResponse::export_all(&cfg).expect("Failed to export RelatedSearchResponse");
        WebResultResponse::export_all(&cfg).expect("Failed to export WebResultResponse");
        PrelandingResponse::export_all(&cfg).expect("Failed to export PrelandingResponse");
        BlogResponse::export_all(&cfg).expect("Failed to export BlogResponse");
        EmailCaptureResponse::export_all(&cfg).expect("Failed to export EmailCaptureResponse");

        // Payloads and bulk ops
        LandingPayload::export_all(&cfg).expect("Failed to export LandingPayload");
        RelatedSearchPayload::export_all(&cfg).expect("Failed to export RelatedSearchPayload");
        WebResultPayload::export_all(&cfg).expect("Failed to export WebResultPayload");
        PrelandingPayload::export_all(&cfg).expect("Failed to export PrelandingPayload");
        BlogPayload::export_all(&cfg).expect("Failed to export BlogPayload");
        BulkIdsRequest::export_all(&cfg).expect("Failed to export BulkIdsRequest");
        BulkStatusRequest::export_all(&cfg).expect("Failed to export BulkStatusRequest");
        BulkUpdateResponse::export_all(&cfg).expect("Failed to export BulkUpdateResponse");
        BatchResponse::export_all(&cfg).expect("Failed to export BatchResponse");
        BatchFailedItem::export_all(&cfg).expect("Failed to export BatchFailedItem");
        ExportQuery::export_all(&cfg).expect("Failed to export ExportQuery");

        // Assist
        GenerateBlogContentRequest::export_all(&cfg).expect("Failed to export GenerateBlogContentRequest");
        GenerateWebResultsRequest::export_all(&cfg).expect("Failed to export GenerateWebResultsRequest");
        GenerateBlogImageRequest::export_all(&cfg).expect("Failed to export GenerateBlogImageRequest");
        GeneratedImageResponse::export_all(&cfg).expect("Failed to export GeneratedImageResponse");
        BlogContentDraft::export_all(&cfg).expect("Failed to export BlogContentDraft");
        GeneratedWebResult::export_all(&cfg).expect("Failed to export GeneratedWebResult");

        // Analytics
        AnalyticsOverview::export_all(&cfg).expect("Failed to export AnalyticsOverview");
        SessionSummary::export_all(&cfg).expect("Failed to export SessionSummary");
        SearchClickCount::export_all(&cfg).expect("Failed to export SearchClickCount");
        ClickDetailRow::export_all(&cfg).expect("Failed to export ClickDetailRow");
        ClickDetails::export_all(&cfg).expect("Failed to export ClickDetails");

        // Visitor flow
        DeviceType::export_all(&cfg).expect("Failed to export DeviceType");
        Destination::export_all(&cfg).expect("Failed to export Destination");
        ResultListing::export_all(&cfg).expect("Failed to export ResultListing");
        ResultsPage::export_all(&cfg).expect("Failed to export ResultsPage");
        SessionInitRequest::export_all(&cfg).expect("Failed to export SessionInitRequest");
        SessionInitResponse::export_all(&cfg).expect("Failed to export SessionInitResponse");
        LandingView::export_all(&cfg).expect("Failed to export LandingView");
        SearchClickRequest::export_all(&cfg).expect("Failed to export SearchClickRequest");
        SearchClickResponse::export_all(&cfg).expect("Failed to export SearchClickResponse");
        ResultClickRequest::export_all(&cfg).expect("Failed to export ResultClickRequest");
        PrelandingView::export_all(&cfg).expect("Failed to export PrelandingView");
        EmailSubmitRequest::export_all(&cfg).expect("Failed to export EmailSubmitRequest");
        EmailSubmitResponse::export_all(&cfg).expect("Failed to export EmailSubmitResponse");
        BlogView::export_all(&cfg).expect("Failed to export BlogView");

        ErrorCode::export_all(&cfg).expect("Failed to export ErrorCode");

        println!("TypeScript types exported to {}", TS_EXPORT_PATH);
    }
}
