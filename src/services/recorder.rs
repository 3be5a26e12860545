//! Click/session recorder
//!
//! Stamps every visit and click with device type, client IP and GeoIP
//! country, then writes through the store. Recording failures are logged
//! and never surfaced to the visitor.

use tracing::{debug, warn};

use crate::errors::Result;
use crate::services::geoip::GeoIpProvider;
use crate::services::session::classify_device;
use crate::storage::{
    CLICK_TYPE_RELATED_SEARCH, CLICK_TYPE_WEB_RESULT, ContentStore, NewClick, SessionVisit,
};

#[derive(Clone)]
pub struct ClickRecorder {
    store: ContentStore,
    geoip: GeoIpProvider,
}

/// Request-scoped visitor context extracted by the API layer
#[derive(Debug, Clone, Default)]
pub struct VisitorContext {
    pub session_id: String,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub source: Option<String>,
}

impl ClickRecorder {
    pub fn new(store: ContentStore, geoip: GeoIpProvider) -> Self {
        Self { store, geoip }
    }

    /// Upsert the session row for a landing visit, last-write-wins
    pub async fn record_landing_visit(&self, ctx: &VisitorContext) -> Result<()> {
        let device_type = ctx
            .user_agent
            .as_deref()
            .map(|ua| classify_device(ua).as_str().to_string());
        let country = self.geoip.lookup_country(ctx.ip_address.as_deref()).await;

        self.store
            .upsert_session(SessionVisit {
                session_id: ctx.session_id.clone(),
                device_type,
                user_agent: ctx.user_agent.clone(),
                ip_address: ctx.ip_address.clone(),
                country,
                source: ctx.source.clone(),
            })
            .await?;

        debug!("Session visit recorded: {}", ctx.session_id);
        Ok(())
    }

    /// Append a related-search click
    pub async fn record_search_click(
        &self,
        ctx: &VisitorContext,
        related_search_id: &str,
    ) -> Result<()> {
        self.record(ctx, CLICK_TYPE_RELATED_SEARCH, Some(related_search_id), None)
            .await
    }

    /// Append a web-result click and bump its counter
    pub async fn record_result_click(&self, ctx: &VisitorContext, web_result_id: &str) -> Result<()> {
        self.record(ctx, CLICK_TYPE_WEB_RESULT, None, Some(web_result_id))
            .await?;

        // Counter failure does not invalidate the click row already written
        if let Err(e) = self.store.increment_link_counter(web_result_id).await {
            warn!("Link counter increment failed for {}: {}", web_result_id, e);
        }
        Ok(())
    }

    async fn record(
        &self,
        ctx: &VisitorContext,
        click_type: &str,
        related_search_id: Option<&str>,
        link_id: Option<&str>,
    ) -> Result<()> {
        let device_type = ctx
            .user_agent
            .as_deref()
            .map(|ua| classify_device(ua).as_str().to_string());
        let country = self.geoip.lookup_country(ctx.ip_address.as_deref()).await;

        self.store
            .insert_click(NewClick {
                session_id: ctx.session_id.clone(),
                click_type: click_type.to_string(),
                related_search_id: related_search_id.map(String::from),
                link_id: link_id.map(String::from),
                device_type,
                ip_address: ctx.ip_address.clone(),
                country,
            })
            .await?;

        debug!("{} click recorded for session {}", click_type, ctx.session_id);
        Ok(())
    }
}
