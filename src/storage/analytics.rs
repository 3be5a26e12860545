//! Read-only analytics aggregations for the admin console

use std::collections::{HashMap, HashSet};

use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::api::admin::types::TS_EXPORT_PATH;
use crate::errors::Result;

use migration::entities::{click_event, related_search, session};

use super::ContentStore;

const RECENT_SESSIONS_LIMIT: u64 = 50;
const CLICK_DETAIL_LIMIT: u64 = 200;

pub const CLICK_TYPE_RELATED_SEARCH: &str = "related_search";
pub const CLICK_TYPE_WEB_RESULT: &str = "web_result";

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct AnalyticsOverview {
    pub total_sessions: u64,
    pub total_clicks: u64,
    pub search_clicks: u64,
    /// Mirrors total_clicks; the panel shows it as "page views"
    pub page_views: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SessionSummary {
    pub session_id: String,
    pub device_type: Option<String>,
    pub country: Option<String>,
    pub source: Option<String>,
    pub last_activity: String,
    pub total_clicks: u64,
    pub search_clicks: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SearchClickCount {
    pub id: String,
    pub search_text: String,
    pub title: Option<String>,
    pub click_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ClickDetailRow {
    pub id: String,
    pub session_id: String,
    pub click_type: String,
    pub related_search_id: Option<String>,
    pub link_id: Option<String>,
    pub device_type: Option<String>,
    pub country: Option<String>,
    pub ip_address: Option<String>,
    pub timestamp: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ClickDetails {
    pub clicks: Vec<ClickDetailRow>,
    pub unique_ip_count: usize,
}

/// One GROUP BY bucket from the click table
#[derive(FromQueryResult)]
struct GroupedCount {
    group_id: String,
    click_count: i64,
}

impl ContentStore {
    pub async fn analytics_overview(&self) -> Result<AnalyticsOverview> {
        let total_sessions = session::Entity::find().count(self.db()).await?;
        let total_clicks = click_event::Entity::find().count(self.db()).await?;
        let search_clicks = click_event::Entity::find()
            .filter(click_event::Column::ClickType.eq(CLICK_TYPE_RELATED_SEARCH))
            .count(self.db())
            .await?;

        Ok(AnalyticsOverview {
            total_sessions,
            total_clicks,
            search_clicks,
            page_views: total_clicks,
        })
    }

    /// Latest sessions by activity, each with its click counts
    pub async fn recent_sessions(&self) -> Result<Vec<SessionSummary>> {
        let sessions = session::Entity::find()
            .order_by_desc(session::Column::LastActivity)
            .limit(RECENT_SESSIONS_LIMIT)
            .all(self.db())
            .await?;

        let session_ids: Vec<String> = sessions.iter().map(|s| s.session_id.clone()).collect();
        let total_counts = self.clicks_by_session(&session_ids, None).await?;
        let search_counts = self
            .clicks_by_session(&session_ids, Some(CLICK_TYPE_RELATED_SEARCH))
            .await?;

        Ok(sessions
            .into_iter()
            .map(|s| {
                let total_clicks = total_counts.get(&s.session_id).copied().unwrap_or(0);
                let search_clicks = search_counts.get(&s.session_id).copied().unwrap_or(0);
                SessionSummary {
                    session_id: s.session_id,
                    device_type: s.device_type,
                    country: s.country,
                    source: s.source,
                    last_activity: s.last_activity.to_rfc3339(),
                    total_clicks,
                    search_clicks,
                }
            })
            .collect())
    }

    /// Per-session click totals for the given window, one grouped query
    async fn clicks_by_session(
        &self,
        session_ids: &[String],
        click_type: Option<&str>,
    ) -> Result<HashMap<String, u64>> {
        if session_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query = click_event::Entity::find()
            .select_only()
            .column_as(click_event::Column::SessionId, "group_id")
            .column_as(click_event::Column::Id.count(), "click_count")
            .filter(click_event::Column::SessionId.is_in(session_ids.iter().cloned()))
            .group_by(click_event::Column::SessionId);
        if let Some(click_type) = click_type {
            query = query.filter(click_event::Column::ClickType.eq(click_type));
        }

        let rows = query.into_model::<GroupedCount>().all(self.db()).await?;
        Ok(rows
            .into_iter()
            .map(|r| (r.group_id, r.click_count.max(0) as u64))
            .collect())
    }

    /// Click totals per related search, most clicked first
    pub async fn search_click_counts(&self) -> Result<Vec<SearchClickCount>> {
        let searches = related_search::Entity::find().all(self.db()).await?;

        let rows = click_event::Entity::find()
            .select_only()
            .column_as(click_event::Column::RelatedSearchId, "group_id")
            .column_as(click_event::Column::Id.count(), "click_count")
            .filter(click_event::Column::ClickType.eq(CLICK_TYPE_RELATED_SEARCH))
            .filter(click_event::Column::RelatedSearchId.is_not_null())
            .group_by(click_event::Column::RelatedSearchId)
            .into_model::<GroupedCount>()
            .all(self.db())
            .await?;
        let by_search: HashMap<String, u64> = rows
            .into_iter()
            .map(|r| (r.group_id, r.click_count.max(0) as u64))
            .collect();

        let mut counts: Vec<SearchClickCount> = searches
            .into_iter()
            .map(|search| SearchClickCount {
                click_count: by_search.get(&search.id).copied().unwrap_or(0),
                id: search.id,
                search_text: search.search_text,
                title: search.title,
            })
            .collect();

        counts.sort_by(|a, b| b.click_count.cmp(&a.click_count));
        Ok(counts)
    }

    pub async fn count_clicks_for_search(&self, related_search_id: &str) -> Result<u64> {
        Ok(click_event::Entity::find()
            .filter(click_event::Column::ClickType.eq(CLICK_TYPE_RELATED_SEARCH))
            .filter(click_event::Column::RelatedSearchId.eq(related_search_id))
            .count(self.db())
            .await?)
    }

    /// Newest clicks (optionally for one search) plus a distinct-IP count
    /// over the returned window
    pub async fn click_details(
        &self,
        related_search_id: Option<&str>,
    ) -> Result<ClickDetails> {
        let mut query = click_event::Entity::find()
            .order_by_desc(click_event::Column::Timestamp)
            .limit(CLICK_DETAIL_LIMIT);
        if let Some(id) = related_search_id {
            query = query.filter(click_event::Column::RelatedSearchId.eq(id));
        }

        let rows = query.all(self.db()).await?;

        let unique_ip_count = rows
            .iter()
            .filter_map(|r| r.ip_address.as_deref())
            .collect::<HashSet<_>>()
            .len();

        let clicks = rows
            .into_iter()
            .map(|r| ClickDetailRow {
                id: r.id,
                session_id: r.session_id,
                click_type: r.click_type,
                related_search_id: r.related_search_id,
                link_id: r.link_id,
                device_type: r.device_type,
                country: r.country,
                ip_address: r.ip_address,
                timestamp: r.timestamp.to_rfc3339(),
            })
            .collect();

        Ok(ClickDetails {
            clicks,
            unique_ip_count,
        })
    }
}
