//! Visitor tracking writes: session upserts, click log appends, and the
//! per-result click counter.

use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, QueryFilter};
use tracing::trace;

use crate::errors::Result;

use migration::entities::{click_event, email_capture, link_click, session};

use super::{ContentStore, new_id, now};

pub struct SessionVisit {
    pub session_id: String,
    pub device_type: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub country: Option<String>,
    pub source: Option<String>,
}

pub struct NewClick {
    pub session_id: String,
    pub click_type: String,
    pub related_search_id: Option<String>,
    pub link_id: Option<String>,
    pub device_type: Option<String>,
    pub ip_address: Option<String>,
    pub country: Option<String>,
}

impl ContentStore {
    /// Upsert a session row keyed by the client token, last-write-wins
    pub async fn upsert_session(&self, visit: SessionVisit) -> Result<()> {
        let model = session::ActiveModel {
            id: Set(new_id()),
            session_id: Set(visit.session_id),
            device_type: Set(visit.device_type),
            user_agent: Set(visit.user_agent),
            ip_address: Set(visit.ip_address),
            country: Set(visit.country),
            source: Set(visit.source),
            created_at: Set(now()),
            last_activity: Set(now()),
        };

        session::Entity::insert(model)
            .on_conflict(
                OnConflict::column(session::Column::SessionId)
                    .update_columns([
                        session::Column::DeviceType,
                        session::Column::UserAgent,
                        session::Column::IpAddress,
                        session::Column::Country,
                        session::Column::Source,
                        session::Column::LastActivity,
                    ])
                    .to_owned(),
            )
            .exec(self.db())
            .await?;

        Ok(())
    }

    /// Append one click row; rows are never updated afterwards
    pub async fn insert_click(&self, click: NewClick) -> Result<()> {
        let model = click_event::ActiveModel {
            id: Set(new_id()),
            session_id: Set(click.session_id),
            click_type: Set(click.click_type),
            related_search_id: Set(click.related_search_id),
            link_id: Set(click.link_id),
            device_type: Set(click.device_type),
            ip_address: Set(click.ip_address),
            country: Set(click.country),
            timestamp: Set(now()),
        };
        model.insert(self.db()).await?;
        Ok(())
    }

    /// Atomically bump the counter for a web result.
    ///
    /// Single UPDATE with a database-side increment; when no counter row
    /// exists yet, insert the initial row. An insert losing the race to a
    /// concurrent first click falls back to the update path once.
    pub async fn increment_link_counter(&self, web_result_id: &str) -> Result<()> {
        if self.try_increment(web_result_id).await? {
            return Ok(());
        }

        let model = link_click::ActiveModel {
            id: Set(new_id()),
            web_result_id: Set(web_result_id.to_string()),
            total_clicks: Set(1),
            // never deduplicated afterwards, kept for schema compatibility
            unique_clicks: Set(1),
            updated_at: Set(now()),
        };

        match model.insert(self.db()).await {
            Ok(_) => {
                trace!("Link counter created for {}", web_result_id);
                Ok(())
            }
            Err(e) if Self::is_unique_violation(&e) => {
                self.try_increment(web_result_id).await?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn try_increment(&self, web_result_id: &str) -> Result<bool> {
        let result = link_click::Entity::update_many()
            .col_expr(
                link_click::Column::TotalClicks,
                Expr::col(link_click::Column::TotalClicks).add(1),
            )
            .col_expr(link_click::Column::UpdatedAt, Expr::value(now()))
            .filter(link_click::Column::WebResultId.eq(web_result_id))
            .exec(self.db())
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn get_link_counter(&self, web_result_id: &str) -> Result<Option<link_click::Model>> {
        Ok(link_click::Entity::find()
            .filter(link_click::Column::WebResultId.eq(web_result_id))
            .one(self.db())
            .await?)
    }

    /// Append one captured email before the final redirect
    pub async fn insert_email_capture(
        &self,
        email: String,
        prelanding_key: String,
        web_result_id: Option<String>,
    ) -> Result<()> {
        let model = email_capture::ActiveModel {
            id: Set(new_id()),
            email: Set(email),
            prelanding_key: Set(prelanding_key),
            web_result_id: Set(web_result_id),
            created_at: Set(now()),
        };
        model.insert(self.db()).await?;
        Ok(())
    }
}
