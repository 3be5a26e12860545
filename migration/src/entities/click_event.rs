//! Append-only click log
//!
//! `click_type` is either `related_search` (then related_search_id is set)
//! or `web_result` (then link_id is set). Rows are never updated; they are
//! removed only by the admin cascade when their parent entity is deleted.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "click_tracking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub session_id: String,
    pub click_type: String,
    pub related_search_id: Option<String>,
    pub link_id: Option<String>,
    pub device_type: Option<String>,
    pub ip_address: Option<String>,
    pub country: Option<String>,
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
