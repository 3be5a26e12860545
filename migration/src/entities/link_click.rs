//! Denormalized per-result click counters
//!
//! `unique_clicks` is set to 1 when a counter row is first created and is
//! never deduplicated afterwards; it is kept for schema compatibility only.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "link_clicks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub web_result_id: String,
    pub total_clicks: i64,
    pub unique_clicks: i64,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
