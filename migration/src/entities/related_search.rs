//! Related search buttons shown on the landing page and blog widgets
//!
//! `web_result_page` is a grouping value shared with web_results, not a
//! foreign key; it selects which result set the button reveals.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "related_searches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub search_text: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub title: Option<String>,
    pub web_result_page: i32,
    pub position: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub blog_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
