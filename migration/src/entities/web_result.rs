//! Web result listings (sponsored or organic) on a numbered results page
//!
//! `country_codes` is a comma-separated list of ISO codes; empty plus
//! `worldwide = true` means no geo targeting.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "web_results")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub original_link: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub logo_url: Option<String>,
    pub web_result_page: i32,
    pub position: i32,
    pub is_sponsored: bool,
    pub prelanding_key: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub backlink: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub country_codes: Option<String>,
    pub worldwide: bool,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
