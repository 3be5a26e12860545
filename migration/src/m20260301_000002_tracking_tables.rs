//! Tracking tables migration
//!
//! Creates the visitor attribution tables:
//! - sessions (one row per browser, upserted on every landing visit)
//! - click_tracking (append-only click log)
//! - link_clicks (denormalized per-result counters)
//! - email_captures (pre-landing submissions)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sessions::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Sessions::SessionId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sessions::DeviceType).string_len(16).null())
                    .col(ColumnDef::new(Sessions::UserAgent).text().null())
                    .col(ColumnDef::new(Sessions::IpAddress).string_len(45).null())
                    .col(ColumnDef::new(Sessions::Country).string_len(2).null())
                    .col(ColumnDef::new(Sessions::Source).string_len(255).null())
                    .col(
                        ColumnDef::new(Sessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Sessions::LastActivity)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // session_id is the upsert conflict key
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sessions_session_id")
                    .table(Sessions::Table)
                    .col(Sessions::SessionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClickTracking::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClickTracking::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClickTracking::SessionId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClickTracking::ClickType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClickTracking::RelatedSearchId)
                            .string_len(36)
                            .null(),
                    )
                    .col(ColumnDef::new(ClickTracking::LinkId).string_len(36).null())
                    .col(
                        ColumnDef::new(ClickTracking::DeviceType)
                            .string_len(16)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ClickTracking::IpAddress)
                            .string_len(45)
                            .null(),
                    )
                    .col(ColumnDef::new(ClickTracking::Country).string_len(2).null())
                    .col(
                        ColumnDef::new(ClickTracking::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LinkClicks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LinkClicks::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LinkClicks::WebResultId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LinkClicks::TotalClicks)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LinkClicks::UniqueClicks)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LinkClicks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // one counter row per web result; target of the atomic increment
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_link_clicks_web_result")
                    .table(LinkClicks::Table)
                    .col(LinkClicks::WebResultId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmailCaptures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmailCaptures::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EmailCaptures::Email).text().not_null())
                    .col(
                        ColumnDef::new(EmailCaptures::PrelandingKey)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailCaptures::WebResultId)
                            .string_len(36)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EmailCaptures::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmailCaptures::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LinkClicks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClickTracking::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Sessions {
    #[sea_orm(iden = "sessions")]
    Table,
    Id,
    SessionId,
    DeviceType,
    UserAgent,
    IpAddress,
    Country,
    Source,
    CreatedAt,
    LastActivity,
}

#[derive(DeriveIden)]
enum ClickTracking {
    #[sea_orm(iden = "click_tracking")]
    Table,
    Id,
    SessionId,
    ClickType,
    RelatedSearchId,
    LinkId,
    DeviceType,
    IpAddress,
    Country,
    Timestamp,
}

#[derive(DeriveIden)]
enum LinkClicks {
    #[sea_orm(iden = "link_clicks")]
    Table,
    Id,
    WebResultId,
    TotalClicks,
    UniqueClicks,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EmailCaptures {
    #[sea_orm(iden = "email_captures")]
    Table,
    Id,
    Email,
    PrelandingKey,
    WebResultId,
    CreatedAt,
}
