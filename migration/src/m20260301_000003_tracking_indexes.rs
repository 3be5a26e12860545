//! Analytics query indexes for the click log
//!
//! The admin analytics view aggregates click_tracking by session, by
//! related search and by timestamp; the capture export filters by key.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_click_tracking_session")
                    .table(ClickTracking::Table)
                    .col(ClickTracking::SessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_click_tracking_search")
                    .table(ClickTracking::Table)
                    .col(ClickTracking::RelatedSearchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_click_tracking_link")
                    .table(ClickTracking::Table)
                    .col(ClickTracking::LinkId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_click_tracking_timestamp")
                    .table(ClickTracking::Table)
                    .col(ClickTracking::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_email_captures_key")
                    .table(EmailCaptures::Table)
                    .col(EmailCaptures::PrelandingKey)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_email_captures_key").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_click_tracking_timestamp")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_click_tracking_link").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_click_tracking_search").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_click_tracking_session").to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ClickTracking {
    #[sea_orm(iden = "click_tracking")]
    Table,
    SessionId,
    RelatedSearchId,
    LinkId,
    Timestamp,
}

#[derive(DeriveIden)]
enum EmailCaptures {
    #[sea_orm(iden = "email_captures")]
    Table,
    PrelandingKey,
}
