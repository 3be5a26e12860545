//! Content tables migration
//!
//! Creates the five editable content tables that drive the rotator:
//! - landing_content (singleton hero copy)
//! - related_searches (landing page buttons)
//! - web_results (sponsored/organic listings per result page)
//! - prelandings (email capture pages, referenced by key)
//! - blogs (public content pages)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LandingContent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LandingContent::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LandingContent::Title).text().not_null())
                    .col(
                        ColumnDef::new(LandingContent::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LandingContent::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LandingContent::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Blogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Blogs::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Blogs::Title).text().not_null())
                    .col(ColumnDef::new(Blogs::Slug).string_len(255).not_null())
                    .col(ColumnDef::new(Blogs::Author).string_len(255).null())
                    .col(ColumnDef::new(Blogs::Category).string_len(255).null())
                    .col(ColumnDef::new(Blogs::Content).text().null())
                    .col(ColumnDef::new(Blogs::FeaturedImage).text().null())
                    .col(
                        ColumnDef::new(Blogs::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(Blogs::RelatedSearchId).string_len(36).null())
                    .col(
                        ColumnDef::new(Blogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Blogs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blogs_slug")
                    .table(Blogs::Table)
                    .col(Blogs::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RelatedSearches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RelatedSearches::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RelatedSearches::SearchText)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RelatedSearches::Title).text().null())
                    .col(
                        ColumnDef::new(RelatedSearches::WebResultPage)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(RelatedSearches::Position)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(RelatedSearches::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RelatedSearches::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(RelatedSearches::BlogId)
                            .string_len(36)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RelatedSearches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RelatedSearches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_related_searches_order")
                    .table(RelatedSearches::Table)
                    .col(RelatedSearches::DisplayOrder)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WebResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WebResults::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WebResults::Title).text().not_null())
                    .col(ColumnDef::new(WebResults::Description).text().null())
                    .col(ColumnDef::new(WebResults::OriginalLink).text().not_null())
                    .col(ColumnDef::new(WebResults::LogoUrl).text().null())
                    .col(
                        ColumnDef::new(WebResults::WebResultPage)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(WebResults::Position)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(WebResults::IsSponsored)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(WebResults::PrelandingKey)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(WebResults::Backlink).text().null())
                    .col(ColumnDef::new(WebResults::CountryCodes).text().null())
                    .col(
                        ColumnDef::new(WebResults::Worldwide)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(WebResults::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(WebResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WebResults::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Results page render filters on (page, active)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_web_results_page_active")
                    .table(WebResults::Table)
                    .col(WebResults::WebResultPage)
                    .col(WebResults::IsActive)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Prelandings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prelandings::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prelandings::Key).string_len(255).not_null())
                    .col(ColumnDef::new(Prelandings::Headline).text().not_null())
                    .col(ColumnDef::new(Prelandings::Subtitle).text().null())
                    .col(ColumnDef::new(Prelandings::Description).text().null())
                    .col(ColumnDef::new(Prelandings::LogoUrl).text().null())
                    .col(ColumnDef::new(Prelandings::MainImageUrl).text().null())
                    .col(
                        ColumnDef::new(Prelandings::RedirectDescription)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Prelandings::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Prelandings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Prelandings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prelandings_key")
                    .table(Prelandings::Table)
                    .col(Prelandings::Key)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Prelandings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WebResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RelatedSearches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Blogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LandingContent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LandingContent {
    #[sea_orm(iden = "landing_content")]
    Table,
    Id,
    Title,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Blogs {
    #[sea_orm(iden = "blogs")]
    Table,
    Id,
    Title,
    Slug,
    Author,
    Category,
    Content,
    FeaturedImage,
    Status,
    RelatedSearchId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RelatedSearches {
    #[sea_orm(iden = "related_searches")]
    Table,
    Id,
    SearchText,
    Title,
    WebResultPage,
    Position,
    DisplayOrder,
    IsActive,
    BlogId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WebResults {
    #[sea_orm(iden = "web_results")]
    Table,
    Id,
    Title,
    Description,
    OriginalLink,
    LogoUrl,
    WebResultPage,
    Position,
    IsSponsored,
    PrelandingKey,
    Backlink,
    CountryCodes,
    Worldwide,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Prelandings {
    #[sea_orm(iden = "prelandings")]
    Table,
    Id,
    Key,
    Headline,
    Subtitle,
    Description,
    LogoUrl,
    MainImageUrl,
    RedirectDescription,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
