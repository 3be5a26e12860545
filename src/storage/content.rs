//! Content entity CRUD
//!
//! Visitor-facing reads filter on `is_active` (blogs: `status = published`);
//! admin reads see everything. Dependent cleanup on delete runs as separate
//! sequential statements, matching the original data lifecycle.

use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::info;

use crate::errors::{Result, RotatorError};

use migration::entities::{
    blog, click_event, email_capture, landing_content, link_click, prelanding, related_search,
    web_result,
};

use super::{ContentStore, new_id, now};

pub struct RelatedSearchInput {
    pub search_text: String,
    pub title: Option<String>,
    pub web_result_page: i32,
    pub position: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub blog_id: Option<String>,
}

pub struct WebResultInput {
    pub title: String,
    pub description: Option<String>,
    pub original_link: String,
    pub logo_url: Option<String>,
    pub web_result_page: i32,
    pub position: i32,
    pub is_sponsored: bool,
    pub prelanding_key: Option<String>,
    pub backlink: Option<String>,
    pub country_codes: Option<String>,
    pub worldwide: bool,
    pub is_active: bool,
}

pub struct PrelandingInput {
    pub headline: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub main_image_url: Option<String>,
    pub redirect_description: Option<String>,
    pub is_active: bool,
}

pub struct BlogInput {
    pub title: String,
    pub slug: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<String>,
    pub status: String,
    pub related_search_id: Option<String>,
}

pub const BLOG_STATUSES: [&str; 2] = ["draft", "published"];

fn validate_blog_status(status: &str) -> Result<()> {
    if BLOG_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(RotatorError::validation(format!(
            "Invalid blog status: {} (expected draft or published)",
            status
        )))
    }
}

fn map_update_err(err: DbErr, what: &str) -> RotatorError {
    match err {
        DbErr::RecordNotUpdated => RotatorError::not_found(format!("{} not found", what)),
        e if ContentStore::is_unique_violation(&e) => {
            RotatorError::duplicate_key(format!("{} already exists", what))
        }
        e => RotatorError::database_operation(format!("Failed to update {}: {}", what, e)),
    }
}

impl ContentStore {
    // ---- Landing content (singleton) ----

    pub async fn get_landing_content(&self) -> Result<Option<landing_content::Model>> {
        Ok(landing_content::Entity::find().one(self.db()).await?)
    }

    pub async fn upsert_landing_content(
        &self,
        title: String,
        description: String,
    ) -> Result<landing_content::Model> {
        if title.trim().is_empty() {
            return Err(RotatorError::validation("Landing title is required"));
        }

        match landing_content::Entity::find().one(self.db()).await? {
            Some(existing) => {
                let model = landing_content::ActiveModel {
                    id: Set(existing.id),
                    title: Set(title),
                    description: Set(description),
                    updated_at: Set(now()),
                    ..Default::default()
                };
                Ok(model.update(self.db()).await?)
            }
            None => {
                let model = landing_content::ActiveModel {
                    id: Set(new_id()),
                    title: Set(title),
                    description: Set(description),
                    created_at: Set(now()),
                    updated_at: Set(now()),
                };
                Ok(model.insert(self.db()).await?)
            }
        }
    }

    // ---- Related searches ----

    pub async fn list_related_searches(
        &self,
        active_only: bool,
    ) -> Result<Vec<related_search::Model>> {
        let mut query = related_search::Entity::find()
            .order_by_asc(related_search::Column::DisplayOrder)
            .order_by_asc(related_search::Column::Position);
        if active_only {
            query = query.filter(related_search::Column::IsActive.eq(true));
        }
        Ok(query.all(self.db()).await?)
    }

    /// Active searches attached to a blog post, in display order
    pub async fn list_related_searches_for_blog(
        &self,
        blog_id: &str,
    ) -> Result<Vec<related_search::Model>> {
        Ok(related_search::Entity::find()
            .filter(related_search::Column::BlogId.eq(blog_id))
            .filter(related_search::Column::IsActive.eq(true))
            .order_by_asc(related_search::Column::DisplayOrder)
            .order_by_asc(related_search::Column::Position)
            .all(self.db())
            .await?)
    }

    pub async fn get_related_search(&self, id: &str) -> Result<related_search::Model> {
        related_search::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| RotatorError::not_found(format!("Related search not found: {}", id)))
    }

    pub async fn create_related_search(
        &self,
        input: RelatedSearchInput,
    ) -> Result<related_search::Model> {
        if input.search_text.trim().is_empty() {
            return Err(RotatorError::validation("search_text is required"));
        }

        // Title falls back to the search text when left blank
        let title = match input.title.filter(|t| !t.trim().is_empty()) {
            Some(t) => t,
            None => input.search_text.clone(),
        };

        let model = related_search::ActiveModel {
            id: Set(new_id()),
            search_text: Set(input.search_text),
            title: Set(Some(title)),
            web_result_page: Set(input.web_result_page),
            position: Set(input.position),
            display_order: Set(input.display_order),
            is_active: Set(input.is_active),
            blog_id: Set(input.blog_id),
            created_at: Set(now()),
            updated_at: Set(now()),
        };

        model
            .insert(self.db())
            .await
            .map_err(|e| Self::map_insert_err(e, "related search"))
    }

    pub async fn update_related_search(
        &self,
        id: &str,
        input: RelatedSearchInput,
    ) -> Result<related_search::Model> {
        if input.search_text.trim().is_empty() {
            return Err(RotatorError::validation("search_text is required"));
        }

        let title = match input.title.filter(|t| !t.trim().is_empty()) {
            Some(t) => t,
            None => input.search_text.clone(),
        };

        let model = related_search::ActiveModel {
            id: Set(id.to_string()),
            search_text: Set(input.search_text),
            title: Set(Some(title)),
            web_result_page: Set(input.web_result_page),
            position: Set(input.position),
            display_order: Set(input.display_order),
            is_active: Set(input.is_active),
            blog_id: Set(input.blog_id),
            updated_at: Set(now()),
            ..Default::default()
        };

        model
            .update(self.db())
            .await
            .map_err(|e| map_update_err(e, "related search"))
    }

    /// Deletes the search and its click history, as two sequential statements
    pub async fn delete_related_search(&self, id: &str) -> Result<()> {
        click_event::Entity::delete_many()
            .filter(click_event::Column::RelatedSearchId.eq(id))
            .exec(self.db())
            .await?;

        let result = related_search::Entity::delete_by_id(id)
            .exec(self.db())
            .await?;
        if result.rows_affected == 0 {
            return Err(RotatorError::not_found(format!(
                "Related search not found: {}",
                id
            )));
        }

        info!("Related search deleted: {}", id);
        Ok(())
    }

    pub async fn set_related_searches_active(
        &self,
        ids: &[String],
        active: bool,
    ) -> Result<u64> {
        let result = related_search::Entity::update_many()
            .col_expr(related_search::Column::IsActive, Expr::value(active))
            .col_expr(related_search::Column::UpdatedAt, Expr::value(now()))
            .filter(related_search::Column::Id.is_in(ids.iter().map(String::as_str)))
            .exec(self.db())
            .await?;
        Ok(result.rows_affected)
    }

    // ---- Web results ----

    pub async fn list_web_results(
        &self,
        page: Option<i32>,
        active_only: bool,
    ) -> Result<Vec<web_result::Model>> {
        let mut query = web_result::Entity::find().order_by_asc(web_result::Column::Position);
        if let Some(page) = page {
            query = query.filter(web_result::Column::WebResultPage.eq(page));
        }
        if active_only {
            query = query.filter(web_result::Column::IsActive.eq(true));
        }
        Ok(query.all(self.db()).await?)
    }

    pub async fn get_web_result(&self, id: &str) -> Result<web_result::Model> {
        web_result::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| RotatorError::not_found(format!("Web result not found: {}", id)))
    }

    pub async fn create_web_result(&self, input: WebResultInput) -> Result<web_result::Model> {
        if input.title.trim().is_empty() {
            return Err(RotatorError::validation("title is required"));
        }
        if input.original_link.trim().is_empty() {
            return Err(RotatorError::validation("original_link is required"));
        }

        let model = web_result::ActiveModel {
            id: Set(new_id()),
            title: Set(input.title),
            description: Set(input.description),
            original_link: Set(input.original_link),
            logo_url: Set(input.logo_url),
            web_result_page: Set(input.web_result_page),
            position: Set(input.position),
            is_sponsored: Set(input.is_sponsored),
            prelanding_key: Set(input.prelanding_key),
            backlink: Set(input.backlink),
            country_codes: Set(input.country_codes),
            worldwide: Set(input.worldwide),
            is_active: Set(input.is_active),
            created_at: Set(now()),
            updated_at: Set(now()),
        };

        model
            .insert(self.db())
            .await
            .map_err(|e| Self::map_insert_err(e, "web result"))
    }

    pub async fn update_web_result(
        &self,
        id: &str,
        input: WebResultInput,
    ) -> Result<web_result::Model> {
        if input.title.trim().is_empty() {
            return Err(RotatorError::validation("title is required"));
        }
        if input.original_link.trim().is_empty() {
            return Err(RotatorError::validation("original_link is required"));
        }

        let model = web_result::ActiveModel {
            id: Set(id.to_string()),
            title: Set(input.title),
            description: Set(input.description),
            original_link: Set(input.original_link),
            logo_url: Set(input.logo_url),
            web_result_page: Set(input.web_result_page),
            position: Set(input.position),
            is_sponsored: Set(input.is_sponsored),
            prelanding_key: Set(input.prelanding_key),
            backlink: Set(input.backlink),
            country_codes: Set(input.country_codes),
            worldwide: Set(input.worldwide),
            is_active: Set(input.is_active),
            updated_at: Set(now()),
            ..Default::default()
        };

        model
            .update(self.db())
            .await
            .map_err(|e| map_update_err(e, "web result"))
    }

    /// Deletes the result plus its click history and counter row
    pub async fn delete_web_result(&self, id: &str) -> Result<()> {
        click_event::Entity::delete_many()
            .filter(click_event::Column::LinkId.eq(id))
            .exec(self.db())
            .await?;

        link_click::Entity::delete_many()
            .filter(link_click::Column::WebResultId.eq(id))
            .exec(self.db())
            .await?;

        let result = web_result::Entity::delete_by_id(id).exec(self.db()).await?;
        if result.rows_affected == 0 {
            return Err(RotatorError::not_found(format!(
                "Web result not found: {}",
                id
            )));
        }

        info!("Web result deleted: {}", id);
        Ok(())
    }

    pub async fn set_web_results_active(&self, ids: &[String], active: bool) -> Result<u64> {
        let result = web_result::Entity::update_many()
            .col_expr(web_result::Column::IsActive, Expr::value(active))
            .col_expr(web_result::Column::UpdatedAt, Expr::value(now()))
            .filter(web_result::Column::Id.is_in(ids.iter().map(String::as_str)))
            .exec(self.db())
            .await?;
        Ok(result.rows_affected)
    }

    // ---- Prelandings ----

    pub async fn list_prelandings(&self, active_only: bool) -> Result<Vec<prelanding::Model>> {
        let mut query =
            prelanding::Entity::find().order_by_desc(prelanding::Column::CreatedAt);
        if active_only {
            query = query.filter(prelanding::Column::IsActive.eq(true));
        }
        Ok(query.all(self.db()).await?)
    }

    pub async fn get_prelanding(&self, id: &str) -> Result<prelanding::Model> {
        prelanding::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| RotatorError::not_found(format!("Prelanding not found: {}", id)))
    }

    /// Visitor-facing lookup: missing or inactive keys are a hard 404
    pub async fn get_active_prelanding_by_key(&self, key: &str) -> Result<prelanding::Model> {
        prelanding::Entity::find()
            .filter(prelanding::Column::Key.eq(key))
            .filter(prelanding::Column::IsActive.eq(true))
            .one(self.db())
            .await?
            .ok_or_else(|| RotatorError::not_found(format!("Prelanding not found: {}", key)))
    }

    /// Key is derived from the headline at creation and never changes
    pub async fn create_prelanding(&self, input: PrelandingInput) -> Result<prelanding::Model> {
        if input.headline.trim().is_empty() {
            return Err(RotatorError::validation("headline is required"));
        }

        let key = crate::utils::generate_prelanding_key(&input.headline);

        let model = prelanding::ActiveModel {
            id: Set(new_id()),
            key: Set(key),
            headline: Set(input.headline),
            subtitle: Set(input.subtitle),
            description: Set(input.description),
            logo_url: Set(input.logo_url),
            main_image_url: Set(input.main_image_url),
            redirect_description: Set(input.redirect_description),
            is_active: Set(input.is_active),
            created_at: Set(now()),
            updated_at: Set(now()),
        };

        model
            .insert(self.db())
            .await
            .map_err(|e| Self::map_insert_err(e, "prelanding key"))
    }

    pub async fn update_prelanding(
        &self,
        id: &str,
        input: PrelandingInput,
    ) -> Result<prelanding::Model> {
        if input.headline.trim().is_empty() {
            return Err(RotatorError::validation("headline is required"));
        }

        let model = prelanding::ActiveModel {
            id: Set(id.to_string()),
            headline: Set(input.headline),
            subtitle: Set(input.subtitle),
            description: Set(input.description),
            logo_url: Set(input.logo_url),
            main_image_url: Set(input.main_image_url),
            redirect_description: Set(input.redirect_description),
            is_active: Set(input.is_active),
            updated_at: Set(now()),
            ..Default::default()
        };

        model
            .update(self.db())
            .await
            .map_err(|e| map_update_err(e, "prelanding"))
    }

    /// Deletes the prelanding, its captured emails, and detaches web results
    /// that pointed at its key
    pub async fn delete_prelanding(&self, id: &str) -> Result<()> {
        let existing = self.get_prelanding(id).await?;

        email_capture::Entity::delete_many()
            .filter(email_capture::Column::PrelandingKey.eq(&existing.key))
            .exec(self.db())
            .await?;

        web_result::Entity::update_many()
            .col_expr(
                web_result::Column::PrelandingKey,
                Expr::value(Option::<String>::None),
            )
            .filter(web_result::Column::PrelandingKey.eq(&existing.key))
            .exec(self.db())
            .await?;

        prelanding::Entity::delete_by_id(id).exec(self.db()).await?;

        info!("Prelanding deleted: {} (key {})", id, existing.key);
        Ok(())
    }

    pub async fn set_prelandings_active(&self, ids: &[String], active: bool) -> Result<u64> {
        let result = prelanding::Entity::update_many()
            .col_expr(prelanding::Column::IsActive, Expr::value(active))
            .col_expr(prelanding::Column::UpdatedAt, Expr::value(now()))
            .filter(prelanding::Column::Id.is_in(ids.iter().map(String::as_str)))
            .exec(self.db())
            .await?;
        Ok(result.rows_affected)
    }

    // ---- Blogs ----

    pub async fn list_blogs(&self, published_only: bool) -> Result<Vec<blog::Model>> {
        let mut query = blog::Entity::find().order_by_desc(blog::Column::CreatedAt);
        if published_only {
            query = query.filter(blog::Column::Status.eq("published"));
        }
        Ok(query.all(self.db()).await?)
    }

    pub async fn get_blog(&self, id: &str) -> Result<blog::Model> {
        blog::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| RotatorError::not_found(format!("Blog not found: {}", id)))
    }

    pub async fn get_published_blog_by_slug(&self, slug: &str) -> Result<blog::Model> {
        blog::Entity::find()
            .filter(blog::Column::Slug.eq(slug))
            .filter(blog::Column::Status.eq("published"))
            .one(self.db())
            .await?
            .ok_or_else(|| RotatorError::not_found(format!("Blog not found: {}", slug)))
    }

    pub async fn create_blog(&self, input: BlogInput) -> Result<blog::Model> {
        if input.title.trim().is_empty() {
            return Err(RotatorError::validation("title is required"));
        }
        if input.slug.trim().is_empty() {
            return Err(RotatorError::validation("slug is required"));
        }
        validate_blog_status(&input.status)?;

        let model = blog::ActiveModel {
            id: Set(new_id()),
            title: Set(input.title),
            slug: Set(input.slug),
            author: Set(input.author),
            category: Set(input.category),
            content: Set(input.content),
            featured_image: Set(input.featured_image),
            status: Set(input.status),
            related_search_id: Set(input.related_search_id),
            created_at: Set(now()),
            updated_at: Set(now()),
        };

        model
            .insert(self.db())
            .await
            .map_err(|e| Self::map_insert_err(e, "blog slug"))
    }

    pub async fn update_blog(&self, id: &str, input: BlogInput) -> Result<blog::Model> {
        if input.title.trim().is_empty() {
            return Err(RotatorError::validation("title is required"));
        }
        if input.slug.trim().is_empty() {
            return Err(RotatorError::validation("slug is required"));
        }
        validate_blog_status(&input.status)?;

        let model = blog::ActiveModel {
            id: Set(id.to_string()),
            title: Set(input.title),
            slug: Set(input.slug),
            author: Set(input.author),
            category: Set(input.category),
            content: Set(input.content),
            featured_image: Set(input.featured_image),
            status: Set(input.status),
            related_search_id: Set(input.related_search_id),
            updated_at: Set(now()),
            ..Default::default()
        };

        model
            .update(self.db())
            .await
            .map_err(|e| map_update_err(e, "blog"))
    }

    /// Deletes the blog and detaches related searches that pointed at it
    pub async fn delete_blog(&self, id: &str) -> Result<()> {
        related_search::Entity::update_many()
            .col_expr(
                related_search::Column::BlogId,
                Expr::value(Option::<String>::None),
            )
            .filter(related_search::Column::BlogId.eq(id))
            .exec(self.db())
            .await?;

        let result = blog::Entity::delete_by_id(id).exec(self.db()).await?;
        if result.rows_affected == 0 {
            return Err(RotatorError::not_found(format!("Blog not found: {}", id)));
        }

        info!("Blog deleted: {}", id);
        Ok(())
    }

    pub async fn set_blogs_status(&self, ids: &[String], status: &str) -> Result<u64> {
        validate_blog_status(status)?;

        let result = blog::Entity::update_many()
            .col_expr(blog::Column::Status, Expr::value(status))
            .col_expr(blog::Column::UpdatedAt, Expr::value(now()))
            .filter(blog::Column::Id.is_in(ids.iter().map(String::as_str)))
            .exec(self.db())
            .await?;
        Ok(result.rows_affected)
    }

    // ---- Email captures (admin read side) ----

    pub async fn list_email_captures(&self) -> Result<Vec<email_capture::Model>> {
        Ok(email_capture::Entity::find()
            .order_by_desc(email_capture::Column::CreatedAt)
            .all(self.db())
            .await?)
    }
}
