//! Data access layer
//!
//! `ContentStore` owns the database connection and is constructed once at
//! startup, then injected into handlers via `web::Data`. There is no global
//! store instance.

mod analytics;
mod content;
mod tracking;

pub use analytics::{
    AnalyticsOverview, CLICK_TYPE_RELATED_SEARCH, CLICK_TYPE_WEB_RESULT, ClickDetailRow,
    ClickDetails, SearchClickCount, SessionSummary,
};
pub use content::{BLOG_STATUSES, BlogInput, PrelandingInput, RelatedSearchInput, WebResultInput};
pub use tracking::{NewClick, SessionVisit};

pub use migration::entities;

use chrono::Utc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;
use uuid::Uuid;

use crate::errors::{Result, RotatorError};

use migration::{Migrator, MigratorTrait};

#[derive(Clone)]
pub struct ContentStore {
    db: DatabaseConnection,
    backend_name: String,
}

impl ContentStore {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(RotatorError::database_config("DATABASE_URL is not set"));
        }

        let db = if backend_name == "sqlite" {
            Self::connect_sqlite(database_url).await?
        } else {
            Self::connect_generic(database_url, backend_name).await?
        };

        let store = ContentStore {
            db,
            backend_name: backend_name.to_string(),
        };

        store.run_migrations().await?;

        info!("{} content store initialized", store.backend_name.to_uppercase());
        Ok(store)
    }

    /// Connect to SQLite with auto-create and tuned pragmas
    async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::SqlitePool;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                RotatorError::database_config(format!("Failed to parse SQLite URL: {}", e))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePool::connect_with(opt).await.map_err(|e| {
            RotatorError::database_connection(format!("Failed to connect to SQLite: {}", e))
        })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Connect to MySQL/PostgreSQL
    async fn connect_generic(database_url: &str, backend_name: &str) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(100)
            .min_connections(5)
            .connect_timeout(std::time::Duration::from_secs(8))
            .acquire_timeout(std::time::Duration::from_secs(8))
            .sqlx_logging(false);

        Database::connect(opt).await.map_err(|e| {
            RotatorError::database_connection(format!(
                "Failed to connect to {} database: {}",
                backend_name.to_uppercase(),
                e
            ))
        })
    }

    async fn run_migrations(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| RotatorError::database_operation(format!("Migration failed: {}", e)))?;

        info!("Database migrations completed");
        Ok(())
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    pub(crate) fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Detect a unique-constraint violation across backends
    pub(crate) fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
        use sea_orm::RuntimeErr;
        use sea_orm::sqlx::Error;

        let (sea_orm::DbErr::Exec(RuntimeErr::SqlxError(sqlx_err))
        | sea_orm::DbErr::Query(RuntimeErr::SqlxError(sqlx_err))) = err
        else {
            return false;
        };

        match &**sqlx_err {
            Error::Database(db_err) => {
                let code = db_err.code();
                // SQLite: SQLITE_CONSTRAINT_UNIQUE (2067)
                // MySQL: ER_DUP_ENTRY (1062)
                // PostgreSQL: unique_violation (23505)
                code.as_ref()
                    .map(|c| c == "2067" || c == "1062" || c == "23505")
                    .unwrap_or(false)
            }
            _ => false,
        }
    }

    /// Map an insert error, recognizing duplicate unique keys
    pub(crate) fn map_insert_err(err: sea_orm::DbErr, what: &str) -> RotatorError {
        if Self::is_unique_violation(&err) {
            RotatorError::duplicate_key(format!("{} already exists", what))
        } else {
            RotatorError::database_operation(format!("Failed to insert {}: {}", what, err))
        }
    }
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn now() -> chrono::DateTime<Utc> {
    Utc::now()
}
