//! PostgreSQL implementation of the URL store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewUrlEntry, UrlEntry};
use crate::domain::repositories::{StoreError, UrlStore, validate_new_entry};
use crate::utils::code_generator::generate_code;
use crate::utils::db_error::is_unique_violation_on_code;

/// Connection pool settings for [`PgUrlStore::connect`].
#[derive(Debug, Clone)]
pub struct PgPoolSettings {
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl Default for PgPoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    code: String,
    url: String,
    user_id: String,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlEntry {
    fn from(row: UrlRow) -> Self {
        UrlEntry::new(row.code, row.url, row.user_id, row.created_at)
    }
}

/// PostgreSQL store for shortened URLs.
///
/// Uniqueness of codes is enforced by the primary key on `urls.code`; the
/// pre-insert existence check only saves a round trip for the common
/// duplicate-alias case.
pub struct PgUrlStore {
    pool: Arc<PgPool>,
}

impl PgUrlStore {
    /// Creates a store over an existing pool. The schema must already exist.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a pool, verifies connectivity and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BackendUnavailable`] if the database cannot be
    /// reached or the schema cannot be prepared.
    pub async fn connect(database_url: &str, settings: &PgPoolSettings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.connect_timeout)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::BackendUnavailable(e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::BackendUnavailable(format!("migration failed: {e}")))?;

        tracing::info!("Connected to database");

        Ok(Self::new(Arc::new(pool)))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM urls WHERE code = $1)")
            .bind(code)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }

    async fn insert(&self, code: &str, url: &str, owner: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO urls (code, url, user_id, created_at) VALUES ($1, $2, $3, $4)")
            .bind(code)
            .bind(url)
            .bind(owner)
            .bind(Utc::now())
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    /// Inserts under `code` unless another row already owns it.
    async fn claim(&self, code: &str, url: &str, owner: &str) -> Result<Claim, StoreError> {
        if self.code_exists(code).await? {
            return Ok(Claim::Taken);
        }

        // A concurrent writer may win between the check and the insert.
        match self.insert(code, url, owner).await {
            Ok(()) => Ok(Claim::Inserted),
            Err(e) if is_unique_violation_on_code(&e) => Ok(Claim::Taken),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    Inserted,
    Taken,
}

/// Draws codes until one is claimed. There is no attempt limit: a taken
/// code only ever leads to another draw.
async fn claim_generated_code<G, C, Fut>(mut generate: G, mut claim: C) -> Result<String, StoreError>
where
    G: FnMut() -> Result<String, StoreError>,
    C: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Claim, StoreError>>,
{
    loop {
        let code = generate()?;
        match claim(code.clone()).await? {
            Claim::Inserted => return Ok(code),
            Claim::Taken => tracing::debug!(code = %code, "Generated code already taken, retrying"),
        }
    }
}

#[async_trait]
impl UrlStore for PgUrlStore {
    async fn put(&self, new_entry: NewUrlEntry) -> Result<String, StoreError> {
        validate_new_entry(&new_entry)?;

        let owner = new_entry.owner_or_anonymous();
        let url = new_entry.url.as_str();

        if let Some(alias) = new_entry.alias() {
            return match self.claim(alias, url, owner).await? {
                Claim::Inserted => Ok(alias.to_string()),
                Claim::Taken => Err(StoreError::AliasInUse),
            };
        }

        let store = self;
        claim_generated_code(generate_code, move |code: String| async move {
            store.claim(&code, url, owner).await
        })
        .await
    }

    async fn get(&self, code: &str) -> Result<String, StoreError> {
        let url: Option<String> = sqlx::query_scalar("SELECT url FROM urls WHERE code = $1")
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        url.ok_or(StoreError::NotFound)
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<UrlEntry>, StoreError> {
        let rows: Vec<UrlRow> = sqlx::query_as(
            r#"
            SELECT code, url, user_id, created_at
            FROM urls
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(UrlEntry::from).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}
