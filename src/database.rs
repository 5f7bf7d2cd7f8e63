use crate::config::Config;
use crate::models::{Author, AuthorId, AuthorName, CreateAuthorRequest, RepositoryError};
use crate::repositories::AuthorRepository;
use crate::service::AuthorCatalogService;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Row, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument};

static MIGRATOR: Migrator = sqlx::migrate!();

/// Opens the database at `path` and applies pending migrations.
///
/// An in-memory database lives only as long as its connection, so the pool is
/// pinned to a single connection that is never recycled. Both `:memory:` and
/// URI-style `mode=memory` paths count as in-memory.
pub async fn establish_pool(path: &str) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(path)
        .with_context(|| format!("Invalid database path {path}"))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool_opts = if is_in_memory(path) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };
    let pool = pool_opts
        .connect_with(opts)
        .await
        .with_context(|| format!("Failed to open database at {path}"))?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}

/// Builds a catalog over the database named in `config`.
pub async fn connect_catalog(
    config: &Config,
) -> anyhow::Result<AuthorCatalogService<SqliteAuthorRepository>> {
    let pool = establish_pool(config.database_url()).await?;
    info!(page_size = config.page_size().get(), "Author catalog database ready");

    let repo = Arc::new(SqliteAuthorRepository::new(pool));
    Ok(AuthorCatalogService::new(repo, config.page_size()))
}

#[derive(Debug, Clone)]
pub struct SqliteAuthorRepository {
    pool: SqlitePool,
}

impl SqliteAuthorRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl<'r> FromRow<'r, SqliteRow> for Author {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let name: &str = row.try_get("name")?;
        let description = row.try_get("description")?;

        let name = AuthorName::new_unchecked(name);
        Ok(Self::new(id, name, description))
    }
}

#[async_trait]
impl AuthorRepository for SqliteAuthorRepository {
    #[instrument(skip(self, req), fields(name = %req.name()))]
    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, RepositoryError> {
        let author = sqlx::query_as(
            "INSERT INTO author (name, description) VALUES (?, ?) \
             RETURNING id, name, description",
        )
        .bind(req.name().as_str())
        .bind(req.description())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            anyhow!(err).context(format!(
                r#"Failed to create author with name "{}""#,
                req.name()
            ))
        })?;

        Ok(author)
    }

    #[instrument(skip(self))]
    async fn find_author(&self, id: AuthorId) -> Result<Option<Author>, RepositoryError> {
        let author = sqlx::query_as("SELECT id, name, description FROM author WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                anyhow!(err).context(format!(r#"Failed to retrieve author with id "{id}""#))
            })?;

        Ok(author)
    }

    #[instrument(skip(self))]
    async fn find_all_authors(&self) -> Result<Vec<Author>, RepositoryError> {
        let authors = sqlx::query_as("SELECT id, name, description FROM author ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|err| anyhow!(err).context("Failed to retrieve all authors"))?;

        Ok(authors)
    }

    #[instrument(skip(self, author), fields(author_id = author.id()))]
    async fn update_author(&self, author: &Author) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE author SET name = ?, description = ? WHERE id = ?")
            .bind(author.name().as_str())
            .bind(author.description())
            .bind(author.id())
            .execute(&self.pool)
            .await
            .map_err(|err| {
                anyhow!(err).context(format!(
                    r#"Failed to update author with id "{}""#,
                    author.id()
                ))
            })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_author(&self, id: AuthorId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM author WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    RepositoryError::StillReferenced
                } else {
                    anyhow!(err)
                        .context(format!(r#"Failed to delete author with id "{id}""#))
                        .into()
                }
            })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_books_by_author(&self, id: AuthorId) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book WHERE author_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                anyhow!(err).context(format!(r#"Failed to count books of author "{id}""#))
            })?;

        let count = u64::try_from(count).context("Book count out of range")?;
        Ok(count)
    }
}

fn is_in_memory(path: &str) -> bool {
    path.contains(":memory:") || path.contains("mode=memory")
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        return db_err.is_foreign_key_violation();
    }

    false
}
