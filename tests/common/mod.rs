#![allow(dead_code)]

use std::sync::Arc;

use author_catalog::database::{SqliteAuthorRepository, establish_pool};
use author_catalog::{AuthorCatalogService, MemoryAuthorRepository, PageSize};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn memory_catalog() -> (
    Arc<MemoryAuthorRepository>,
    AuthorCatalogService<MemoryAuthorRepository>,
) {
    init_tracing();
    let repo = Arc::new(MemoryAuthorRepository::new());
    let service = AuthorCatalogService::new(Arc::clone(&repo), PageSize::default());
    (repo, service)
}

pub async fn sqlite_catalog() -> (
    Arc<SqliteAuthorRepository>,
    AuthorCatalogService<SqliteAuthorRepository>,
) {
    init_tracing();
    let pool = establish_pool("sqlite::memory:").await.unwrap();
    let repo = Arc::new(SqliteAuthorRepository::new(pool));
    let service = AuthorCatalogService::new(Arc::clone(&repo), PageSize::default());
    (repo, service)
}
