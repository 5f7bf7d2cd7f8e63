use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{Author, AuthorId, CreateAuthorRequest, RepositoryError};
use crate::repositories::AuthorRepository;

#[derive(Debug, Default)]
struct Store {
    next_id: AuthorId,
    authors: BTreeMap<AuthorId, Author>,
    books: BTreeMap<AuthorId, u64>,
}

/// In-memory implementation of the author repository.
///
/// Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryAuthorRepository {
    store: RwLock<Store>,
}

impl MemoryAuthorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more book written by `author_id`.
    pub async fn insert_book(&self, author_id: AuthorId) {
        *self.store.write().await.books.entry(author_id).or_default() += 1;
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.authors.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AuthorRepository for MemoryAuthorRepository {
    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, RepositoryError> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        let author = Author::new(
            store.next_id,
            req.name().clone(),
            req.description().map(str::to_string),
        );
        store.authors.insert(author.id(), author.clone());
        Ok(author)
    }

    async fn find_author(&self, id: AuthorId) -> Result<Option<Author>, RepositoryError> {
        Ok(self.store.read().await.authors.get(&id).cloned())
    }

    async fn find_all_authors(&self) -> Result<Vec<Author>, RepositoryError> {
        Ok(self.store.read().await.authors.values().cloned().collect())
    }

    async fn update_author(&self, author: &Author) -> Result<bool, RepositoryError> {
        let mut store = self.store.write().await;
        match store.authors.get_mut(&author.id()) {
            Some(stored) => {
                *stored = author.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_author(&self, id: AuthorId) -> Result<bool, RepositoryError> {
        Ok(self.store.write().await.authors.remove(&id).is_some())
    }

    async fn count_books_by_author(&self, id: AuthorId) -> Result<u64, RepositoryError> {
        Ok(self.store.read().await.books.get(&id).copied().unwrap_or(0))
    }
}
