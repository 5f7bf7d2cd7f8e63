use crate::models::{Author, AuthorId, CreateAuthorRequest, RepositoryError};
use async_trait::async_trait;

pub mod memory;

#[async_trait]
pub trait AuthorRepository: Send + Sync + 'static {
    /// Stores a new author and returns it with its assigned id.
    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, RepositoryError>;

    async fn find_author(&self, id: AuthorId) -> Result<Option<Author>, RepositoryError>;

    /// Every stored author, ordered by id ascending.
    async fn find_all_authors(&self) -> Result<Vec<Author>, RepositoryError>;

    /// Overwrites a stored author. Returns `false` when no row has its id.
    async fn update_author(&self, author: &Author) -> Result<bool, RepositoryError>;

    /// Returns `false` when the author was absent.
    async fn delete_author(&self, id: AuthorId) -> Result<bool, RepositoryError>;

    async fn count_books_by_author(&self, id: AuthorId) -> Result<u64, RepositoryError>;
}
