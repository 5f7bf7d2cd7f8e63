use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::models::{
    Author, AuthorId, AuthorName, AuthorPage, CreateAuthorError, CreateAuthorRequest,
    DeleteAuthorError, FindAllAuthorsError, FindAuthorError, RepositoryError, UpdateAuthorError,
    UpdateAuthorRequest, normalize_description,
};
use crate::pagination::{PageSize, paginate};
use crate::repositories::AuthorRepository;
use crate::search::filter_by_name;

/// Commands and queries the calling layer invokes on the author catalog.
#[async_trait]
pub trait AuthorCatalog: Send + Sync + 'static {
    async fn create_author(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Author, CreateAuthorError>;

    async fn get_author(&self, id: AuthorId) -> Result<Author, FindAuthorError>;

    async fn update_author(
        &self,
        id: AuthorId,
        name: &str,
        description: Option<&str>,
    ) -> Result<Author, UpdateAuthorError>;

    /// Rejects with `Conflict` while books still reference the author.
    async fn delete_author(&self, id: AuthorId) -> Result<(), DeleteAuthorError>;

    async fn get_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError>;

    /// Authors whose name contains `text`, ignoring case. Blank `text` returns all.
    async fn search_authors(&self, text: &str) -> Result<Vec<Author>, FindAllAuthorsError>;

    async fn list_authors_page(&self, page: i64) -> Result<AuthorPage, FindAllAuthorsError>;

    async fn search_authors_page(
        &self,
        text: &str,
        page: i64,
    ) -> Result<AuthorPage, FindAllAuthorsError>;
}

/// Author catalog backed by an injected repository.
///
/// Holds no state of its own besides the page size, so one may be built per
/// request around a shared repository.
#[derive(Debug)]
pub struct AuthorCatalogService<AR: AuthorRepository> {
    author_repo: Arc<AR>,
    page_size: PageSize,
}

impl<AR: AuthorRepository> Clone for AuthorCatalogService<AR> {
    fn clone(&self) -> Self {
        Self {
            author_repo: Arc::clone(&self.author_repo),
            page_size: self.page_size,
        }
    }
}

impl<AR: AuthorRepository> AuthorCatalogService<AR> {
    pub const fn new(author_repo: Arc<AR>, page_size: PageSize) -> Self {
        Self {
            author_repo,
            page_size,
        }
    }
}

#[async_trait]
impl<AR: AuthorRepository> AuthorCatalog for AuthorCatalogService<AR> {
    #[instrument(skip(self, description))]
    async fn create_author(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Author, CreateAuthorError> {
        let req = CreateAuthorRequest::new(
            AuthorName::new(name)?,
            normalize_description(description),
        );

        let author = self.author_repo.create_author(&req).await?;
        info!(author_id = author.id(), "Created author");
        Ok(author)
    }

    #[instrument(skip(self))]
    async fn get_author(&self, id: AuthorId) -> Result<Author, FindAuthorError> {
        self.author_repo
            .find_author(id)
            .await?
            .ok_or(FindAuthorError::NotFound { id })
    }

    #[instrument(skip(self, description))]
    async fn update_author(
        &self,
        id: AuthorId,
        name: &str,
        description: Option<&str>,
    ) -> Result<Author, UpdateAuthorError> {
        let req = UpdateAuthorRequest::new(
            id,
            AuthorName::new(name)?,
            normalize_description(description),
        );

        let mut author = self
            .author_repo
            .find_author(req.id())
            .await?
            .ok_or(UpdateAuthorError::NotFound { id })?;

        let (_, name, description) = req.into_parts();
        author.overwrite(name, description);

        if !self.author_repo.update_author(&author).await? {
            return Err(UpdateAuthorError::NotFound { id });
        }

        info!(author_id = id, "Updated author");
        Ok(author)
    }

    #[instrument(skip(self))]
    async fn delete_author(&self, id: AuthorId) -> Result<(), DeleteAuthorError> {
        if self.author_repo.find_author(id).await?.is_none() {
            return Err(DeleteAuthorError::NotFound { id });
        }

        let books = self.author_repo.count_books_by_author(id).await?;
        if books > 0 {
            warn!(author_id = id, books, "Refusing to delete author with books");
            return Err(DeleteAuthorError::Conflict { id, books });
        }

        match self.author_repo.delete_author(id).await {
            Ok(true) => {
                info!(author_id = id, "Deleted author");
                Ok(())
            }
            Ok(false) => Err(DeleteAuthorError::NotFound { id }),
            Err(RepositoryError::StillReferenced) => {
                let books = self.author_repo.count_books_by_author(id).await?;
                warn!(author_id = id, books, "Author gained books before deletion");
                Err(DeleteAuthorError::Conflict { id, books })
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError> {
        let authors = self.author_repo.find_all_authors().await?;
        debug!(count = authors.len(), "Loaded authors");
        Ok(authors)
    }

    #[instrument(skip(self))]
    async fn search_authors(&self, text: &str) -> Result<Vec<Author>, FindAllAuthorsError> {
        let authors = self.get_all_authors().await?;
        let found = filter_by_name(authors, text);
        debug!(count = found.len(), "Matched authors");
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn list_authors_page(&self, page: i64) -> Result<AuthorPage, FindAllAuthorsError> {
        let authors = self.get_all_authors().await?;
        Ok(AuthorPage {
            page: paginate(&authors, page, self.page_size),
            search_text: None,
        })
    }

    #[instrument(skip(self))]
    async fn search_authors_page(
        &self,
        text: &str,
        page: i64,
    ) -> Result<AuthorPage, FindAllAuthorsError> {
        let authors = self.search_authors(text).await?;
        Ok(AuthorPage {
            page: paginate(&authors, page, self.page_size),
            search_text: (!text.trim().is_empty()).then(|| text.to_string()),
        })
    }
}
