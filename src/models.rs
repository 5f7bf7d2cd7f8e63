use thiserror::Error;

use crate::pagination::Page;

pub type AuthorId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(raw: &str) -> Result<Self, AuthorNameEmptyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(AuthorNameEmptyError)
        } else {
            Ok(Self(trimmed.into()))
        }
    }

    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AuthorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Author name cannot be empty")]
pub struct AuthorNameEmptyError;

/// Trims a free-text description, treating blank input as absent.
pub fn normalize_description(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    id: AuthorId,
    name: AuthorName,
    description: Option<String>,
}

impl Author {
    pub const fn new(id: AuthorId, name: AuthorName, description: Option<String>) -> Self {
        Self {
            id,
            name,
            description,
        }
    }

    pub const fn id(&self) -> AuthorId {
        self.id
    }

    pub const fn name(&self) -> &AuthorName {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Replaces name and description, keeping the id.
    pub fn overwrite(&mut self, name: AuthorName, description: Option<String>) {
        self.name = name;
        self.description = description;
    }
}

#[derive(Debug)]
pub struct CreateAuthorRequest {
    name: AuthorName,
    description: Option<String>,
}

impl CreateAuthorRequest {
    pub const fn new(name: AuthorName, description: Option<String>) -> Self {
        Self { name, description }
    }

    pub const fn name(&self) -> &AuthorName {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[derive(Debug)]
pub struct UpdateAuthorRequest {
    id: AuthorId,
    name: AuthorName,
    description: Option<String>,
}

impl UpdateAuthorRequest {
    pub const fn new(id: AuthorId, name: AuthorName, description: Option<String>) -> Self {
        Self {
            id,
            name,
            description,
        }
    }

    pub const fn id(&self) -> AuthorId {
        self.id
    }

    pub fn into_parts(self) -> (AuthorId, AuthorName, Option<String>) {
        (self.id, self.name, self.description)
    }
}

/// A page of authors, optionally produced by a name search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorPage {
    pub page: Page<Author>,
    pub search_text: Option<String>,
}

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Record is still referenced by dependent rows")]
    StillReferenced,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum CreateAuthorError {
    #[error(transparent)]
    InvalidName(#[from] AuthorNameEmptyError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Error, Debug)]
pub enum FindAuthorError {
    #[error("Author with id \"{id}\" does not exist")]
    NotFound { id: AuthorId },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct FindAllAuthorsError(#[from] pub RepositoryError);

#[derive(Error, Debug)]
pub enum UpdateAuthorError {
    #[error("Author with id \"{id}\" does not exist")]
    NotFound { id: AuthorId },
    #[error(transparent)]
    InvalidName(#[from] AuthorNameEmptyError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Error, Debug)]
pub enum DeleteAuthorError {
    #[error("Author with id \"{id}\" does not exist")]
    NotFound { id: AuthorId },
    #[error("Author with id \"{id}\" still has {books} book(s)")]
    Conflict { id: AuthorId, books: u64 },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
