//! Author catalog: commands and queries over a repository of authors, with
//! name search and page slicing for listings.

pub mod config;
pub mod database;
pub mod models;
pub mod pagination;
pub mod repositories;
pub mod search;
pub mod service;

pub use models::{Author, AuthorId, AuthorName, AuthorPage};
pub use pagination::{Page, PageSize, paginate};
pub use repositories::AuthorRepository;
pub use repositories::memory::MemoryAuthorRepository;
pub use service::{AuthorCatalog, AuthorCatalogService};
