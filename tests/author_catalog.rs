mod common;

use std::sync::Arc;

use author_catalog::models::{
    CreateAuthorError, DeleteAuthorError, FindAuthorError, UpdateAuthorError,
};
use author_catalog::{AuthorCatalog, AuthorCatalogService, MemoryAuthorRepository, PageSize};
use common::memory_catalog;

#[tokio::test]
async fn created_author_can_be_fetched() {
    let (_, catalog) = memory_catalog();

    let created = catalog
        .create_author("J.R.R. Tolkien", Some("Wrote The Hobbit"))
        .await
        .unwrap();
    let fetched = catalog.get_author(created.id()).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.name().as_str(), "J.R.R. Tolkien");
    assert_eq!(fetched.description(), Some("Wrote The Hobbit"));
}

#[tokio::test]
async fn ids_are_unique() {
    let (_, catalog) = memory_catalog();
    let a = catalog.create_author("Author A", None).await.unwrap();
    let b = catalog.create_author("Author A", None).await.unwrap();
    assert_ne!(a.id(), b.id());
}

#[tokio::test]
async fn blank_name_is_rejected_without_writing() {
    let (repo, catalog) = memory_catalog();

    for name in ["", "   "] {
        let err = catalog.create_author(name, Some("bio")).await.unwrap_err();
        assert!(matches!(err, CreateAuthorError::InvalidName(_)));
    }

    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn missing_author_is_not_found() {
    let (_, catalog) = memory_catalog();
    let err = catalog.get_author(42).await.unwrap_err();
    assert!(matches!(err, FindAuthorError::NotFound { id: 42 }));
}

#[tokio::test]
async fn update_overwrites_name_and_description() {
    let (_, catalog) = memory_catalog();
    let author = catalog
        .create_author("Mary Shelly", Some("Typo"))
        .await
        .unwrap();

    let updated = catalog
        .update_author(author.id(), " Mary Shelley ", None)
        .await
        .unwrap();

    assert_eq!(updated.id(), author.id());
    assert_eq!(updated.name().as_str(), "Mary Shelley");
    assert_eq!(updated.description(), None);
    assert_eq!(catalog.get_author(author.id()).await.unwrap(), updated);
}

#[tokio::test]
async fn update_of_missing_author_changes_nothing() {
    let (_, catalog) = memory_catalog();
    let author = catalog.create_author("Homer", None).await.unwrap();

    let err = catalog
        .update_author(author.id() + 100, "Virgil", None)
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateAuthorError::NotFound { .. }));
    assert_eq!(catalog.get_all_authors().await.unwrap(), vec![author]);
}

#[tokio::test]
async fn update_with_blank_name_keeps_record() {
    let (_, catalog) = memory_catalog();
    let author = catalog.create_author("Homer", Some("Epic poet")).await.unwrap();

    let err = catalog
        .update_author(author.id(), "  ", Some("changed"))
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateAuthorError::InvalidName(_)));
    assert_eq!(catalog.get_author(author.id()).await.unwrap(), author);
}

#[tokio::test]
async fn deleted_author_is_gone() {
    let (_, catalog) = memory_catalog();
    let author = catalog.create_author("Ephemeral", None).await.unwrap();

    catalog.delete_author(author.id()).await.unwrap();

    let err = catalog.get_author(author.id()).await.unwrap_err();
    assert!(matches!(err, FindAuthorError::NotFound { .. }));
}

#[tokio::test]
async fn deleting_missing_author_is_not_found() {
    let (_, catalog) = memory_catalog();
    let err = catalog.delete_author(9).await.unwrap_err();
    assert!(matches!(err, DeleteAuthorError::NotFound { id: 9 }));
}

#[tokio::test]
async fn author_with_books_cannot_be_deleted() {
    let (repo, catalog) = memory_catalog();
    let author = catalog.create_author("Agatha Christie", None).await.unwrap();
    repo.insert_book(author.id()).await;
    repo.insert_book(author.id()).await;

    let err = catalog.delete_author(author.id()).await.unwrap_err();

    assert!(matches!(err, DeleteAuthorError::Conflict { books: 2, .. }));
    assert_eq!(catalog.get_author(author.id()).await.unwrap(), author);
}

#[tokio::test]
async fn get_all_is_in_creation_order_and_search_filters() {
    let (_, catalog) = memory_catalog();
    let a = catalog.create_author("Author A", None).await.unwrap();
    let b = catalog.create_author("Author B", None).await.unwrap();

    assert_eq!(catalog.get_all_authors().await.unwrap(), vec![a, b.clone()]);
    assert_eq!(catalog.search_authors("B").await.unwrap(), vec![b]);
}

#[tokio::test]
async fn empty_search_equals_get_all() {
    let (_, catalog) = memory_catalog();
    for name in ["Zadie Smith", "Ali Smith", "Toni Morrison"] {
        catalog.create_author(name, None).await.unwrap();
    }

    let all = catalog.get_all_authors().await.unwrap();
    assert_eq!(catalog.search_authors("").await.unwrap(), all);
    assert_eq!(catalog.search_authors("  ").await.unwrap(), all);
}

#[tokio::test]
async fn search_ignores_case() {
    let (_, catalog) = memory_catalog();
    let tolkien = catalog.create_author("J.R.R. Tolkien", None).await.unwrap();
    catalog.create_author("C.S. Lewis", None).await.unwrap();

    assert_eq!(catalog.search_authors("tol").await.unwrap(), vec![tolkien]);
    assert!(catalog.search_authors("orwell").await.unwrap().is_empty());
}

#[tokio::test]
async fn listing_is_paged() {
    let (_, catalog) = memory_catalog();
    for n in 1..=25 {
        catalog.create_author(&format!("Author {n}"), None).await.unwrap();
    }

    let first = catalog.list_authors_page(1).await.unwrap();
    assert_eq!(first.page.items.len(), 10);
    assert_eq!(first.page.page_count, 3);
    assert_eq!(first.page.total_count, 25);
    assert_eq!(first.search_text, None);

    let third = catalog.list_authors_page(3).await.unwrap();
    assert_eq!(third.page.items.len(), 5);
    assert_eq!(third.page.items[0].name().as_str(), "Author 21");

    let fourth = catalog.list_authors_page(4).await.unwrap();
    assert!(fourth.page.is_empty());
}

#[tokio::test]
async fn empty_catalog_has_one_empty_page() {
    let (_, catalog) = memory_catalog();
    let page = catalog.list_authors_page(1).await.unwrap();
    assert!(page.page.is_empty());
    assert_eq!(page.page.page_count, 1);
}

#[tokio::test]
async fn search_results_are_paged_with_their_text() {
    let repo = Arc::new(MemoryAuthorRepository::new());
    let catalog = AuthorCatalogService::new(repo, PageSize::new(2).unwrap());
    for name in ["Anne Brontë", "Jane Austen", "Emily Brontë", "Charlotte Brontë"] {
        catalog.create_author(name, None).await.unwrap();
    }

    let second = catalog.search_authors_page("BRONTË", 2).await.unwrap();

    assert_eq!(second.search_text.as_deref(), Some("BRONTË"));
    assert_eq!(second.page.total_count, 3);
    assert_eq!(second.page.page_count, 2);
    let names: Vec<_> = second.page.items.iter().map(|a| a.name().as_str()).collect();
    assert_eq!(names, vec!["Charlotte Brontë"]);

    let blank = catalog.search_authors_page("", 0).await.unwrap();
    assert_eq!(blank.search_text, None);
    assert_eq!(blank.page.page, 1);
    assert_eq!(blank.page.total_count, 4);
}
