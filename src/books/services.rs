use std::sync::Arc;

use axum::extract::FromRef;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::{
    books::{
        dto::{AddBookRequest, GetBooksRequest, UpdatePagesReadRequest},
        repo_types::{Book, NewBook},
    },
    error::ServiceError,
    state::AppState,
    store::Store,
    validate::{parse_id, present},
};

/// Books owned by users and their reading progress.
#[derive(Clone)]
pub struct LibraryService {
    store: Arc<dyn Store>,
}

impl FromRef<AppState> for LibraryService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.store.clone())
    }
}

impl LibraryService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Registers an unread book for `userId`. The owner is not looked up.
    pub async fn add_book(&self, req: AddBookRequest) -> Result<Uuid, ServiceError> {
        let (Some(owner), Some(title), Some(author), Some(total_pages)) = (
            present(&req.user_id),
            present(&req.title),
            present(&req.author),
            req.total_pages.as_ref().filter(|p| p.is_supplied()),
        ) else {
            return Err(ServiceError::Validation("All fields are required"));
        };
        let owner_id = parse_id(owner)?;

        let book = NewBook::unread(
            owner_id,
            title.to_string(),
            author.to_string(),
            total_pages.to_pages(),
            OffsetDateTime::now_utc(),
        );
        let id = self.store.insert_book(book).await?;
        Ok(id)
    }

    /// Every book of the owner. An owner without books is `NotFound`.
    pub async fn list_books(&self, req: GetBooksRequest) -> Result<Vec<Book>, ServiceError> {
        let Some(owner) = present(&req.user_id) else {
            return Err(ServiceError::Validation("User ID is required"));
        };
        let owner_id = parse_id(owner)?;

        let books = self.store.find_books_by_owner(owner_id).await?;
        if books.is_empty() {
            return Err(ServiceError::NotFound("No books found for this user"));
        }
        debug!(%owner_id, count = books.len(), "books listed");
        Ok(books)
    }

    /// Writes the new progress. A missing book and a value that is already
    /// stored both end in `NotFound`.
    pub async fn update_pages_read(&self, req: UpdatePagesReadRequest) -> Result<(), ServiceError> {
        let (Some(book), Some(pages_read)) = (present(&req.book_id), req.pages_read) else {
            return Err(ServiceError::Validation("Book ID and pages read are required"));
        };
        let book_id = parse_id(book)?;

        let outcome = self
            .store
            .set_pages_read(book_id, pages_read, OffsetDateTime::now_utc())
            .await?;
        debug!(%book_id, matched = outcome.matched, modified = outcome.modified, "pages read update");
        if outcome.modified == 0 {
            return Err(ServiceError::NotFound("Book not found or no changes made"));
        }
        Ok(())
    }
}
