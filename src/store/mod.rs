//! Document store seam shared by the identity and library services.

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::repo_types::{NewUser, User},
    books::repo_types::{Book, NewBook},
};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Result of an update-one-by-id call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Collection-scoped operations over `users` and `books`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> anyhow::Result<Uuid>;

    /// Users whose email and password both match exactly, in store order.
    async fn find_users_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> anyhow::Result<Vec<User>>;

    async fn insert_book(&self, book: NewBook) -> anyhow::Result<Uuid>;

    async fn find_books_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Book>>;

    /// Sets `pages_read` and `updated_at` on one book. A book that already
    /// holds `pages_read` is matched but not modified, and keeps its
    /// `updated_at`.
    async fn set_pages_read(
        &self,
        book_id: Uuid,
        pages_read: i64,
        at: OffsetDateTime,
    ) -> anyhow::Result<UpdateOutcome>;
}

/// Stand-in used when the database could not be reached at startup; every
/// call fails.
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> anyhow::Result<T> {
        anyhow::bail!("store unavailable: {}", self.reason)
    }
}

#[async_trait]
impl Store for UnavailableStore {
    async fn insert_user(&self, _user: NewUser) -> anyhow::Result<Uuid> {
        self.fail()
    }

    async fn find_users_by_credentials(&self, _e: &str, _p: &str) -> anyhow::Result<Vec<User>> {
        self.fail()
    }

    async fn insert_book(&self, _book: NewBook) -> anyhow::Result<Uuid> {
        self.fail()
    }

    async fn find_books_by_owner(&self, _owner_id: Uuid) -> anyhow::Result<Vec<Book>> {
        self.fail()
    }

    async fn set_pages_read(
        &self,
        _book_id: Uuid,
        _pages_read: i64,
        _at: OffsetDateTime,
    ) -> anyhow::Result<UpdateOutcome> {
        self.fail()
    }
}
