use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, UpdateOutcome};
use crate::{
    auth::repo_types::{NewUser, User},
    books::repo_types::{Book, NewBook},
};

/// In-process store. Documents are kept in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    books: RwLock<Vec<Book>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        self.users.write().await.push(User {
            id,
            email: user.email,
            password: user.password,
            first_name: user.first_name,
            last_name: user.last_name,
        });
        Ok(id)
    }

    async fn find_users_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> anyhow::Result<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| u.email == email && u.password == password)
            .cloned()
            .collect())
    }

    async fn insert_book(&self, book: NewBook) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        self.books.write().await.push(Book {
            id,
            owner_id: book.owner_id,
            title: book.title,
            author: book.author,
            total_pages: book.total_pages,
            pages_read: book.pages_read,
            status: book.status,
            created_at: book.created_at,
            updated_at: book.updated_at,
        });
        Ok(id)
    }

    async fn find_books_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Book>> {
        let books = self.books.read().await;
        Ok(books
            .iter()
            .filter(|b| b.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn set_pages_read(
        &self,
        book_id: Uuid,
        pages_read: i64,
        at: OffsetDateTime,
    ) -> anyhow::Result<UpdateOutcome> {
        let mut books = self.books.write().await;
        let Some(book) = books.iter_mut().find(|b| b.id == book_id) else {
            return Ok(UpdateOutcome::default());
        };
        if book.pages_read == pages_read {
            return Ok(UpdateOutcome {
                matched: 1,
                modified: 0,
            });
        }
        book.pages_read = pages_read;
        book.updated_at = at;
        Ok(UpdateOutcome {
            matched: 1,
            modified: 1,
        })
    }
}
