use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Status given to every new book. Nothing moves a book out of it.
pub const STATUS_CURRENTLY_READING: &str = "Currently Reading";

/// Book document as stored in the `books` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Owning user. Not checked against the users collection.
    #[serde(rename = "userId")]
    #[sqlx(rename = "user_id")]
    pub owner_id: Uuid,
    pub title: String,
    pub author: String,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
    #[serde(rename = "pagesRead")]
    pub pages_read: i64,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewBook {
    pub owner_id: Uuid,
    pub title: String,
    pub author: String,
    pub total_pages: i64,
    pub pages_read: i64,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl NewBook {
    /// A freshly registered book: nothing read yet, timestamps both `now`.
    pub fn unread(
        owner_id: Uuid,
        title: String,
        author: String,
        total_pages: i64,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            owner_id,
            title,
            author,
            total_pages,
            pages_read: 0,
            status: STATUS_CURRENTLY_READING.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
