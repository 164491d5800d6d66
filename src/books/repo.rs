use anyhow::Context;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::books::repo_types::{Book, NewBook};

pub async fn insert_book(db: &PgPool, book: &NewBook) -> anyhow::Result<Uuid> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO books (user_id, title, author, total_pages, pages_read, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(book.owner_id)
    .bind(&book.title)
    .bind(&book.author)
    .bind(book.total_pages)
    .bind(book.pages_read)
    .bind(&book.status)
    .bind(book.created_at)
    .bind(book.updated_at)
    .fetch_one(db)
    .await
    .context("insert book")?;
    Ok(id)
}

/// All books of one owner, in whatever order the table yields them.
pub async fn list_by_owner(db: &PgPool, owner_id: Uuid) -> anyhow::Result<Vec<Book>> {
    let rows = sqlx::query_as::<_, Book>(
        r#"
        SELECT id, user_id, title, author, total_pages, pages_read, status, created_at, updated_at
          FROM books
         WHERE user_id = $1
        "#,
    )
    .bind(owner_id)
    .fetch_all(db)
    .await
    .context("list books by owner")?;
    Ok(rows)
}

/// Returns `(matched, modified)`. Rows already holding `pages_read` are
/// matched but left untouched.
pub async fn set_pages_read(
    db: &PgPool,
    book_id: Uuid,
    pages_read: i64,
    at: OffsetDateTime,
) -> anyhow::Result<(i64, i64)> {
    let counts = sqlx::query_as::<_, (i64, i64)>(
        r#"
        WITH target AS (
            SELECT id, pages_read FROM books WHERE id = $1
        ), changed AS (
            UPDATE books b
               SET pages_read = $2, updated_at = $3
              FROM target t
             WHERE b.id = t.id AND t.pages_read IS DISTINCT FROM $2
         RETURNING b.id
        )
        SELECT (SELECT COUNT(*) FROM target), (SELECT COUNT(*) FROM changed)
        "#,
    )
    .bind(book_id)
    .bind(pages_read)
    .bind(at)
    .fetch_one(db)
    .await
    .context("update pages read")?;
    Ok(counts)
}
