use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::{Store, UpdateOutcome};
use crate::{
    auth::{
        repo as users,
        repo_types::{NewUser, User},
    },
    books::{
        repo as books,
        repo_types::{Book, NewBook},
    },
    config::DatabaseConfig,
};

/// The two collections. `books.user_id` deliberately has no foreign key.
const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id          UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        email       TEXT NOT NULL,
        password    TEXT NOT NULL,
        first_name  TEXT NOT NULL,
        last_name   TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id          UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id     UUID NOT NULL,
        title       TEXT NOT NULL,
        author      TEXT NOT NULL,
        total_pages BIGINT NOT NULL,
        pages_read  BIGINT NOT NULL DEFAULT 0,
        status      TEXT NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL,
        updated_at  TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS books_user_id_idx ON books (user_id)",
];

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .connect(&cfg.url)
            .await
            .context("connect to database")?;
        let store = Self::from_pool(db);
        store.ensure_collections().await?;
        info!("database collections ready");
        Ok(store)
    }

    pub fn from_pool(db: PgPool) -> Self {
        Self { db }
    }

    async fn ensure_collections(&self) -> anyhow::Result<()> {
        for stmt in SCHEMA {
            sqlx::query(stmt)
                .execute(&self.db)
                .await
                .context("create collections")?;
        }
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: NewUser) -> anyhow::Result<Uuid> {
        users::insert_user(&self.db, &user).await
    }

    async fn find_users_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> anyhow::Result<Vec<User>> {
        users::find_by_credentials(&self.db, email, password).await
    }

    async fn insert_book(&self, book: NewBook) -> anyhow::Result<Uuid> {
        books::insert_book(&self.db, &book).await
    }

    async fn find_books_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Book>> {
        books::list_by_owner(&self.db, owner_id).await
    }

    async fn set_pages_read(
        &self,
        book_id: Uuid,
        pages_read: i64,
        at: OffsetDateTime,
    ) -> anyhow::Result<UpdateOutcome> {
        let (matched, modified) = books::set_pages_read(&self.db, book_id, pages_read, at).await?;
        Ok(UpdateOutcome {
            matched: matched.try_into().unwrap_or_default(),
            modified: modified.try_into().unwrap_or_default(),
        })
    }
}
