use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, User};

/// Insert a user and return the id the database generated for it.
pub async fn insert_user(db: &PgPool, user: &NewUser) -> anyhow::Result<Uuid> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (email, password, first_name, last_name)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&user.email)
    .bind(&user.password)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .fetch_one(db)
    .await
    .context("insert user")?;
    Ok(id)
}

/// Users matching both email and password exactly.
pub async fn find_by_credentials(
    db: &PgPool,
    email: &str,
    password: &str,
) -> anyhow::Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password, first_name, last_name
          FROM users
         WHERE email = $1 AND password = $2
        "#,
    )
    .bind(email)
    .bind(password)
    .fetch_all(db)
    .await
    .context("find users by credentials")?;
    Ok(users)
}
