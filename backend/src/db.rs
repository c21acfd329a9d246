use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::models::User;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    profile_picture TEXT,
    password_hash TEXT,
    google_id TEXT UNIQUE
)";

const USER_COLUMNS: &str = "id, username, email, profile_picture, password_hash, google_id";

pub async fn init_pool(url: &str) -> Result<SqlitePool> {
    // Single writer is plenty for a thin auth gateway, and it keeps
    // `sqlite::memory:` pools coherent in tests.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(url)
        .await?;
    sqlx::query(SCHEMA).execute(&pool).await?;
    Ok(pool)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_google_id(
    pool: &SqlitePool,
    google_id: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE google_id = ?"
    ))
    .bind(google_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_local_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let result = sqlx::query("INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)")
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await?;

    Ok(User {
        id: result.last_insert_rowid(),
        username: username.to_string(),
        email: email.to_string(),
        profile_picture: None,
        password_hash: Some(password_hash.to_string()),
        google_id: None,
    })
}

pub async fn insert_google_user(
    pool: &SqlitePool,
    google_id: &str,
    username: &str,
    email: &str,
    profile_picture: Option<&str>,
) -> Result<User, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO users (username, email, profile_picture, google_id) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(profile_picture)
    .bind(google_id)
    .execute(pool)
    .await?;

    Ok(User {
        id: result.last_insert_rowid(),
        username: username.to_string(),
        email: email.to_string(),
        profile_picture: profile_picture.map(String::from),
        password_hash: None,
        google_id: Some(google_id.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        init_pool("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn insert_and_find_local_user() {
        let pool = test_pool().await;
        let user = insert_local_user(&pool, "alice", "alice@example.com", "hash")
            .await
            .unwrap();

        let found = find_by_email(&pool, "alice@example.com").await.unwrap();
        let found = found.expect("user should exist");
        assert_eq!(found.id, user.id);
        assert_eq!(found.username, "alice");
        assert_eq!(found.password_hash.as_deref(), Some("hash"));
        assert!(found.google_id.is_none());

        assert!(find_by_email(&pool, "bob@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let pool = test_pool().await;
        insert_local_user(&pool, "alice", "alice@example.com", "hash")
            .await
            .unwrap();
        let duplicate = insert_local_user(&pool, "other", "alice@example.com", "hash2").await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn google_user_is_found_by_external_id() {
        let pool = test_pool().await;
        assert!(find_by_google_id(&pool, "g-123").await.unwrap().is_none());

        let user = insert_google_user(
            &pool,
            "g-123",
            "Alice",
            "alice@gmail.com",
            Some("https://example.com/a.png"),
        )
        .await
        .unwrap();
        assert!(user.password_hash.is_none());

        let found = find_by_google_id(&pool, "g-123").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.google_id.as_deref(), Some("g-123"));
    }
}
