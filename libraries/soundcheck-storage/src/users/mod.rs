//! User management, identity resolution and credential queries

use crate::error::conflict_as;
use soundcheck_core::{
    error::Result,
    types::{
        normalize_username, placeholder_email, Credentials, NewUser, User, UserId,
        UNUSABLE_PASSWORD_HASH,
    },
    SoundcheckError,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// How many times identity creation is attempted when it loses a race for
/// the database write lock
const MAX_RESOLVE_ATTEMPTS: u32 = 3;

/// SQLite result codes that mean "another writer got there first, try again"
/// (`SQLITE_BUSY`, `SQLITE_LOCKED`, `SQLITE_BUSY_RECOVERY`, `SQLITE_BUSY_SNAPSHOT`)
const TRANSIENT_SQLITE_CODES: &[&str] = &["5", "6", "261", "517"];

fn user_from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Register a credentialed user
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `user` - Username, email and an already hashed password
pub async fn register(pool: &SqlitePool, user: NewUser) -> Result<User> {
    let username = user.username.trim();
    let email = user.email.trim();
    if username.is_empty() || email.is_empty() {
        return Err(SoundcheckError::invalid_input(
            "username and email are required",
        ));
    }

    let result = sqlx::query(
        "INSERT INTO users (username, email, password_hash)
         VALUES (?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(&user.password_hash)
    .execute(pool)
    .await
    .map_err(conflict_as("Email or username already exists"))?;

    get_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| SoundcheckError::storage("Failed to retrieve created user"))
}

pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, email, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, email, created_at FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Get the stored credential for an email address
///
/// Returns `None` when no user has that email.
pub async fn find_credentials_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Credentials>> {
    let row = sqlx::query("SELECT id, username, password_hash FROM users WHERE email = ?")
        .bind(email.trim())
        .fetch_optional(pool)
        .await?;

    row.map(|row| {
        Ok(Credentials {
            user_id: row.try_get("id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
        })
    })
    .transpose()
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, email, created_at FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    rows.iter().map(user_from_row).collect()
}

/// Resolve a display name to a user id, creating the user when absent
///
/// The name is normalized first (trimmed, blank becomes `anonymous`). A
/// known name is answered with a plain read. For an unseen name the insert
/// and the follow-up lookup share one transaction, and the insert yields to
/// an existing row instead of failing, so concurrent first-time callers all
/// end up with the id of the single row that won.
pub async fn resolve_or_create(pool: &SqlitePool, display_name: &str) -> Result<UserId> {
    let username = normalize_username(display_name);

    if let Some(id) = find_id(pool, &username).await? {
        return Ok(id);
    }

    let mut attempt = 1;
    loop {
        match insert_if_absent(pool, &username).await {
            Ok(id) => return Ok(id),
            Err(err) if attempt < MAX_RESOLVE_ATTEMPTS && is_transient(&err) => {
                tracing::debug!(%username, attempt, error = %err, "retrying identity creation");
                attempt += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

async fn find_id(pool: &SqlitePool, username: &str) -> Result<Option<UserId>> {
    let id = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(id)
}

/// One transactional attempt at creating `username`
///
/// The write comes first so the transaction takes the write lock before it
/// reads; dropping the transaction on any error rolls it back. When another
/// account already owns the placeholder email the identity is created
/// without one.
async fn insert_if_absent(
    pool: &SqlitePool,
    username: &str,
) -> std::result::Result<UserId, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let email = placeholder_email(username);
    let result = sqlx::query(
        "INSERT INTO users (username, email, password_hash)
         VALUES (?, CASE WHEN EXISTS (SELECT 1 FROM users WHERE email = ?) THEN NULL ELSE ? END, ?)
         ON CONFLICT(username) DO NOTHING",
    )
    .bind(username)
    .bind(&email)
    .bind(&email)
    .bind(UNUSABLE_PASSWORD_HASH)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() > 0 {
        tracing::debug!(%username, "created identity on first use");
    }

    let id: UserId = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(id)
}

fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| TRANSIENT_SQLITE_CODES.contains(&code.as_ref())),
        sqlx::Error::PoolTimedOut => true,
        _ => false,
    }
}

/// Delete a user together with every comment they wrote
///
/// Both deletes run in one transaction. Returns the number of comments
/// removed; a missing user is `NotFound` and leaves nothing changed.
pub async fn delete_with_comments(pool: &SqlitePool, username: &str) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let comments = sqlx::query(
        "DELETE FROM comments
         WHERE user_id = (SELECT id FROM users WHERE username = ?)",
    )
    .bind(username)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let users = sqlx::query("DELETE FROM users WHERE username = ?")
        .bind(username)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if users == 0 {
        tx.rollback().await?;
        return Err(SoundcheckError::not_found("User", username));
    }

    tx.commit().await?;

    tracing::info!(%username, comments, "deleted user and their comments");

    Ok(comments)
}
