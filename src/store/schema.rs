//! Database bootstrap: create the database and the catalog tables when absent.

use crate::error::AppError;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Catalog DDL in dependency order. Every statement is idempotent.
const TABLES: &[(&str, &str)] = &[
    (
        "publishers",
        r#"
        CREATE TABLE IF NOT EXISTS publishers (
            publisher_id SERIAL PRIMARY KEY,
            publisher_name TEXT NOT NULL
        )
        "#,
    ),
    (
        "games",
        r#"
        CREATE TABLE IF NOT EXISTS games (
            game_id SERIAL PRIMARY KEY,
            game_name TEXT NOT NULL,
            publisher_id INT REFERENCES publishers (publisher_id) ON DELETE SET NULL,
            release_date DATE
        )
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id SERIAL PRIMARY KEY,
            username TEXT NOT NULL,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL
        )
        "#,
    ),
    (
        "user_game_ownership",
        r#"
        CREATE TABLE IF NOT EXISTS user_game_ownership (
            ownership_id SERIAL PRIMARY KEY,
            user_id INT NOT NULL REFERENCES users (user_id) ON DELETE CASCADE,
            game_id INT NOT NULL REFERENCES games (game_id) ON DELETE CASCADE,
            purchase_date DATE
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS games_publisher_id_idx ON games (publisher_id)",
    "CREATE INDEX IF NOT EXISTS games_game_name_idx ON games (game_name)",
    "CREATE INDEX IF NOT EXISTS users_username_idx ON users (username)",
];

/// Create the catalog tables and lookup indexes if they do not exist yet.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for &(name, ddl) in TABLES {
        tracing::debug!(table = name, "ensuring table");
        sqlx::query(ddl).execute(pool).await?;
    }
    for &ddl in INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::Internal(format!("invalid database url: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::Internal("database url has no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres{}", base, query);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_targets_postgres_database() {
        let (admin, name) = parse_db_name_from_url("postgres://root:pw@localhost:5432/game_catalog").unwrap();
        assert_eq!(admin, "postgres://root:pw@localhost:5432/postgres");
        assert_eq!(name, "game_catalog");
    }

    #[test]
    fn query_string_is_kept_on_admin_url() {
        let (admin, name) = parse_db_name_from_url("postgres://localhost/catalog?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(name, "catalog");
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("game\"catalog"), "\"game\"\"catalog\"");
    }
}
