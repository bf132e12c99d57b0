//! PostgreSQL-backed [`CatalogStore`].

use super::CatalogStore;
use crate::error::AppError;
use crate::model::{Game, NewGame, NewOwnership, NewUser, Ownership, Publisher, SeedPublisher, StatisticOp, User};
use async_trait::async_trait;
use sqlx::PgPool;

const PUBLISHER_COLUMNS: &str = "publisher_id, publisher_name";
const GAME_COLUMNS: &str = "game_id, game_name, publisher_id, release_date";
const USER_COLUMNS: &str = "user_id, username, email";

/// Ownership rows joined with their user and game for the display names.
const OWNERSHIP_SELECT: &str = r#"
    SELECT o.ownership_id, o.user_id, u.username, o.game_id, g.game_name, o.purchase_date
    FROM user_game_ownership o
    JOIN users u ON u.user_id = o.user_id
    JOIN games g ON g.game_id = o.game_id
"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn statistic_sql(op: StatisticOp) -> String {
    format!("SELECT {}(CHAR_LENGTH(game_name))::FLOAT8 FROM games", op.as_str())
}

async fn insert_publisher_in(conn: &mut sqlx::PgConnection, name: &str) -> Result<Publisher, AppError> {
    let row = sqlx::query_as::<_, Publisher>(&format!(
        "INSERT INTO publishers (publisher_name) VALUES ($1) RETURNING {}",
        PUBLISHER_COLUMNS
    ))
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;
    Ok(row)
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_publishers(&self) -> Result<Vec<Publisher>, AppError> {
        let rows = sqlx::query_as::<_, Publisher>(&format!(
            "SELECT {} FROM publishers ORDER BY publisher_id",
            PUBLISHER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_publisher(&self, id: i32) -> Result<Option<Publisher>, AppError> {
        let row = sqlx::query_as::<_, Publisher>(&format!(
            "SELECT {} FROM publishers WHERE publisher_id = $1",
            PUBLISHER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_publisher(&self, name: &str) -> Result<Publisher, AppError> {
        let mut conn = self.pool.acquire().await?;
        insert_publisher_in(&mut *conn, name).await
    }

    async fn insert_publishers(&self, names: &[String]) -> Result<Vec<Publisher>, AppError> {
        tracing::debug!(count = names.len(), "inserting publishers (tx)");
        let mut tx = self.pool.begin().await?;
        let mut out = Vec::with_capacity(names.len());
        for name in names {
            out.push(insert_publisher_in(&mut *tx, name).await?);
        }
        tx.commit().await?;
        Ok(out)
    }

    async fn update_publisher(&self, id: i32, name: &str) -> Result<Option<Publisher>, AppError> {
        let row = sqlx::query_as::<_, Publisher>(&format!(
            "UPDATE publishers SET publisher_name = $2 WHERE publisher_id = $1 RETURNING {}",
            PUBLISHER_COLUMNS
        ))
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_publisher(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM publishers WHERE publisher_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn games_by_publisher(&self, publisher_id: i32) -> Result<Vec<Game>, AppError> {
        let rows = sqlx::query_as::<_, Game>(&format!(
            "SELECT {} FROM games WHERE publisher_id = $1 ORDER BY game_id",
            GAME_COLUMNS
        ))
        .bind(publisher_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_games(&self) -> Result<Vec<Game>, AppError> {
        let rows = sqlx::query_as::<_, Game>(&format!("SELECT {} FROM games ORDER BY game_id", GAME_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_game(&self, id: i32) -> Result<Option<Game>, AppError> {
        let row = sqlx::query_as::<_, Game>(&format!("SELECT {} FROM games WHERE game_id = $1", GAME_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_game_by_name(&self, name: &str) -> Result<Option<Game>, AppError> {
        let row = sqlx::query_as::<_, Game>(&format!(
            "SELECT {} FROM games WHERE game_name = $1 ORDER BY game_id LIMIT 1",
            GAME_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_game(&self, game: &NewGame) -> Result<Game, AppError> {
        let row = sqlx::query_as::<_, Game>(&format!(
            "INSERT INTO games (game_name, publisher_id, release_date) VALUES ($1, $2, $3) RETURNING {}",
            GAME_COLUMNS
        ))
        .bind(&game.game_name)
        .bind(game.publisher_id)
        .bind(game.release_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn game_name_statistic(&self, op: StatisticOp) -> Result<Option<f64>, AppError> {
        let sql = statistic_sql(op);
        tracing::debug!(sql = %sql, "query");
        let value = sqlx::query_scalar::<_, Option<f64>>(&sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(value)
    }

    async fn insert_seed(&self, seed: &[SeedPublisher]) -> Result<(Vec<Publisher>, Vec<Game>), AppError> {
        let mut tx = self.pool.begin().await?;
        let mut publishers = Vec::with_capacity(seed.len());
        let mut games = Vec::new();
        for entry in seed {
            let publisher = insert_publisher_in(&mut *tx, &entry.publisher_name).await?;
            for game in &entry.games {
                let row = sqlx::query_as::<_, Game>(&format!(
                    "INSERT INTO games (game_name, publisher_id, release_date) VALUES ($1, $2, $3) RETURNING {}",
                    GAME_COLUMNS
                ))
                .bind(&game.game_name)
                .bind(publisher.publisher_id)
                .bind(game.release_date)
                .fetch_one(&mut *tx)
                .await?;
                games.push(row);
            }
            publishers.push(publisher);
        }
        tx.commit().await?;
        Ok((publishers, games))
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users ORDER BY user_id", USER_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE user_id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1 ORDER BY user_id LIMIT 1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_ownerships(&self) -> Result<Vec<Ownership>, AppError> {
        let rows = sqlx::query_as::<_, Ownership>(&format!("{} ORDER BY o.ownership_id", OWNERSHIP_SELECT))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_ownership(&self, id: i32) -> Result<Option<Ownership>, AppError> {
        let row = sqlx::query_as::<_, Ownership>(&format!("{} WHERE o.ownership_id = $1", OWNERSHIP_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_ownership(&self, ownership: &NewOwnership) -> Result<Ownership, AppError> {
        let row = sqlx::query_as::<_, Ownership>(
            r#"
            WITH o AS (
                INSERT INTO user_game_ownership (user_id, game_id, purchase_date)
                VALUES ($1, $2, $3)
                RETURNING ownership_id, user_id, game_id, purchase_date
            )
            SELECT o.ownership_id, o.user_id, u.username, o.game_id, g.game_name, o.purchase_date
            FROM o
            JOIN users u ON u.user_id = o.user_id
            JOIN games g ON g.game_id = o.game_id
            "#,
        )
        .bind(ownership.user_id)
        .bind(ownership.game_id)
        .bind(ownership.purchase_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_ownership(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_game_ownership WHERE ownership_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistic_sql_uses_name_length() {
        assert_eq!(
            statistic_sql(StatisticOp::Avg),
            "SELECT AVG(CHAR_LENGTH(game_name))::FLOAT8 FROM games"
        );
        assert_eq!(
            statistic_sql(StatisticOp::Count),
            "SELECT COUNT(CHAR_LENGTH(game_name))::FLOAT8 FROM games"
        );
    }
}
