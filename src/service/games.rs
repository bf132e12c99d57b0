//! Game catalog operations.

use super::RequestValidator;
use crate::error::AppError;
use crate::model::{Game, GameNameStatistics, NewGame, SeedGame, SeedPublisher, SeedReport, StatisticOp};
use crate::store::CatalogStore;
use chrono::NaiveDate;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Publishers created per `create_random_tables` call.
pub const SEED_PUBLISHERS: usize = 3;
/// Games created for each seeded publisher.
pub const SEED_GAMES_PER_PUBLISHER: usize = 3;

pub struct GamesService;

impl GamesService {
    pub async fn list(store: &dyn CatalogStore) -> Result<Vec<Game>, AppError> {
        store.list_games().await
    }

    pub async fn get(store: &dyn CatalogStore, id: i32) -> Result<Game, AppError> {
        store
            .get_game(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".into()))
    }

    /// Insert a game. A given publisher must already exist.
    pub async fn create(store: &dyn CatalogStore, game: &NewGame) -> Result<Game, AppError> {
        RequestValidator::require_non_blank("GameName", &game.game_name)?;
        if let Some(publisher_id) = game.publisher_id {
            if store.get_publisher(publisher_id).await?.is_none() {
                return Err(AppError::Reference(format!(
                    "Publisher {} does not exist",
                    publisher_id
                )));
            }
        }
        let created = store.insert_game(game).await?;
        tracing::info!(game_id = created.game_id, "game created");
        Ok(created)
    }

    /// MIN/MAX/AVG/COUNT over game name lengths. The operation is checked before the store is touched.
    pub async fn statistics(store: &dyn CatalogStore, operation: Option<&str>) -> Result<GameNameStatistics, AppError> {
        let op: StatisticOp = operation
            .ok_or_else(|| AppError::Validation(StatisticOp::INVALID_MESSAGE.into()))?
            .parse()?;
        let result = store.game_name_statistic(op).await?;
        Ok(GameNameStatistics {
            operation: op.to_string(),
            result: result.map(|raw| op.value(raw)),
        })
    }

    /// Seed synthetic publishers and games in one transaction.
    pub async fn create_random_tables(store: &dyn CatalogStore) -> Result<SeedReport, AppError> {
        let seed = random_seed(&mut rand::thread_rng());
        let (publishers, games) = store
            .insert_seed(&seed)
            .await
            .map_err(|e| AppError::Internal(format!("seeding random tables failed: {}", e)))?;
        tracing::info!(publishers = publishers.len(), games = games.len(), "random tables created");
        Ok(SeedReport {
            message: "Random tables created successfully.".into(),
            publishers,
            games,
        })
    }
}

fn random_suffix<R: Rng>(rng: &mut R) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect()
}

fn random_release_date<R: Rng>(rng: &mut R) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        rng.gen_range(1990..=2024),
        rng.gen_range(1..=12),
        rng.gen_range(1..=28),
    )
}

fn random_seed<R: Rng>(rng: &mut R) -> Vec<SeedPublisher> {
    (0..SEED_PUBLISHERS)
        .map(|_| SeedPublisher {
            publisher_name: format!("Publisher-{}", random_suffix(rng)),
            games: (0..SEED_GAMES_PER_PUBLISHER)
                .map(|_| SeedGame {
                    game_name: format!("Game-{}", random_suffix(rng)),
                    release_date: random_release_date(rng),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewOwnership, NewUser, Ownership, Publisher, StatisticValue, User};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Delegates to a `MemoryStore` and counts statistic queries.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        statistic_queries: AtomicUsize,
    }

    #[async_trait]
    impl CatalogStore for CountingStore {
        async fn ping(&self) -> Result<(), AppError> {
            self.inner.ping().await
        }
        async fn list_publishers(&self) -> Result<Vec<Publisher>, AppError> {
            self.inner.list_publishers().await
        }
        async fn get_publisher(&self, id: i32) -> Result<Option<Publisher>, AppError> {
            self.inner.get_publisher(id).await
        }
        async fn insert_publisher(&self, name: &str) -> Result<Publisher, AppError> {
            self.inner.insert_publisher(name).await
        }
        async fn insert_publishers(&self, names: &[String]) -> Result<Vec<Publisher>, AppError> {
            self.inner.insert_publishers(names).await
        }
        async fn update_publisher(&self, id: i32, name: &str) -> Result<Option<Publisher>, AppError> {
            self.inner.update_publisher(id, name).await
        }
        async fn delete_publisher(&self, id: i32) -> Result<bool, AppError> {
            self.inner.delete_publisher(id).await
        }
        async fn games_by_publisher(&self, publisher_id: i32) -> Result<Vec<Game>, AppError> {
            self.inner.games_by_publisher(publisher_id).await
        }
        async fn list_games(&self) -> Result<Vec<Game>, AppError> {
            self.inner.list_games().await
        }
        async fn get_game(&self, id: i32) -> Result<Option<Game>, AppError> {
            self.inner.get_game(id).await
        }
        async fn find_game_by_name(&self, name: &str) -> Result<Option<Game>, AppError> {
            self.inner.find_game_by_name(name).await
        }
        async fn insert_game(&self, game: &NewGame) -> Result<Game, AppError> {
            self.inner.insert_game(game).await
        }
        async fn game_name_statistic(&self, op: StatisticOp) -> Result<Option<f64>, AppError> {
            self.statistic_queries.fetch_add(1, Ordering::SeqCst);
            self.inner.game_name_statistic(op).await
        }
        async fn insert_seed(&self, seed: &[SeedPublisher]) -> Result<(Vec<Publisher>, Vec<Game>), AppError> {
            self.inner.insert_seed(seed).await
        }
        async fn list_users(&self) -> Result<Vec<User>, AppError> {
            self.inner.list_users().await
        }
        async fn get_user(&self, id: i32) -> Result<Option<User>, AppError> {
            self.inner.get_user(id).await
        }
        async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
            self.inner.find_user_by_username(username).await
        }
        async fn insert_user(&self, user: &NewUser) -> Result<User, AppError> {
            self.inner.insert_user(user).await
        }
        async fn list_ownerships(&self) -> Result<Vec<Ownership>, AppError> {
            self.inner.list_ownerships().await
        }
        async fn get_ownership(&self, id: i32) -> Result<Option<Ownership>, AppError> {
            self.inner.get_ownership(id).await
        }
        async fn insert_ownership(&self, ownership: &NewOwnership) -> Result<Ownership, AppError> {
            self.inner.insert_ownership(ownership).await
        }
        async fn delete_ownership(&self, id: i32) -> Result<bool, AppError> {
            self.inner.delete_ownership(id).await
        }
    }

    fn new_game(name: &str, publisher_id: Option<i32>) -> NewGame {
        NewGame {
            game_name: name.into(),
            publisher_id,
            release_date: None,
        }
    }

    #[tokio::test]
    async fn get_unknown_game_is_not_found() {
        let store = MemoryStore::new();
        let err = GamesService::get(&store, 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_requires_existing_publisher() {
        let store = MemoryStore::new();
        let err = GamesService::create(&store, &new_game("Foo", Some(5))).await.unwrap_err();
        assert!(matches!(err, AppError::Reference(_)));
        assert!(GamesService::list(&store).await.unwrap().is_empty());

        let publisher = store.insert_publisher("Acme").await.unwrap();
        let game = GamesService::create(&store, &new_game("Foo", Some(publisher.publisher_id)))
            .await
            .unwrap();
        assert_eq!(game.publisher_id, Some(publisher.publisher_id));
        assert_eq!(GamesService::get(&store, game.game_id).await.unwrap(), game);
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let store = MemoryStore::new();
        let err = GamesService::create(&store, &new_game("  ", None)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn statistics_validate_operation() {
        let store = MemoryStore::new();
        for op in [None, Some("SUM"), Some("")] {
            let err = GamesService::statistics(&store, op).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn invalid_operation_never_reaches_the_store() {
        let store = CountingStore::default();
        for op in [None, Some("SUM"), Some("")] {
            assert!(GamesService::statistics(&store, op).await.is_err());
        }
        assert_eq!(store.statistic_queries.load(Ordering::SeqCst), 0);

        GamesService::statistics(&store, Some("min")).await.unwrap();
        assert_eq!(store.statistic_queries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn statistics_report_operation_name() {
        let store = MemoryStore::new();
        GamesService::create(&store, &new_game("Foo", None)).await.unwrap();
        GamesService::create(&store, &new_game("Foobar", None)).await.unwrap();
        let stats = GamesService::statistics(&store, Some("avg")).await.unwrap();
        assert_eq!(stats.operation, "AVG");
        assert_eq!(stats.result, Some(StatisticValue::Float(4.5)));
    }

    #[tokio::test]
    async fn random_tables_seed_publishers_with_games() {
        let store = MemoryStore::new();
        let report = GamesService::create_random_tables(&store).await.unwrap();
        assert_eq!(report.publishers.len(), SEED_PUBLISHERS);
        assert_eq!(report.games.len(), SEED_PUBLISHERS * SEED_GAMES_PER_PUBLISHER);
        for publisher in &report.publishers {
            let games = store.games_by_publisher(publisher.publisher_id).await.unwrap();
            assert_eq!(games.len(), SEED_GAMES_PER_PUBLISHER);
        }
    }

    #[test]
    fn seed_dates_are_valid() {
        let mut rng = rand::thread_rng();
        let seed = random_seed(&mut rng);
        assert!(seed
            .iter()
            .flat_map(|p| &p.games)
            .all(|g| g.release_date.is_some() && g.game_name.starts_with("Game-")));
    }
}
