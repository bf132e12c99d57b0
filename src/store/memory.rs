//! In-process [`CatalogStore`] with the same referential rules as the PostgreSQL schema.
//! Used by the test-suite and for running the service without a database.

use super::CatalogStore;
use crate::error::AppError;
use crate::model::{Game, NewGame, NewOwnership, NewUser, Ownership, Publisher, SeedPublisher, StatisticOp, User};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct UserRecord {
    user: User,
    #[allow(dead_code)]
    password_hash: String,
}

struct OwnershipRecord {
    user_id: i32,
    game_id: i32,
    purchase_date: Option<NaiveDate>,
}

/// Mirrors SERIAL columns: ids start at 1 and are never reused.
#[derive(Default)]
struct Sequences {
    publisher: i32,
    game: i32,
    user: i32,
    ownership: i32,
}

fn next(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

#[derive(Default)]
struct Tables {
    seq: Sequences,
    publishers: BTreeMap<i32, Publisher>,
    games: BTreeMap<i32, Game>,
    users: BTreeMap<i32, UserRecord>,
    ownerships: BTreeMap<i32, OwnershipRecord>,
}

impl Tables {
    fn ownership_view(&self, id: i32, rec: &OwnershipRecord) -> Option<Ownership> {
        let user = self.users.get(&rec.user_id)?;
        let game = self.games.get(&rec.game_id)?;
        Some(Ownership {
            ownership_id: id,
            user_id: rec.user_id,
            username: user.user.username.clone(),
            game_id: rec.game_id,
            game_name: game.game_name.clone(),
            purchase_date: rec.purchase_date,
        })
    }

    fn push_publisher(&mut self, name: &str) -> Publisher {
        let publisher = Publisher {
            publisher_id: next(&mut self.seq.publisher),
            publisher_name: name.to_string(),
        };
        self.publishers.insert(publisher.publisher_id, publisher.clone());
        publisher
    }

    fn push_game(&mut self, name: &str, publisher_id: Option<i32>, release_date: Option<NaiveDate>) -> Result<Game, AppError> {
        if let Some(pid) = publisher_id {
            if !self.publishers.contains_key(&pid) {
                return Err(AppError::Reference(format!("Publisher {} does not exist", pid)));
            }
        }
        let game = Game {
            game_id: next(&mut self.seq.game),
            game_name: name.to_string(),
            publisher_id,
            release_date,
        };
        self.games.insert(game.game_id, game.clone());
        Ok(game)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }

    async fn list_publishers(&self) -> Result<Vec<Publisher>, AppError> {
        Ok(self.read()?.publishers.values().cloned().collect())
    }

    async fn get_publisher(&self, id: i32) -> Result<Option<Publisher>, AppError> {
        Ok(self.read()?.publishers.get(&id).cloned())
    }

    async fn insert_publisher(&self, name: &str) -> Result<Publisher, AppError> {
        Ok(self.write()?.push_publisher(name))
    }

    async fn insert_publishers(&self, names: &[String]) -> Result<Vec<Publisher>, AppError> {
        let mut tables = self.write()?;
        Ok(names.iter().map(|n| tables.push_publisher(n)).collect())
    }

    async fn update_publisher(&self, id: i32, name: &str) -> Result<Option<Publisher>, AppError> {
        let mut tables = self.write()?;
        Ok(tables.publishers.get_mut(&id).map(|p| {
            p.publisher_name = name.to_string();
            p.clone()
        }))
    }

    async fn delete_publisher(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if tables.publishers.remove(&id).is_none() {
            return Ok(false);
        }
        // ON DELETE SET NULL
        for game in tables.games.values_mut() {
            if game.publisher_id == Some(id) {
                game.publisher_id = None;
            }
        }
        Ok(true)
    }

    async fn games_by_publisher(&self, publisher_id: i32) -> Result<Vec<Game>, AppError> {
        Ok(self
            .read()?
            .games
            .values()
            .filter(|g| g.publisher_id == Some(publisher_id))
            .cloned()
            .collect())
    }

    async fn list_games(&self) -> Result<Vec<Game>, AppError> {
        Ok(self.read()?.games.values().cloned().collect())
    }

    async fn get_game(&self, id: i32) -> Result<Option<Game>, AppError> {
        Ok(self.read()?.games.get(&id).cloned())
    }

    async fn find_game_by_name(&self, name: &str) -> Result<Option<Game>, AppError> {
        Ok(self.read()?.games.values().find(|g| g.game_name == name).cloned())
    }

    async fn insert_game(&self, game: &NewGame) -> Result<Game, AppError> {
        self.write()?
            .push_game(&game.game_name, game.publisher_id, game.release_date)
    }

    async fn game_name_statistic(&self, op: StatisticOp) -> Result<Option<f64>, AppError> {
        let tables = self.read()?;
        let lengths: Vec<f64> = tables
            .games
            .values()
            .map(|g| g.game_name.chars().count() as f64)
            .collect();
        Ok(match op {
            StatisticOp::Count => Some(lengths.len() as f64),
            _ if lengths.is_empty() => None,
            StatisticOp::Min => lengths.iter().copied().reduce(f64::min),
            StatisticOp::Max => lengths.iter().copied().reduce(f64::max),
            StatisticOp::Avg => Some(lengths.iter().sum::<f64>() / lengths.len() as f64),
        })
    }

    async fn insert_seed(&self, seed: &[SeedPublisher]) -> Result<(Vec<Publisher>, Vec<Game>), AppError> {
        let mut tables = self.write()?;
        let mut publishers = Vec::with_capacity(seed.len());
        let mut games = Vec::new();
        for entry in seed {
            let publisher = tables.push_publisher(&entry.publisher_name);
            for game in &entry.games {
                games.push(tables.push_game(&game.game_name, Some(publisher.publisher_id), game.release_date)?);
            }
            publishers.push(publisher);
        }
        Ok((publishers, games))
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.read()?.users.values().map(|r| r.user.clone()).collect())
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.read()?.users.get(&id).map(|r| r.user.clone()))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|r| r.user.username == username)
            .map(|r| r.user.clone()))
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, AppError> {
        let mut tables = self.write()?;
        let record = UserRecord {
            user: User {
                user_id: next(&mut tables.seq.user),
                username: user.username.clone(),
                email: user.email.clone(),
            },
            password_hash: user.password_hash.clone(),
        };
        let out = record.user.clone();
        tables.users.insert(out.user_id, record);
        Ok(out)
    }

    async fn list_ownerships(&self) -> Result<Vec<Ownership>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .ownerships
            .iter()
            .filter_map(|(id, rec)| tables.ownership_view(*id, rec))
            .collect())
    }

    async fn get_ownership(&self, id: i32) -> Result<Option<Ownership>, AppError> {
        let tables = self.read()?;
        Ok(tables.ownerships.get(&id).and_then(|rec| tables.ownership_view(id, rec)))
    }

    async fn insert_ownership(&self, ownership: &NewOwnership) -> Result<Ownership, AppError> {
        let mut tables = self.write()?;
        if !tables.users.contains_key(&ownership.user_id) {
            return Err(AppError::Reference(format!("User {} does not exist", ownership.user_id)));
        }
        if !tables.games.contains_key(&ownership.game_id) {
            return Err(AppError::Reference(format!("Game {} does not exist", ownership.game_id)));
        }
        let id = next(&mut tables.seq.ownership);
        let record = OwnershipRecord {
            user_id: ownership.user_id,
            game_id: ownership.game_id,
            purchase_date: ownership.purchase_date,
        };
        let view = tables
            .ownership_view(id, &record)
            .ok_or_else(|| AppError::Internal("ownership references vanished".into()))?;
        tables.ownerships.insert(id, record);
        Ok(view)
    }

    async fn delete_ownership(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.write()?.ownerships.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let store = MemoryStore::new();
        let a = store.insert_publisher("A").await.unwrap();
        let b = store.insert_publisher("B").await.unwrap();
        assert_eq!((a.publisher_id, b.publisher_id), (1, 2));
        assert!(store.delete_publisher(b.publisher_id).await.unwrap());
        let c = store.insert_publisher("C").await.unwrap();
        assert_eq!(c.publisher_id, 3);
    }

    #[tokio::test]
    async fn deleting_publisher_detaches_games() {
        let store = MemoryStore::new();
        let p = store.insert_publisher("Acme").await.unwrap();
        let game = store
            .insert_game(&NewGame {
                game_name: "Foo".into(),
                publisher_id: Some(p.publisher_id),
                release_date: None,
            })
            .await
            .unwrap();
        assert!(store.delete_publisher(p.publisher_id).await.unwrap());
        let game = store.get_game(game.game_id).await.unwrap().unwrap();
        assert_eq!(game.publisher_id, None);
    }

    #[tokio::test]
    async fn rejects_dangling_references() {
        let store = MemoryStore::new();
        let err = store
            .insert_game(&NewGame {
                game_name: "Foo".into(),
                publisher_id: Some(42),
                release_date: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Reference(_)));

        let err = store
            .insert_ownership(&NewOwnership {
                user_id: 1,
                game_id: 1,
                purchase_date: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Reference(_)));
        assert!(store.list_ownerships().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn statistics_over_name_length() {
        let store = MemoryStore::new();
        assert_eq!(store.game_name_statistic(StatisticOp::Max).await.unwrap(), None);
        assert_eq!(store.game_name_statistic(StatisticOp::Count).await.unwrap(), Some(0.0));
        for name in ["ab", "abcd", "Ünï"] {
            store
                .insert_game(&NewGame {
                    game_name: name.into(),
                    publisher_id: None,
                    release_date: None,
                })
                .await
                .unwrap();
        }
        assert_eq!(store.game_name_statistic(StatisticOp::Min).await.unwrap(), Some(2.0));
        assert_eq!(store.game_name_statistic(StatisticOp::Max).await.unwrap(), Some(4.0));
        assert_eq!(store.game_name_statistic(StatisticOp::Avg).await.unwrap(), Some(3.0));
        assert_eq!(store.game_name_statistic(StatisticOp::Count).await.unwrap(), Some(3.0));
    }
}
