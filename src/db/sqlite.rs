//! SQLite row store for the transfer-portal player table

use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::models::TransferPlayer;

use super::error::{StoreError, StoreResult};
use super::{queries, schema};

/// SQLite database wrapper
pub struct RowStore {
    conn: Mutex<Connection>,
}

impl RowStore {
    /// Open or create database at the specified path
    pub fn open(path: &str) -> StoreResult<Self> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            // Create parent directory if needed
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let conn = Connection::open(path)?;
            conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
            conn
        };

        conn.execute_batch(schema::CREATE_TABLES)?;
        conn.execute(queries::INSERT_SCHEMA_VERSION, params![schema::SCHEMA_VERSION])?;

        tracing::info!("Opened row store at {}", path);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Entire `home_page` table in storage order
    pub fn fetch_home_page(&self) -> StoreResult<Vec<TransferPlayer>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(queries::SELECT_HOME_PAGE)?;
        let rows = stmt.query_map([], Self::row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    pub fn insert_player(&self, player: &TransferPlayer) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            queries::INSERT_PLAYER,
            params![
                player.season_year,
                player.player_name,
                player.player_id,
                player.player_year,
                player.team_name,
                player.position,
                player.height_inches,
            ],
        )?;
        Ok(())
    }

    /// Load a JSON array of players in one transaction
    pub fn import_players(&self, players: &[TransferPlayer]) -> StoreResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(queries::INSERT_PLAYER)?;
            for p in players {
                stmt.execute(params![
                    p.season_year,
                    p.player_name,
                    p.player_id,
                    p.player_year,
                    p.team_name,
                    p.position,
                    p.height_inches,
                ])?;
            }
        }
        tx.commit()?;
        Ok(players.len())
    }

    pub fn import_json(&self, path: &Path) -> StoreResult<usize> {
        let content = std::fs::read_to_string(path)?;
        let players: Vec<TransferPlayer> = serde_json::from_str(&content)?;
        let count = self.import_players(&players)?;
        tracing::info!("Imported {} players from {}", count, path.display());
        Ok(count)
    }

    pub fn player_count(&self) -> StoreResult<i64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(queries::COUNT_PLAYERS, [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_to_player(row: &Row) -> rusqlite::Result<TransferPlayer> {
        Ok(TransferPlayer {
            season_year: row.get(0)?,
            player_name: row.get(1)?,
            player_id: row.get(2)?,
            player_year: row.get::<_, Option<i64>>(3)?.unwrap_or_default(),
            team_name: row.get(4)?,
            position: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            height_inches: row.get(6)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn player(id: i64, name: &str, team: &str) -> TransferPlayer {
        TransferPlayer {
            season_year: 2024,
            player_name: name.to_string(),
            player_id: id,
            player_year: 2,
            team_name: team.to_string(),
            position: "F".to_string(),
            height_inches: Some(80),
        }
    }

    #[test]
    fn insert_and_fetch_round_trip() {
        let store = RowStore::open(":memory:").expect("open");
        store.insert_player(&player(1, "Caleb Love", "Arizona")).expect("insert");
        store.insert_player(&player(2, "RJ Luis", "St. John's")).expect("insert");

        let players = store.fetch_home_page().expect("fetch");
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].player_name, "Caleb Love");
        assert_eq!(players[1].class_name(), "Sophomore");
    }

    #[test]
    fn reinsert_replaces_same_player_season() {
        let store = RowStore::open(":memory:").expect("open");
        store.insert_player(&player(7, "Old Name", "Duke")).expect("insert");
        store.insert_player(&player(7, "New Name", "Duke")).expect("insert");
        assert_eq!(store.player_count().expect("count"), 1);
    }

    #[test]
    fn null_height_is_missing() {
        let store = RowStore::open(":memory:").expect("open");
        let mut p = player(3, "Walk On", "Yale");
        p.height_inches = None;
        store.insert_player(&p).expect("insert");
        let players = store.fetch_home_page().expect("fetch");
        assert_eq!(players[0].height_inches, None);
    }

    #[test]
    fn imports_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("players.json");
        let mut file = std::fs::File::create(&path).expect("create");
        let json = serde_json::to_string(&vec![player(1, "A", "X"), player(2, "B", "Y")]).expect("json");
        file.write_all(json.as_bytes()).expect("write");

        let store = RowStore::open(dir.path().join("nested/db.sqlite").to_str().expect("utf8")).expect("open");
        assert_eq!(store.import_json(&path).expect("import"), 2);
        assert_eq!(store.fetch_home_page().expect("fetch").len(), 2);
    }

    #[test]
    fn malformed_import_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").expect("write");
        let store = RowStore::open(":memory:").expect("open");
        assert!(matches!(store.import_json(&path), Err(StoreError::Import(_))));
    }
}
