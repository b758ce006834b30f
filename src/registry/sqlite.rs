use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::registry::repository::{
    PlayerRecord, RegistryStats, RosterRepository, ShopRecord, ShopRegistry,
};
use crate::rules::home::HomeLocation;

const REGISTRY_SCHEMA_VERSION: i64 = 1;

const REGISTRY_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS registry_meta (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  schema_version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS players (
  player_id INTEGER PRIMARY KEY,
  name TEXT NOT NULL,
  age INTEGER NOT NULL,
  gold INTEGER NOT NULL,
  mental_rank TEXT NOT NULL,
  physical_rank TEXT NOT NULL,
  job TEXT,
  home TEXT NOT NULL,
  undifferentiated INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS shops (
  shop_id INTEGER PRIMARY KEY AUTOINCREMENT,
  district_id TEXT NOT NULL,
  name TEXT NOT NULL,
  owner_id INTEGER,
  is_open INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_players_home ON players (home);
CREATE INDEX IF NOT EXISTS idx_shops_district ON shops (district_id);
"#;

#[derive(Debug)]
pub enum RegistryDbError {
    Sqlite(rusqlite::Error),
    InvalidData(String),
}

impl std::fmt::Display for RegistryDbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryDbError::Sqlite(source) => write!(f, "registry db error: {}", source),
            RegistryDbError::InvalidData(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for RegistryDbError {}

impl From<rusqlite::Error> for RegistryDbError {
    fn from(source: rusqlite::Error) -> Self {
        RegistryDbError::Sqlite(source)
    }
}

fn home_to_str(home: HomeLocation) -> &'static str {
    match home {
        HomeLocation::Sanctuary => "SANCTUARY",
        HomeLocation::Slums => "SLUMS",
        HomeLocation::RichArea => "RICH_AREA",
    }
}

fn home_from_str(value: &str) -> Result<HomeLocation, RegistryDbError> {
    match value {
        "SANCTUARY" => Ok(HomeLocation::Sanctuary),
        "SLUMS" => Ok(HomeLocation::Slums),
        "RICH_AREA" => Ok(HomeLocation::RichArea),
        _ => Err(RegistryDbError::InvalidData(format!(
            "unknown home location {}",
            value
        ))),
    }
}

/// Roster and shop registry backed by a single SQLite database. Stands in for
/// the remote registry service in local play and tests.
pub struct SqliteRegistry {
    conn: Connection,
}

impl SqliteRegistry {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open(path)?;
        init_registry(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open_in_memory()?;
        init_registry(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn init_registry(conn: &Connection) -> Result<(), RegistryDbError> {
    conn.execute_batch(REGISTRY_SCHEMA)?;

    let version: Option<i64> = conn
        .query_row(
            "SELECT schema_version FROM registry_meta WHERE id = 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    match version {
        None => {
            conn.execute(
                "INSERT INTO registry_meta (id, schema_version) VALUES (1, ?1)",
                params![REGISTRY_SCHEMA_VERSION],
            )?;
            Ok(())
        }
        Some(found) if found == REGISTRY_SCHEMA_VERSION => Ok(()),
        Some(found) => Err(RegistryDbError::InvalidData(format!(
            "unsupported registry schema version {}",
            found
        ))),
    }
}

type RawPlayerRow = (
    i64,
    String,
    i64,
    i64,
    String,
    String,
    Option<String>,
    String,
    i64,
);

fn read_player(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPlayerRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn build_player(raw: RawPlayerRow) -> Result<PlayerRecord, RegistryDbError> {
    let (player_id, name, age, gold, mental_rank, physical_rank, job, home_raw, undifferentiated) =
        raw;
    Ok(PlayerRecord {
        player_id,
        name,
        age,
        gold,
        mental_rank,
        physical_rank,
        job,
        home: home_from_str(&home_raw)?,
        undifferentiated: undifferentiated != 0,
    })
}

const PLAYER_COLUMNS: &str =
    "player_id, name, age, gold, mental_rank, physical_rank, job, home, undifferentiated";

impl RosterRepository for SqliteRegistry {
    fn stats(&self) -> Result<RegistryStats, Box<dyn std::error::Error>> {
        let player_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))?;
        let shop_count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM shops WHERE is_open = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(RegistryStats {
            player_count,
            shop_count,
        })
    }

    fn player(&self, player_id: i64) -> Result<Option<PlayerRecord>, Box<dyn std::error::Error>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM players WHERE player_id = ?1", PLAYER_COLUMNS),
                params![player_id],
                read_player,
            )
            .optional()?;
        match row {
            Some(raw) => Ok(Some(build_player(raw)?)),
            None => Ok(None),
        }
    }

    fn players_with_home(
        &self,
        home: HomeLocation,
    ) -> Result<Vec<PlayerRecord>, Box<dyn std::error::Error>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM players WHERE home = ?1 ORDER BY player_id",
            PLAYER_COLUMNS
        ))?;
        let rows = stmt.query_map(params![home_to_str(home)], read_player)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(build_player(row?)?);
        }
        Ok(out)
    }

    fn resident_count(&self, home: HomeLocation) -> Result<i64, Box<dyn std::error::Error>> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM players WHERE home = ?1",
            params![home_to_str(home)],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn upsert_player(&self, record: &PlayerRecord) -> Result<(), Box<dyn std::error::Error>> {
        self.conn.execute(
            "INSERT INTO players (player_id, name, age, gold, mental_rank, physical_rank, job, home, undifferentiated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(player_id) DO UPDATE SET
               name = excluded.name,
               age = excluded.age,
               gold = excluded.gold,
               mental_rank = excluded.mental_rank,
               physical_rank = excluded.physical_rank,
               job = excluded.job,
               home = excluded.home,
               undifferentiated = excluded.undifferentiated",
            params![
                record.player_id,
                record.name,
                record.age,
                record.gold,
                record.mental_rank,
                record.physical_rank,
                record.job,
                home_to_str(record.home),
                record.undifferentiated as i64,
            ],
        )?;
        Ok(())
    }

    fn set_job(
        &self,
        player_id: i64,
        job: Option<&str>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let updated = self.conn.execute(
            "UPDATE players SET job = ?2 WHERE player_id = ?1",
            params![player_id, job],
        )?;
        if updated == 0 {
            return Err(Box::new(RegistryDbError::InvalidData(format!(
                "no player {}",
                player_id
            ))));
        }
        Ok(())
    }

    fn set_home(
        &self,
        player_id: i64,
        home: HomeLocation,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let updated = self.conn.execute(
            "UPDATE players SET home = ?2 WHERE player_id = ?1",
            params![player_id, home_to_str(home)],
        )?;
        if updated == 0 {
            return Err(Box::new(RegistryDbError::InvalidData(format!(
                "no player {}",
                player_id
            ))));
        }
        Ok(())
    }
}

impl ShopRegistry for SqliteRegistry {
    fn shops_in_district(
        &self,
        district_id: &str,
    ) -> Result<Vec<ShopRecord>, Box<dyn std::error::Error>> {
        let mut stmt = self.conn.prepare(
            "SELECT shop_id, district_id, name, owner_id, is_open
             FROM shops WHERE district_id = ?1 AND is_open = 1 ORDER BY shop_id",
        )?;
        let rows = stmt.query_map(params![district_id], |row| {
            Ok(ShopRecord {
                shop_id: row.get(0)?,
                district_id: row.get(1)?,
                name: row.get(2)?,
                owner_id: row.get(3)?,
                is_open: row.get::<_, i64>(4)? != 0,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn shop_count(&self, district_id: &str) -> Result<i64, Box<dyn std::error::Error>> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM shops WHERE district_id = ?1 AND is_open = 1",
            params![district_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn register_shop(
        &self,
        district_id: &str,
        name: &str,
        owner_id: Option<i64>,
    ) -> Result<i64, Box<dyn std::error::Error>> {
        self.conn.execute(
            "INSERT INTO shops (district_id, name, owner_id, is_open) VALUES (?1, ?2, ?3, 1)",
            params![district_id, name, owner_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn close_shop(&self, shop_id: i64) -> Result<(), Box<dyn std::error::Error>> {
        let updated = self.conn.execute(
            "UPDATE shops SET is_open = 0 WHERE shop_id = ?1",
            params![shop_id],
        )?;
        if updated == 0 {
            return Err(Box::new(RegistryDbError::InvalidData(format!(
                "no shop {}",
                shop_id
            ))));
        }
        Ok(())
    }
}
