pub mod repository;
pub mod sqlite;

pub use repository::{
    PlayerRecord, RegistryStats, RosterRepository, ShopRecord, ShopRegistry,
};
pub use sqlite::{RegistryDbError, SqliteRegistry};
