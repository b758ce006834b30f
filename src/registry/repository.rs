use crate::rules::home::HomeLocation;

/// Roster row as stored by the registry service. Rank labels stay raw TEXT;
/// the rule engine scores them totally on the way in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub player_id: i64,
    pub name: String,
    pub age: i64,
    pub gold: i64,
    pub mental_rank: String,
    pub physical_rank: String,
    pub job: Option<String>,
    pub home: HomeLocation,
    pub undifferentiated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopRecord {
    pub shop_id: i64,
    pub district_id: String,
    pub name: String,
    pub owner_id: Option<i64>,
    pub is_open: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RegistryStats {
    pub player_count: i64,
    pub shop_count: i64,
}

pub trait RosterRepository {
    fn stats(&self) -> Result<RegistryStats, Box<dyn std::error::Error>>;
    fn player(&self, player_id: i64) -> Result<Option<PlayerRecord>, Box<dyn std::error::Error>>;
    fn players_with_home(
        &self,
        home: HomeLocation,
    ) -> Result<Vec<PlayerRecord>, Box<dyn std::error::Error>>;
    fn resident_count(&self, home: HomeLocation) -> Result<i64, Box<dyn std::error::Error>>;
    fn upsert_player(&self, record: &PlayerRecord) -> Result<(), Box<dyn std::error::Error>>;
    fn set_job(
        &self,
        player_id: i64,
        job: Option<&str>,
    ) -> Result<(), Box<dyn std::error::Error>>;
    fn set_home(
        &self,
        player_id: i64,
        home: HomeLocation,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

pub trait ShopRegistry {
    fn shops_in_district(
        &self,
        district_id: &str,
    ) -> Result<Vec<ShopRecord>, Box<dyn std::error::Error>>;
    fn shop_count(&self, district_id: &str) -> Result<i64, Box<dyn std::error::Error>>;
    fn register_shop(
        &self,
        district_id: &str,
        name: &str,
        owner_id: Option<i64>,
    ) -> Result<i64, Box<dyn std::error::Error>>;
    fn close_shop(&self, shop_id: i64) -> Result<(), Box<dyn std::error::Error>>;
}
