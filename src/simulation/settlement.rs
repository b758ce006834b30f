use std::collections::HashMap;

use bevy_ecs::prelude::*;

use crate::components::player::CharacterSheet;
use crate::data::districts::{
    builtin_district_catalog, load_default_district_catalog, DistrictCatalog,
    DistrictCatalogError, DistrictDefinition,
};
use crate::registry::repository::{RosterRepository, ShopRegistry};
use crate::rules::home::HomePolicy;
use crate::rules::prosperity::SettlementStats;

/// District configuration shared by every system: the role tables plus the
/// home-assignment policy.
#[derive(Resource, Debug, Clone)]
pub struct DistrictDirectory {
    pub catalog: DistrictCatalog,
    pub home_policy: HomePolicy,
}

impl DistrictDirectory {
    pub fn load_default() -> Result<Self, DistrictCatalogError> {
        Ok(Self {
            catalog: load_default_district_catalog()?,
            home_policy: HomePolicy::default(),
        })
    }
}

impl Default for DistrictDirectory {
    fn default() -> Self {
        Self {
            catalog: builtin_district_catalog(),
            home_policy: HomePolicy::default(),
        }
    }
}

/// Live per-district counts. Resident counts are recomputed from the player
/// entities each tick; shop counts are fed in from the shop registry.
#[derive(Resource, Debug, Clone, Default)]
pub struct SettlementLedger {
    counts: HashMap<String, SettlementStats>,
}

impl SettlementLedger {
    pub fn stats(&self, district_id: &str) -> SettlementStats {
        self.counts.get(district_id).copied().unwrap_or_default()
    }

    pub fn set_residents(&mut self, district_id: &str, residents: i64) {
        self.counts
            .entry(district_id.to_string())
            .or_default()
            .residents = residents;
    }

    pub fn set_shops(&mut self, district_id: &str, shops: i64) {
        self.counts.entry(district_id.to_string()).or_default().shops = shops;
    }
}

/// System: recounts residents per district from the live player entities.
/// Shop counts stay whatever the registry sync last reported.
pub fn resident_count_system(
    directory: Res<DistrictDirectory>,
    players: Query<&CharacterSheet>,
    mut ledger: ResMut<SettlementLedger>,
) {
    for district in &directory.catalog.districts {
        let Some(home) = district.home else {
            continue;
        };
        let residents = players.iter().filter(|sheet| sheet.home == home).count() as i64;
        ledger.set_residents(&district.id, residents);
    }
}

/// Assemble live counts for one district straight from the roster and shop
/// registry. Prosperity inputs are always derived, never read back from a
/// stored score.
pub fn stats_from_registry(
    roster: &dyn RosterRepository,
    shops: &dyn ShopRegistry,
    district: &DistrictDefinition,
) -> Result<SettlementStats, Box<dyn std::error::Error>> {
    let residents = match district.home {
        Some(home) => roster.resident_count(home)?,
        None => 0,
    };
    let shops = shops.shop_count(&district.id)?;
    Ok(SettlementStats { residents, shops })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::repository::PlayerRecord;
    use crate::registry::sqlite::SqliteRegistry;
    use crate::rules::home::HomeLocation;

    #[test]
    fn registry_counts_feed_settlement_stats() {
        let registry = SqliteRegistry::open_in_memory().unwrap();
        for player_id in 1..=2 {
            registry
                .upsert_player(&PlayerRecord {
                    player_id,
                    name: format!("west-{}", player_id),
                    age: 20,
                    gold: 500,
                    mental_rank: "C".to_string(),
                    physical_rank: "C".to_string(),
                    job: None,
                    home: HomeLocation::Slums,
                    undifferentiated: false,
                })
                .unwrap();
        }
        registry
            .register_shop("west_district", "Rust & Bolt", None)
            .unwrap();

        let catalog = builtin_district_catalog();
        let west = catalog.district("west_district").unwrap();
        let stats = stats_from_registry(&registry, &registry, west).unwrap();
        assert_eq!(
            stats,
            SettlementStats {
                residents: 2,
                shops: 1
            }
        );

        // Districts with no home tag never count residents.
        let tower = catalog.district("london_tower").unwrap();
        let tower_stats = stats_from_registry(&registry, &registry, tower).unwrap();
        assert_eq!(tower_stats.residents, 0);
    }

    #[test]
    fn ledger_defaults_to_zero_counts() {
        let ledger = SettlementLedger::default();
        assert_eq!(ledger.stats("west_district"), SettlementStats::default());
    }

    #[test]
    fn ledger_updates_keep_other_axis() {
        let mut ledger = SettlementLedger::default();
        ledger.set_residents("west_district", 10);
        ledger.set_shops("west_district", 2);
        let stats = ledger.stats("west_district");
        assert_eq!(stats.residents, 10);
        assert_eq!(stats.shops, 2);
    }
}
