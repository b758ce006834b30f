pub mod settlement;

pub use settlement::{
    resident_count_system, stats_from_registry, DistrictDirectory, SettlementLedger,
};
