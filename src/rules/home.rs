use serde::{Deserialize, Serialize};

use crate::rules::age::is_minor;

/// Gold at or above this value places an adult in the rich quarter.
pub const RICH_GOLD_THRESHOLD: i64 = 9999;

/// Where a character sleeps. The district screens use their own compass
/// labels for the two quarters, accepted here as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HomeLocation {
    Sanctuary,
    #[serde(alias = "WEST_DISTRICT")]
    Slums,
    #[serde(alias = "EAST_DISTRICT")]
    RichArea,
}

/// Tunable inputs to the starting-home rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomePolicy {
    pub rich_gold_threshold: i64,
}

impl Default for HomePolicy {
    fn default() -> Self {
        Self {
            rich_gold_threshold: RICH_GOLD_THRESHOLD,
        }
    }
}

/// The consolidated starting-home rule. Minors and undifferentiated
/// characters always land in the sanctuary; gold only matters for adults.
/// Absent gold takes the slums branch.
pub fn initial_home(
    age: Option<i64>,
    gold: Option<i64>,
    undifferentiated: bool,
    policy: &HomePolicy,
) -> HomeLocation {
    if undifferentiated || is_minor(age) {
        return HomeLocation::Sanctuary;
    }
    match gold {
        Some(amount) if amount >= policy.rich_gold_threshold => HomeLocation::RichArea,
        _ => HomeLocation::Slums,
    }
}

/// Age-and-gold-only variant used at character creation.
pub fn resolve_initial_home(age: Option<i64>, gold: Option<i64>, policy: &HomePolicy) -> HomeLocation {
    initial_home(age, gold, false, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_overrides_gold() {
        let policy = HomePolicy::default();
        assert_eq!(
            resolve_initial_home(Some(15), Some(999_999), &policy),
            HomeLocation::Sanctuary
        );
    }

    #[test]
    fn rich_threshold_is_inclusive() {
        let policy = HomePolicy::default();
        assert_eq!(
            resolve_initial_home(Some(20), Some(9_999), &policy),
            HomeLocation::RichArea
        );
        assert_eq!(
            resolve_initial_home(Some(20), Some(10_000), &policy),
            HomeLocation::RichArea
        );
        assert_eq!(
            resolve_initial_home(Some(20), Some(500), &policy),
            HomeLocation::Slums
        );
    }

    #[test]
    fn undifferentiated_adults_stay_in_sanctuary() {
        let policy = HomePolicy::default();
        assert_eq!(
            initial_home(Some(20), Some(50_000), true, &policy),
            HomeLocation::Sanctuary
        );
    }

    #[test]
    fn missing_values_fail_safe() {
        let policy = HomePolicy::default();
        assert_eq!(
            resolve_initial_home(None, Some(50_000), &policy),
            HomeLocation::Sanctuary
        );
        assert_eq!(
            resolve_initial_home(Some(20), None, &policy),
            HomeLocation::Slums
        );
    }

    #[test]
    fn district_aliases_deserialize() {
        let west: HomeLocation = serde_json::from_str("\"WEST_DISTRICT\"").unwrap();
        let east: HomeLocation = serde_json::from_str("\"EAST_DISTRICT\"").unwrap();
        assert_eq!(west, HomeLocation::Slums);
        assert_eq!(east, HomeLocation::RichArea);
    }
}
