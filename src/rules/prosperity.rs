use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Per-district weighting of residents and shops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProsperityWeights {
    pub resident: i64,
    pub shop: i64,
}

/// Live head counts for one district. Always assembled on demand from the
/// roster and shop registry, never stored as a derived value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementStats {
    pub residents: i64,
    pub shops: i64,
}

pub fn prosperity(stats: &SettlementStats, weights: &ProsperityWeights) -> i64 {
    stats.residents * weights.resident + stats.shops * weights.shop
}

pub fn compare_prosperity(a: i64, b: i64) -> Ordering {
    a.cmp(&b)
}

/// A cross-district economic action lands only when the actor's score
/// strictly exceeds the rival's.
pub fn economic_action_succeeds(actor: i64, rival: i64) -> bool {
    compare_prosperity(actor, rival) == Ordering::Greater
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_sum_is_exact() {
        let weights = ProsperityWeights {
            resident: 100,
            shop: 300,
        };
        let stats = SettlementStats {
            residents: 10,
            shops: 2,
        };
        assert_eq!(prosperity(&stats, &weights), 1_600);
    }

    #[test]
    fn empty_settlement_scores_zero() {
        let weights = ProsperityWeights {
            resident: 1_000,
            shop: 3_000,
        };
        assert_eq!(prosperity(&SettlementStats::default(), &weights), 0);
    }

    #[test]
    fn comparison_matches_integer_order() {
        assert_eq!(compare_prosperity(5, 9), Ordering::Less);
        assert_eq!(compare_prosperity(9, 5), Ordering::Greater);
        assert_eq!(compare_prosperity(7, 7), Ordering::Equal);
    }

    #[test]
    fn comparison_is_antisymmetric() {
        for (a, b) in [(0, 0), (3, 11), (11, 3), (-2, 2)] {
            assert_eq!(compare_prosperity(a, b), compare_prosperity(b, a).reverse());
        }
    }

    #[test]
    fn ties_do_not_succeed() {
        assert!(economic_action_succeeds(1_601, 1_600));
        assert!(!economic_action_succeeds(1_600, 1_600));
        assert!(!economic_action_succeeds(1_599, 1_600));
    }
}
