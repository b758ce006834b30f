use bevy_ecs::prelude::*;

use crate::core::world::{ActionIntent, ActionQueue};
use crate::rules::prosperity::{economic_action_succeeds, prosperity};
use crate::simulation::settlement::{DistrictDirectory, SettlementLedger};

#[derive(Resource, Debug, Default)]
pub struct EconomyEventLog(pub Vec<EconomyEvent>);

#[derive(Debug, Clone)]
pub struct EconomyEvent {
    pub district_id: String,
    pub rival_id: String,
    pub outcome: EconomicOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomicOutcome {
    Succeeded {
        prosperity: i64,
        rival_prosperity: i64,
    },
    Repelled {
        prosperity: i64,
        rival_prosperity: i64,
    },
    NotEligible,
}

/// System: resolves cross-district economic actions from live counts.
pub fn economy_system(
    intents: Res<ActionQueue>,
    directory: Res<DistrictDirectory>,
    ledger: Res<SettlementLedger>,
    mut events: ResMut<EconomyEventLog>,
) {
    for intent in intents.0.iter() {
        if let ActionIntent::EconomicAction {
            district_id,
            rival_id,
        } = intent
        {
            let outcome = resolve_economic_action(&directory, &ledger, district_id, rival_id);
            events.0.push(EconomyEvent {
                district_id: district_id.clone(),
                rival_id: rival_id.clone(),
                outcome,
            });
        }
    }
}

/// Both districts must be configured for the economic game; the action lands
/// only on a strictly higher prosperity score.
pub fn resolve_economic_action(
    directory: &DistrictDirectory,
    ledger: &SettlementLedger,
    district_id: &str,
    rival_id: &str,
) -> EconomicOutcome {
    let district = directory.catalog.district(district_id);
    let rival = directory.catalog.district(rival_id);
    let (Some(district), Some(rival)) = (district, rival) else {
        return EconomicOutcome::NotEligible;
    };
    let (Some(weights), Some(rival_weights)) = (district.economy, rival.economy) else {
        return EconomicOutcome::NotEligible;
    };

    let score = prosperity(&ledger.stats(&district.id), &weights);
    let rival_score = prosperity(&ledger.stats(&rival.id), &rival_weights);
    if economic_action_succeeds(score, rival_score) {
        EconomicOutcome::Succeeded {
            prosperity: score,
            rival_prosperity: rival_score,
        }
    } else {
        EconomicOutcome::Repelled {
            prosperity: score,
            rival_prosperity: rival_score,
        }
    }
}
