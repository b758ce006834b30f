use bevy_ecs::prelude::*;
use serde::Deserialize;

use crate::components::player::{CharacterSheet, EntityId, Name, Player};
use crate::core::ecs::{create_schedule, create_world};
use crate::registry::repository::PlayerRecord;
use crate::rules::age::resolve_initial_age;
use crate::rules::home::{initial_home, HomeLocation};
use crate::rules::rank::RankTier;
use crate::simulation::settlement::{DistrictDirectory, SettlementLedger};
use crate::systems::assignment::{AssignmentEvent, AssignmentEventLog};
use crate::systems::economy::{EconomyEvent, EconomyEventLog};

/// Intent-driven commands fed into the ECS each tick.
#[derive(Debug, Clone)]
pub enum ActionIntent {
    ApplyForRole {
        entity_id: u32,
        district_id: String,
        role_id: String,
    },
    Relocate {
        entity_id: u32,
    },
    EconomicAction {
        district_id: String,
        rival_id: String,
    },
    Wait,
}

/// Resource storing the intents for the next tick.
#[derive(Resource, Default, Debug)]
pub struct ActionQueue(pub Vec<ActionIntent>);

/// Hands out stable external ids for spawned characters.
#[derive(Resource, Default, Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn allocate(&mut self) -> u32 {
        self.next += 1;
        self.next
    }
}

/// Raw creation payload as it arrives from the account service. Missing or
/// unparseable fields take the restrictive defaults downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterSeed {
    pub name: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gold: Option<i64>,
    #[serde(default)]
    pub mental_rank: Option<String>,
    #[serde(default)]
    pub physical_rank: Option<String>,
    #[serde(default)]
    pub undifferentiated: bool,
}

/// Data snapshot returned to the caller after each tick. Event logs are
/// drained, so each event is delivered exactly once.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub players: Vec<PlayerSummary>,
    pub assignments: Vec<AssignmentEvent>,
    pub economy: Vec<EconomyEvent>,
}

#[derive(Debug, Clone)]
pub struct PlayerSummary {
    pub id: u32,
    pub name: String,
    pub age: i64,
    pub gold: i64,
    pub mental_rank: RankTier,
    pub physical_rank: RankTier,
    pub job: Option<String>,
    pub home: HomeLocation,
    pub undifferentiated: bool,
}

/// Wrapper around the ECS world and schedule.
pub struct Game {
    world: World,
    schedule: Schedule,
}

impl Game {
    pub fn new() -> Self {
        Self {
            world: create_world(),
            schedule: create_schedule(),
        }
    }

    /// Create a character from a raw seed, resolving starting age and home
    /// through the engine rules. Returns the stable external id.
    pub fn spawn_character(&mut self, seed: &CharacterSeed) -> u32 {
        let policy = self.world.resource::<DistrictDirectory>().home_policy;
        let age = resolve_initial_age(seed.age, seed.undifferentiated);
        let home = initial_home(Some(age), seed.gold, seed.undifferentiated, &policy);
        let sheet = CharacterSheet {
            age,
            gold: seed.gold.unwrap_or(0),
            mental_rank: coerce_rank(seed.mental_rank.as_deref()),
            physical_rank: coerce_rank(seed.physical_rank.as_deref()),
            job: None,
            home,
            undifferentiated: seed.undifferentiated,
        };
        self.spawn(seed.name.clone(), sheet)
    }

    /// Rehydrate a character from a roster record, keeping its stored home
    /// and job. Unrecognized rank labels coerce to the weakest tier.
    pub fn spawn_from_record(&mut self, record: &PlayerRecord) -> u32 {
        let sheet = CharacterSheet {
            age: record.age,
            gold: record.gold,
            mental_rank: coerce_rank(Some(&record.mental_rank)),
            physical_rank: coerce_rank(Some(&record.physical_rank)),
            job: record.job.clone(),
            home: record.home,
            undifferentiated: record.undifferentiated,
        };
        self.spawn(record.name.clone(), sheet)
    }

    fn spawn(&mut self, name: String, sheet: CharacterSheet) -> u32 {
        let id = self.world.resource_mut::<IdAllocator>().allocate();
        self.world
            .spawn((Name(name), EntityId(id), Player, sheet));
        id
    }

    /// Feed the shop count reported by the shop registry for one district.
    pub fn set_shop_count(&mut self, district_id: &str, shops: i64) {
        self.world
            .resource_mut::<SettlementLedger>()
            .set_shops(district_id, shops);
    }

    pub fn district_directory(&self) -> &DistrictDirectory {
        self.world.resource::<DistrictDirectory>()
    }

    /// Run a simulation tick with the provided intents and return a snapshot.
    pub fn tick(&mut self, intents: Vec<ActionIntent>) -> Snapshot {
        {
            let mut queue = self.world.resource_mut::<ActionQueue>();
            queue.0 = intents;
        }

        self.schedule.run(&mut self.world);
        self.snapshot()
    }

    fn snapshot(&mut self) -> Snapshot {
        let assignments = std::mem::take(&mut self.world.resource_mut::<AssignmentEventLog>().0);
        let economy = std::mem::take(&mut self.world.resource_mut::<EconomyEventLog>().0);

        let mut players = Vec::new();
        let mut query = self.world.query::<(&EntityId, &Name, &CharacterSheet)>();
        for (id, name, sheet) in query.iter(&self.world) {
            players.push(PlayerSummary {
                id: id.0,
                name: name.0.clone(),
                age: sheet.age,
                gold: sheet.gold,
                mental_rank: sheet.mental_rank,
                physical_rank: sheet.physical_rank,
                job: sheet.job.clone(),
                home: sheet.home,
                undifferentiated: sheet.undifferentiated,
            });
        }
        players.sort_by_key(|player| player.id);

        Snapshot {
            players,
            assignments,
            economy,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn coerce_rank(label: Option<&str>) -> RankTier {
    label
        .and_then(RankTier::from_label)
        .unwrap_or(RankTier::Unranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::qualification::QualifyError;
    use crate::systems::assignment::AssignmentEventKind;
    use crate::systems::economy::EconomicOutcome;

    fn adult_seed(name: &str, gold: i64, mental: &str, physical: &str) -> CharacterSeed {
        CharacterSeed {
            name: name.to_string(),
            age: Some(20),
            gold: Some(gold),
            mental_rank: Some(mental.to_string()),
            physical_rank: Some(physical.to_string()),
            undifferentiated: false,
        }
    }

    fn apply(game: &mut Game, entity_id: u32, district_id: &str, role_id: &str) -> Snapshot {
        game.tick(vec![ActionIntent::ApplyForRole {
            entity_id,
            district_id: district_id.to_string(),
            role_id: role_id.to_string(),
        }])
    }

    #[test]
    fn minors_start_in_the_sanctuary_whatever_their_gold() {
        let mut game = Game::new();
        let seed = CharacterSeed {
            name: "Edie".to_string(),
            age: Some(10),
            gold: Some(1_000_000),
            ..CharacterSeed::default()
        };
        let id = game.spawn_character(&seed);
        let snapshot = game.tick(Vec::new());
        let player = &snapshot.players[(id - 1) as usize];
        assert_eq!(player.home, HomeLocation::Sanctuary);
        assert_eq!(player.age, 10);
    }

    #[test]
    fn undifferentiated_seeds_are_capped_below_adulthood() {
        let mut game = Game::new();
        let seed = CharacterSeed {
            name: "Wisp".to_string(),
            age: Some(30),
            gold: Some(50_000),
            undifferentiated: true,
            ..CharacterSeed::default()
        };
        game.spawn_character(&seed);
        let snapshot = game.tick(Vec::new());
        assert_eq!(snapshot.players[0].age, 15);
        assert_eq!(snapshot.players[0].home, HomeLocation::Sanctuary);
    }

    #[test]
    fn adults_split_on_the_gold_threshold() {
        let mut game = Game::new();
        game.spawn_character(&adult_seed("Pauper", 500, "无", "无"));
        game.spawn_character(&adult_seed("Magnate", 9_999, "无", "无"));
        let snapshot = game.tick(Vec::new());
        assert_eq!(snapshot.players[0].home, HomeLocation::Slums);
        assert_eq!(snapshot.players[1].home, HomeLocation::RichArea);
    }

    #[test]
    fn qualified_application_grants_the_role() {
        let mut game = Game::new();
        let id = game.spawn_character(&adult_seed("Mori", 500, "SS", "S+"));
        let snapshot = apply(&mut game, id, "spirit_bureau", "bureau_director");

        assert_eq!(
            snapshot.players[0].job.as_deref(),
            Some("bureau_director")
        );
        assert!(matches!(
            snapshot.assignments[0].kind,
            AssignmentEventKind::RoleGranted { .. }
        ));
    }

    #[test]
    fn underqualified_application_reports_the_failing_axis() {
        let mut game = Game::new();
        let id = game.spawn_character(&adult_seed("Crane", 500, "S+", "S"));
        let snapshot = apply(&mut game, id, "spirit_bureau", "bureau_director");

        assert_eq!(snapshot.players[0].job, None);
        assert!(matches!(
            snapshot.assignments[0].kind,
            AssignmentEventKind::RoleRefused {
                reason: QualifyError::PhysicalBelowMinimum,
                ..
            }
        ));
    }

    #[test]
    fn unknown_roles_are_reported_not_dropped() {
        let mut game = Game::new();
        let id = game.spawn_character(&adult_seed("Lost", 500, "A", "A"));
        let snapshot = apply(&mut game, id, "spirit_bureau", "east_mayor");
        assert!(matches!(
            snapshot.assignments[0].kind,
            AssignmentEventKind::UnknownRole { .. }
        ));
    }

    #[test]
    fn relocation_rederives_a_stale_home() {
        let mut game = Game::new();
        let record = PlayerRecord {
            player_id: 9,
            name: "Drift".to_string(),
            age: 22,
            gold: 120,
            mental_rank: "C".to_string(),
            physical_rank: "C".to_string(),
            job: None,
            home: HomeLocation::RichArea,
            undifferentiated: false,
        };
        let id = game.spawn_from_record(&record);
        let snapshot = game.tick(vec![ActionIntent::Relocate { entity_id: id }]);

        assert_eq!(snapshot.players[0].home, HomeLocation::Slums);
        assert!(matches!(
            snapshot.assignments[0].kind,
            AssignmentEventKind::HomeChanged {
                home: HomeLocation::Slums
            }
        ));
    }

    #[test]
    fn economic_action_needs_strictly_higher_prosperity() {
        let mut game = Game::new();
        // Ten slums residents and two shops: 10*100 + 2*300 = 1600.
        for n in 0..10 {
            game.spawn_character(&adult_seed(&format!("west-{}", n), 500, "无", "无"));
        }
        game.set_shop_count("west_district", 2);
        // One rich resident, no shops: 1*1000 = 1000.
        game.spawn_character(&adult_seed("east-0", 20_000, "无", "无"));

        let snapshot = game.tick(vec![
            ActionIntent::EconomicAction {
                district_id: "west_district".to_string(),
                rival_id: "east_district".to_string(),
            },
            ActionIntent::EconomicAction {
                district_id: "east_district".to_string(),
                rival_id: "west_district".to_string(),
            },
            ActionIntent::EconomicAction {
                district_id: "london_tower".to_string(),
                rival_id: "west_district".to_string(),
            },
        ]);

        assert_eq!(
            snapshot.economy[0].outcome,
            EconomicOutcome::Succeeded {
                prosperity: 1_600,
                rival_prosperity: 1_000
            }
        );
        assert_eq!(
            snapshot.economy[1].outcome,
            EconomicOutcome::Repelled {
                prosperity: 1_000,
                rival_prosperity: 1_600
            }
        );
        assert_eq!(snapshot.economy[2].outcome, EconomicOutcome::NotEligible);
    }
}
