use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::rules::home::HomeLocation;
use crate::rules::qualification::Applicant;
use crate::rules::rank::RankTier;

/// The basic name of an entity.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Name(pub String);

/// Stable identifier for addressing entities externally.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Marker component for player characters.
#[derive(Component, Debug)]
pub struct Player;

/// The slice of a character the rule engine reads: age, gold, the two
/// aptitude ranks, and the current job and home assignment.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub age: i64,
    pub gold: i64,
    pub mental_rank: RankTier,
    pub physical_rank: RankTier,
    #[serde(default)]
    pub job: Option<String>,
    pub home: HomeLocation,
    #[serde(default)]
    pub undifferentiated: bool,
}

impl CharacterSheet {
    pub fn applicant(&self) -> Applicant<'_> {
        Applicant {
            age: Some(self.age),
            mental_rank: Some(self.mental_rank.label()),
            physical_rank: Some(self.physical_rank.label()),
        }
    }
}
