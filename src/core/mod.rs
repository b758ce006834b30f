pub mod ecs;
pub mod world;

pub use world::{ActionIntent, ActionQueue, CharacterSeed, Game, PlayerSummary, Snapshot};
