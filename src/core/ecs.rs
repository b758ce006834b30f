use bevy_ecs::prelude::*;
use bevy_ecs::schedule::SystemSet;

use crate::core::world::{ActionQueue, IdAllocator};
use crate::simulation::settlement::{
    resident_count_system, DistrictDirectory, SettlementLedger,
};
use crate::systems::assignment::{assignment_system, AssignmentEventLog};
use crate::systems::economy::{economy_system, EconomyEventLog};

/// Canonical tick ordering for the simulation.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum TickSet {
    Intake,
    Simulation,
    Cleanup,
}

/// Build the ECS world with baseline resources.
pub fn create_world() -> World {
    let mut world = World::new();
    world.insert_resource(ActionQueue::default());
    world.insert_resource(IdAllocator::default());
    world.insert_resource(SettlementLedger::default());
    world.insert_resource(AssignmentEventLog::default());
    world.insert_resource(EconomyEventLog::default());
    world.insert_resource(load_district_directory());
    world
}

/// Build the system schedule in the canonical order.
pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.configure_sets((TickSet::Intake, TickSet::Simulation, TickSet::Cleanup).chain());

    schedule.add_systems((
        resident_count_system.in_set(TickSet::Intake),
        assignment_system.in_set(TickSet::Simulation),
        economy_system.in_set(TickSet::Simulation),
    ));

    schedule
}

fn load_district_directory() -> DistrictDirectory {
    match DistrictDirectory::load_default() {
        Ok(directory) => directory,
        Err(err) => {
            eprintln!("Failed to load district catalog: {}", err);
            DistrictDirectory::default()
        }
    }
}
