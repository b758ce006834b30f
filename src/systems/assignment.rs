use bevy_ecs::prelude::*;

use crate::components::player::{CharacterSheet, EntityId};
use crate::core::world::{ActionIntent, ActionQueue};
use crate::rules::home::{initial_home, HomeLocation};
use crate::rules::qualification::{check_qualification, QualifyError};
use crate::simulation::settlement::DistrictDirectory;

#[derive(Resource, Debug, Default)]
pub struct AssignmentEventLog(pub Vec<AssignmentEvent>);

#[derive(Debug, Clone)]
pub struct AssignmentEvent {
    pub entity_id: u32,
    pub kind: AssignmentEventKind,
}

#[derive(Debug, Clone)]
pub enum AssignmentEventKind {
    RoleGranted {
        district_id: String,
        role_id: String,
    },
    RoleRefused {
        district_id: String,
        role_id: String,
        reason: QualifyError,
    },
    UnknownRole {
        district_id: String,
        role_id: String,
    },
    HomeChanged {
        home: HomeLocation,
    },
}

/// System: resolves role applications against the district role tables and
/// re-derives home assignments on request.
pub fn assignment_system(
    intents: Res<ActionQueue>,
    directory: Res<DistrictDirectory>,
    mut players: Query<(&EntityId, &mut CharacterSheet)>,
    mut events: ResMut<AssignmentEventLog>,
) {
    for intent in intents.0.iter() {
        match intent {
            ActionIntent::ApplyForRole {
                entity_id,
                district_id,
                role_id,
            } => {
                for (id, mut sheet) in players.iter_mut() {
                    if id.0 != *entity_id {
                        continue;
                    }
                    let kind = match directory.catalog.requirement(district_id, role_id) {
                        None => AssignmentEventKind::UnknownRole {
                            district_id: district_id.clone(),
                            role_id: role_id.clone(),
                        },
                        Some(requirement) => {
                            match check_qualification(requirement, &sheet.applicant()) {
                                Ok(()) => {
                                    sheet.job = Some(requirement.id.clone());
                                    AssignmentEventKind::RoleGranted {
                                        district_id: district_id.clone(),
                                        role_id: role_id.clone(),
                                    }
                                }
                                Err(reason) => AssignmentEventKind::RoleRefused {
                                    district_id: district_id.clone(),
                                    role_id: role_id.clone(),
                                    reason,
                                },
                            }
                        }
                    };
                    events.0.push(AssignmentEvent {
                        entity_id: *entity_id,
                        kind,
                    });
                }
            }
            ActionIntent::Relocate { entity_id } => {
                for (id, mut sheet) in players.iter_mut() {
                    if id.0 != *entity_id {
                        continue;
                    }
                    let home = initial_home(
                        Some(sheet.age),
                        Some(sheet.gold),
                        sheet.undifferentiated,
                        &directory.home_policy,
                    );
                    if home != sheet.home {
                        sheet.home = home;
                        events.0.push(AssignmentEvent {
                            entity_id: *entity_id,
                            kind: AssignmentEventKind::HomeChanged { home },
                        });
                    }
                }
            }
            _ => {}
        }
    }
}
