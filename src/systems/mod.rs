pub mod assignment;
pub mod economy;

pub use assignment::{assignment_system, AssignmentEvent, AssignmentEventKind, AssignmentEventLog};
pub use economy::{economy_system, EconomicOutcome, EconomyEvent, EconomyEventLog};
