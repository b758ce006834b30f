pub mod age;
pub mod home;
pub mod prosperity;
pub mod qualification;
pub mod rank;

pub use age::{is_minor, resolve_initial_age, ADULT_AGE};
pub use home::{initial_home, resolve_initial_home, HomeLocation, HomePolicy};
pub use prosperity::{
    compare_prosperity, economic_action_succeeds, prosperity, ProsperityWeights, SettlementStats,
};
pub use qualification::{
    check_qualification, qualifies, AgeBand, Applicant, QualifyError, RoleRequirement,
};
pub use rank::{rank_score, RankTier};
