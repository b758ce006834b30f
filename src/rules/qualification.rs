use serde::{Deserialize, Serialize};

use crate::rules::age::is_minor;
use crate::rules::rank::{rank_score, RankTier};

/// Inclusive age window for roles that gate on age alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBand {
    pub min: i64,
    pub max: i64,
}

impl AgeBand {
    pub fn contains(&self, age: i64) -> bool {
        age >= self.min && age <= self.max
    }
}

/// One row of a district role table. An absent minimum means that axis is
/// unconstrained; an age band replaces the rank checks entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRequirement {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub min_mental: Option<RankTier>,
    #[serde(default)]
    pub min_physical: Option<RankTier>,
    #[serde(default)]
    pub age_band: Option<AgeBand>,
}

/// Candidate facts as they arrive off the wire. Rank labels stay raw here and
/// are scored totally, so a bad label can only weaken the applicant.
#[derive(Debug, Clone, Copy)]
pub struct Applicant<'a> {
    pub age: Option<i64>,
    pub mental_rank: Option<&'a str>,
    pub physical_rank: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualifyError {
    OutsideAgeBand,
    Underage,
    MentalBelowMinimum,
    PhysicalBelowMinimum,
}

pub fn check_qualification(
    requirement: &RoleRequirement,
    applicant: &Applicant,
) -> Result<(), QualifyError> {
    if let Some(band) = requirement.age_band {
        return match applicant.age {
            Some(age) if band.contains(age) => Ok(()),
            _ => Err(QualifyError::OutsideAgeBand),
        };
    }

    if is_minor(applicant.age) {
        return Err(QualifyError::Underage);
    }

    if let Some(min) = requirement.min_mental {
        if rank_score(applicant.mental_rank) < min.score() {
            return Err(QualifyError::MentalBelowMinimum);
        }
    }

    if let Some(min) = requirement.min_physical {
        if rank_score(applicant.physical_rank) < min.score() {
            return Err(QualifyError::PhysicalBelowMinimum);
        }
    }

    Ok(())
}

pub fn qualifies(requirement: &RoleRequirement, applicant: &Applicant) -> bool {
    check_qualification(requirement, applicant).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adult(mental: &'static str, physical: &'static str) -> Applicant<'static> {
        Applicant {
            age: Some(20),
            mental_rank: Some(mental),
            physical_rank: Some(physical),
        }
    }

    fn banded_role() -> RoleRequirement {
        RoleRequirement {
            id: "academy_student".to_string(),
            name: "Academy Student".to_string(),
            min_mental: None,
            min_physical: None,
            age_band: Some(AgeBand { min: 16, max: 19 }),
        }
    }

    fn director_role() -> RoleRequirement {
        RoleRequirement {
            id: "bureau_director".to_string(),
            name: "Bureau Director".to_string(),
            min_mental: Some(RankTier::SPlus),
            min_physical: Some(RankTier::SPlus),
            age_band: None,
        }
    }

    #[test]
    fn age_band_ignores_ranks() {
        let role = banded_role();
        for (age, expected) in [(15, false), (16, true), (19, true), (20, false)] {
            let applicant = Applicant {
                age: Some(age),
                mental_rank: Some("无"),
                physical_rank: None,
            };
            assert_eq!(qualifies(&role, &applicant), expected, "age {}", age);
        }
    }

    #[test]
    fn age_band_requires_a_known_age() {
        let role = banded_role();
        let applicant = Applicant {
            age: None,
            mental_rank: Some("SSS"),
            physical_rank: Some("SSS"),
        };
        assert_eq!(
            check_qualification(&role, &applicant),
            Err(QualifyError::OutsideAgeBand)
        );
    }

    #[test]
    fn minors_are_rejected_before_rank_checks() {
        let role = director_role();
        let applicant = Applicant {
            age: Some(15),
            mental_rank: Some("SSS"),
            physical_rank: Some("SSS"),
        };
        assert_eq!(
            check_qualification(&role, &applicant),
            Err(QualifyError::Underage)
        );
    }

    #[test]
    fn both_axes_must_clear_their_minimum() {
        let role = director_role();
        assert_eq!(
            check_qualification(&role, &adult("S+", "S")),
            Err(QualifyError::PhysicalBelowMinimum)
        );
        assert!(qualifies(&role, &adult("SS", "S+")));
    }

    #[test]
    fn absent_minimum_is_always_satisfied() {
        let role = RoleRequirement {
            id: "west_mechanic".to_string(),
            name: "West Mechanic".to_string(),
            min_mental: None,
            min_physical: Some(RankTier::CPlus),
            age_band: None,
        };
        assert!(qualifies(&role, &adult("无", "C+")));
        assert!(!qualifies(&role, &adult("SSS", "C")));
    }

    #[test]
    fn unrecognized_labels_score_as_weakest() {
        let role = RoleRequirement {
            id: "tower_guard".to_string(),
            name: "Tower Guard".to_string(),
            min_mental: Some(RankTier::C),
            min_physical: None,
            age_band: None,
        };
        assert!(!qualifies(&role, &adult("???", "SSS")));
    }
}
