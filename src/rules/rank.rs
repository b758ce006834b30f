use std::fmt;

use serde::{Deserialize, Serialize};

/// Competence grade on the fixed ladder used for both mental and physical
/// aptitude. Ordering is by `score`, not declaration tricks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankTier {
    #[serde(rename = "无", alias = "NONE")]
    Unranked,
    F,
    E,
    D,
    C,
    #[serde(rename = "C+")]
    CPlus,
    B,
    #[serde(rename = "B+")]
    BPlus,
    A,
    #[serde(rename = "A+")]
    APlus,
    S,
    #[serde(rename = "S+")]
    SPlus,
    SS,
    #[serde(rename = "SS+")]
    SSPlus,
    SSS,
}

impl RankTier {
    pub const ALL: [RankTier; 15] = [
        RankTier::Unranked,
        RankTier::F,
        RankTier::E,
        RankTier::D,
        RankTier::C,
        RankTier::CPlus,
        RankTier::B,
        RankTier::BPlus,
        RankTier::A,
        RankTier::APlus,
        RankTier::S,
        RankTier::SPlus,
        RankTier::SS,
        RankTier::SSPlus,
        RankTier::SSS,
    ];

    pub fn score(self) -> u8 {
        match self {
            RankTier::Unranked => 0,
            RankTier::F => 1,
            RankTier::E => 2,
            RankTier::D => 3,
            RankTier::C => 4,
            RankTier::CPlus => 5,
            RankTier::B => 6,
            RankTier::BPlus => 7,
            RankTier::A => 8,
            RankTier::APlus => 9,
            RankTier::S => 10,
            RankTier::SPlus => 11,
            RankTier::SS => 12,
            RankTier::SSPlus => 13,
            RankTier::SSS => 14,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RankTier::Unranked => "无",
            RankTier::F => "F",
            RankTier::E => "E",
            RankTier::D => "D",
            RankTier::C => "C",
            RankTier::CPlus => "C+",
            RankTier::B => "B",
            RankTier::BPlus => "B+",
            RankTier::A => "A",
            RankTier::APlus => "A+",
            RankTier::S => "S",
            RankTier::SPlus => "S+",
            RankTier::SS => "SS",
            RankTier::SSPlus => "SS+",
            RankTier::SSS => "SSS",
        }
    }

    pub fn from_label(label: &str) -> Option<RankTier> {
        match label.trim() {
            "无" | "NONE" => Some(RankTier::Unranked),
            "F" => Some(RankTier::F),
            "E" => Some(RankTier::E),
            "D" => Some(RankTier::D),
            "C" => Some(RankTier::C),
            "C+" => Some(RankTier::CPlus),
            "B" => Some(RankTier::B),
            "B+" => Some(RankTier::BPlus),
            "A" => Some(RankTier::A),
            "A+" => Some(RankTier::APlus),
            "S" => Some(RankTier::S),
            "S+" => Some(RankTier::SPlus),
            "SS" => Some(RankTier::SS),
            "SS+" => Some(RankTier::SSPlus),
            "SSS" => Some(RankTier::SSS),
            _ => None,
        }
    }
}

impl fmt::Display for RankTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Total scoring over raw wire labels. Absent, empty, and unrecognized labels
/// all score as the weakest tier rather than failing.
pub fn rank_score(label: Option<&str>) -> u8 {
    label
        .and_then(RankTier::from_label)
        .map(RankTier::score)
        .unwrap_or(0)
}
