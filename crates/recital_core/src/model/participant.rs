//! Participant identity and skill grades.
//!
//! # Responsibility
//! - Define the four-tier grade scale and its DB letter codec.
//! - Distinguish the lead from roster participants at the type level.
//!
//! # Invariants
//! - Declaration order of `Grade` is strongest-first; the derived `Ord`
//!   therefore ranks `A < B < C < D`, and "highest present grade" is the
//!   minimum of a grade set.
//! - Grade letters persisted to storage are exactly `A`..`D`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable roster key for a participant.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ParticipantId = i64;

/// Skill grade of a participant.
///
/// Higher tiers absorb proportionally more recitation workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Grade {
    /// Strongest tier.
    A,
    B,
    C,
    /// Weakest tier; default target of the 1-line-per-member policy.
    D,
}

impl Grade {
    /// All grades in fixed processing order, strongest first.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(grade_to_db(*self))
    }
}

/// Receiver of assigned workload: either the session lead or a participant.
///
/// The lead is a sentinel, not a roster row; it absorbs every line no
/// participant claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assignee {
    Lead,
    Participant(ParticipantId),
}

impl Display for Assignee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lead => f.write_str("lead"),
            Self::Participant(id) => write!(f, "participant:{id}"),
        }
    }
}

pub(crate) fn grade_to_db(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "A",
        Grade::B => "B",
        Grade::C => "C",
        Grade::D => "D",
    }
}

pub(crate) fn parse_grade(value: &str) -> Option<Grade> {
    match value {
        "A" => Some(Grade::A),
        "B" => Some(Grade::B),
        "C" => Some(Grade::C),
        "D" => Some(Grade::D),
        _ => None,
    }
}
