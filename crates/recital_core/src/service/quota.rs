//! Per-tier line quota computation.
//!
//! # Responsibility
//! - Detect which grade tiers are present among the participants.
//! - Select the percentage row keyed by the highest present tier and the
//!   session mode, then convert shares to integer line quotas.
//!
//! # Invariants
//! - Every grade except the configured remainder grade is floor-rounded;
//!   the remainder grade absorbs all rounding loss, never the lead.
//! - `GradeQuota::total() == total_lines` whenever the selected row's
//!   shares sum to at most 1.0.
//! - Pure function of its inputs; no I/O.

use crate::model::participant::Grade;
use crate::model::policy::WorkloadPolicy;

/// Line quotas for the lead and each grade tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeQuota {
    pub lead: u64,
    pub grade_a: u64,
    pub grade_b: u64,
    pub grade_c: u64,
    pub grade_d: u64,
}

impl GradeQuota {
    pub fn for_grade(&self, grade: Grade) -> u64 {
        match grade {
            Grade::A => self.grade_a,
            Grade::B => self.grade_b,
            Grade::C => self.grade_c,
            Grade::D => self.grade_d,
        }
    }

    pub fn total(&self) -> u64 {
        self.lead + self.grade_a + self.grade_b + self.grade_c + self.grade_d
    }
}

/// Returns the strongest grade present, if any.
///
/// Grade declaration order is strongest-first, so the minimum wins.
pub fn highest_present(grades: &[Grade]) -> Option<Grade> {
    grades.iter().min().copied()
}

/// Computes per-tier quotas for a span of `total_lines`.
///
/// The mode flag selects between the policy's session and review tables;
/// within the selected set the row is keyed by the highest present grade.
pub fn compute_quota(
    total_lines: u64,
    grades: &[Grade],
    students_workload: bool,
    policy: &WorkloadPolicy,
) -> GradeQuota {
    let table = policy
        .tables_for_mode(students_workload)
        .table_for(highest_present(grades));

    let mut quota = GradeQuota {
        lead: floor_share(total_lines, table.lead),
        grade_a: 0,
        grade_b: 0,
        grade_c: 0,
        grade_d: 0,
    };

    for grade in Grade::ALL {
        if grade != policy.remainder_grade {
            set_grade(&mut quota, grade, floor_share(total_lines, table.share_for(grade)));
        }
    }

    let allotted = quota.total();
    set_grade(
        &mut quota,
        policy.remainder_grade,
        total_lines.saturating_sub(allotted),
    );

    quota
}

fn floor_share(total_lines: u64, share: f64) -> u64 {
    (total_lines as f64 * share).floor() as u64
}

fn set_grade(quota: &mut GradeQuota, grade: Grade, lines: u64) {
    match grade {
        Grade::A => quota.grade_a = lines,
        Grade::B => quota.grade_b = lines,
        Grade::C => quota.grade_c = lines,
        Grade::D => quota.grade_d = lines,
    }
}
