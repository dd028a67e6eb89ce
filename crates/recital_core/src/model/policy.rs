//! Configurable workload percentage policy.
//!
//! # Responsibility
//! - Hold the two percentage-table sets selected by the session mode flag.
//! - Name the grade that absorbs integer-rounding remainders and the grade
//!   that receives a fixed one-line practice unit per member.
//!
//! # Invariants
//! - Each `ShareTable` row's shares should sum to at most 1.0; the
//!   orchestrator rejects allocations whose quotas fail to cover the span
//!   total, so a misconfigured table surfaces as an error, not a silent gap.
//! - `Default` carries the production constants; institutions override by
//!   deserializing their own policy JSON.

use crate::model::participant::Grade;
use serde::{Deserialize, Serialize};

/// One row of percentage shares: the lead plus each grade tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShareTable {
    pub lead: f64,
    pub grade_a: f64,
    pub grade_b: f64,
    pub grade_c: f64,
    pub grade_d: f64,
}

impl ShareTable {
    pub fn share_for(&self, grade: Grade) -> f64 {
        match grade {
            Grade::A => self.grade_a,
            Grade::B => self.grade_b,
            Grade::C => self.grade_c,
            Grade::D => self.grade_d,
        }
    }
}

/// Percentage rows for one mode, keyed by the highest grade present.
///
/// Presence of a stronger tier overrides the row picked for weaker tiers;
/// a session with no graded participants at all falls back to `when_d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeTables {
    pub when_a: ShareTable,
    pub when_b: ShareTable,
    pub when_c: ShareTable,
    pub when_d: ShareTable,
}

impl ModeTables {
    pub fn table_for(&self, highest_present: Option<Grade>) -> &ShareTable {
        match highest_present {
            Some(Grade::A) => &self.when_a,
            Some(Grade::B) => &self.when_b,
            Some(Grade::C) => &self.when_c,
            Some(Grade::D) | None => &self.when_d,
        }
    }
}

/// Full allocation policy: both mode table sets plus the two special grades.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadPolicy {
    /// Tables for student-paced sessions (mode flag set).
    pub session: ModeTables,
    /// Tables for lead-paced review sessions (mode flag clear).
    pub review: ModeTables,
    /// Grade whose quota is computed as the remainder after all floor
    /// rounding, keeping the quota sum exact.
    pub remainder_grade: Grade,
    /// Grade whose members each receive exactly one line regardless of the
    /// tier quota.
    pub unit_grade: Grade,
}

impl WorkloadPolicy {
    pub fn tables_for_mode(&self, students_workload: bool) -> &ModeTables {
        if students_workload {
            &self.session
        } else {
            &self.review
        }
    }
}

impl Default for WorkloadPolicy {
    fn default() -> Self {
        let review_row = ShareTable {
            lead: 0.5,
            grade_a: 0.2,
            grade_b: 0.15,
            grade_c: 0.10,
            grade_d: 0.0,
        };
        Self {
            session: ModeTables {
                when_a: ShareTable {
                    lead: 0.2,
                    grade_a: 0.6,
                    grade_b: 0.15,
                    grade_c: 0.05,
                    grade_d: 0.0,
                },
                when_b: ShareTable {
                    lead: 0.7,
                    grade_a: 0.0,
                    grade_b: 0.20,
                    grade_c: 0.1,
                    grade_d: 0.0,
                },
                when_c: ShareTable {
                    lead: 0.9,
                    grade_a: 0.0,
                    grade_b: 0.0,
                    grade_c: 0.1,
                    grade_d: 0.0,
                },
                when_d: ShareTable {
                    lead: 0.95,
                    grade_a: 0.0,
                    grade_b: 0.0,
                    grade_c: 0.0,
                    grade_d: 0.05,
                },
            },
            // The review mode uses one fixed split regardless of which
            // tiers attend.
            review: ModeTables {
                when_a: review_row,
                when_b: review_row,
                when_c: review_row,
                when_d: review_row,
            },
            remainder_grade: Grade::D,
            unit_grade: Grade::D,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WorkloadPolicy;
    use crate::model::participant::Grade;

    #[test]
    fn default_session_tables_are_keyed_by_highest_grade() {
        let policy = WorkloadPolicy::default();
        assert_eq!(policy.session.table_for(Some(Grade::A)).lead, 0.2);
        assert_eq!(policy.session.table_for(Some(Grade::B)).lead, 0.7);
        assert_eq!(policy.session.table_for(Some(Grade::C)).lead, 0.9);
        assert_eq!(policy.session.table_for(Some(Grade::D)).lead, 0.95);
        assert_eq!(policy.session.table_for(None).lead, 0.95);
    }

    #[test]
    fn default_review_tables_ignore_tier_presence() {
        let policy = WorkloadPolicy::default();
        for highest in [None, Some(Grade::A), Some(Grade::C)] {
            assert_eq!(policy.review.table_for(highest).lead, 0.5);
        }
    }
}
