//! Per-participant line allocation.
//!
//! # Responsibility
//! - Split tier quotas into exact per-participant line counts.
//! - Fall unclaimed workload back to the lead.
//!
//! # Invariants
//! - Output order is lead first, then participants in caller order; that
//!   order is the range-assignment processing order.
//! - A tier with no members surrenders its whole quota to the lead.
//! - Every member of the unit grade receives exactly one line regardless
//!   of the tier quota; the lead credit for that tier saturates at zero.
//! - Remainder lines within a tier go to the earliest members, one each,
//!   in a single pass.
//! - The assigned sum equals `total_lines` unless the unit-grade minimum
//!   pushed it above, and never falls below it.
//! - Pure function of its inputs; no I/O.

use crate::model::participant::{Assignee, Grade, ParticipantId};
use crate::service::quota::GradeQuota;

/// Line count assigned to one workload receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineShare {
    pub assignee: Assignee,
    pub lines: u64,
}

/// Splits tier quotas into per-participant line counts.
///
/// `participants` supplies the stable caller order that governs both
/// remainder distribution and downstream range assignment.
pub fn allocate_lines(
    total_lines: u64,
    participants: &[(ParticipantId, Grade)],
    quota: &GradeQuota,
    unit_grade: Grade,
) -> Vec<LineShare> {
    let mut lead_lines = quota.lead;
    let mut member_lines: Vec<u64> = vec![0; participants.len()];

    for grade in Grade::ALL {
        let tier_quota = quota.for_grade(grade);
        let members: Vec<usize> = participants
            .iter()
            .enumerate()
            .filter(|(_, (_, g))| *g == grade)
            .map(|(index, _)| index)
            .collect();

        if members.is_empty() {
            lead_lines += tier_quota;
            continue;
        }

        if grade == unit_grade {
            for &index in &members {
                member_lines[index] += 1;
            }
            lead_lines += tier_quota.saturating_sub(members.len() as u64);
            continue;
        }

        let per_member = tier_quota / members.len() as u64;
        let remainder = tier_quota % members.len() as u64;
        for &index in &members {
            member_lines[index] += per_member;
        }
        for &index in members.iter().take(remainder as usize) {
            member_lines[index] += 1;
        }
    }

    // Top up the lead if floor rounding left lines unassigned anywhere.
    let assigned: u64 = lead_lines + member_lines.iter().sum::<u64>();
    if assigned < total_lines {
        lead_lines += total_lines - assigned;
    }

    let mut shares = Vec::with_capacity(participants.len() + 1);
    shares.push(LineShare {
        assignee: Assignee::Lead,
        lines: lead_lines,
    });
    shares.extend(
        participants
            .iter()
            .zip(member_lines)
            .map(|(&(id, _), lines)| LineShare {
                assignee: Assignee::Participant(id),
                lines,
            }),
    );
    shares
}

#[cfg(test)]
mod tests {
    use super::allocate_lines;
    use crate::model::participant::{Assignee, Grade};
    use crate::service::quota::GradeQuota;

    fn quota(lead: u64, a: u64, b: u64, c: u64, d: u64) -> GradeQuota {
        GradeQuota {
            lead,
            grade_a: a,
            grade_b: b,
            grade_c: c,
            grade_d: d,
        }
    }

    #[test]
    fn empty_tier_quota_falls_back_to_lead() {
        let shares = allocate_lines(10, &[(7, Grade::B)], &quota(2, 5, 3, 0, 0), Grade::D);

        assert_eq!(shares[0].assignee, Assignee::Lead);
        // Lead keeps its own 2 and inherits the memberless A tier's 5.
        assert_eq!(shares[0].lines, 7);
        assert_eq!(shares[1].lines, 3);
    }

    #[test]
    fn remainder_goes_to_earliest_members_once() {
        let participants = [(1, Grade::B), (2, Grade::B), (3, Grade::B)];
        let shares = allocate_lines(11, &participants, &quota(0, 0, 11, 0, 0), Grade::D);

        assert_eq!(shares[1].lines, 4);
        assert_eq!(shares[2].lines, 4);
        assert_eq!(shares[3].lines, 3);
    }

    #[test]
    fn unit_grade_members_get_one_line_each() {
        let participants = [(1, Grade::D), (2, Grade::D), (3, Grade::D)];
        let shares = allocate_lines(10, &participants, &quota(5, 0, 0, 0, 5), Grade::D);

        for share in &shares[1..] {
            assert_eq!(share.lines, 1);
        }
        // 5 - 3 members = 2 leftover lines credited to the lead.
        assert_eq!(shares[0].lines, 7);
    }

    #[test]
    fn unit_grade_shortfall_never_debits_lead() {
        let participants = [(1, Grade::D), (2, Grade::D), (3, Grade::D)];
        let shares = allocate_lines(4, &participants, &quota(3, 0, 0, 0, 1), Grade::D);

        assert_eq!(shares[0].lines, 3);
        for share in &shares[1..] {
            assert_eq!(share.lines, 1);
        }
        // Documented exception: the one-line minimum overruns the total.
        let sum: u64 = shares.iter().map(|share| share.lines).sum();
        assert_eq!(sum, 6);
    }
}
