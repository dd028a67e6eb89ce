//! Contiguous range assignment over the item stream.
//!
//! # Responsibility
//! - Convert per-assignee line counts into closed (start, end) spans over
//!   the materialized item stream.
//! - Reconcile items no quota walk consumed: single-length leftovers go to
//!   one-line participants, everything else to the lead.
//!
//! # Invariants
//! - One forward cursor, never rewound; spans across all assignees laid
//!   end-to-end reconstruct the input stream exactly.
//! - An assignee's range never splits an item: the walk stops short of an
//!   item that would overshoot the quota.
//! - A participant is matched at most once in the leftover sweep.
//! - The final lead span terminates the walk, guaranteeing full coverage.
//! - Pure function of its inputs; no I/O.

use crate::model::participant::Assignee;
use crate::model::span::Span;
use crate::repo::catalog_repo::CatalogItem;
use crate::service::lines::LineShare;

/// Spans assigned to one workload receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeAssignment {
    pub assignee: Assignee,
    /// Line count the quota walk targeted for this assignee.
    pub lines: u64,
    /// Closed spans in document order; empty when nothing was consumed.
    pub spans: Vec<Span>,
}

/// Walks the item stream once and assigns contiguous spans per share.
///
/// `shares` must be in processing order (lead first, then participants in
/// request order), as produced by [`allocate_lines`].
///
/// [`allocate_lines`]: crate::service::lines::allocate_lines
pub fn assign_ranges(shares: &[LineShare], items: &[CatalogItem]) -> Vec<RangeAssignment> {
    let mut assignments: Vec<RangeAssignment> = shares
        .iter()
        .map(|share| RangeAssignment {
            assignee: share.assignee,
            lines: share.lines,
            spans: Vec::new(),
        })
        .collect();

    let mut cursor = 0usize;

    // Phase 1: strict per-quota walk.
    for assignment in &mut assignments {
        let target = assignment.lines;
        let mut consumed = 0u64;
        let mut first_index = None;

        while cursor < items.len() && consumed < target {
            let item = &items[cursor];
            if consumed + item.length > target {
                break;
            }
            if first_index.is_none() {
                first_index = Some(cursor);
            }
            consumed += item.length;
            cursor += 1;
        }

        if let Some(start_index) = first_index {
            assignment.spans.push(Span::new(
                items[start_index].position(),
                items[cursor - 1].position(),
            ));
        }
    }

    // Phase 2: leftover sweep. Single-length items are handed to one-line
    // participants, first match in stable order, each matched once; the
    // first item that fits no one turns the rest into the lead's final span.
    let mut matched = vec![false; assignments.len()];
    while cursor < items.len() {
        let item = &items[cursor];

        if item.length == 1 {
            let slot = assignments.iter().enumerate().position(|(index, a)| {
                matches!(a.assignee, Assignee::Participant(_)) && a.lines == 1 && !matched[index]
            });
            if let Some(index) = slot {
                matched[index] = true;
                let position = item.position();
                assignments[index].spans.push(Span::new(position, position));
                cursor += 1;
                continue;
            }
        }

        let start = items[cursor].position();
        let end = items[items.len() - 1].position();
        if let Some(lead) = assignments
            .iter_mut()
            .find(|a| a.assignee == Assignee::Lead)
        {
            lead.spans.push(Span::new(start, end));
        }
        break;
    }

    assignments
}

#[cfg(test)]
mod tests {
    use super::assign_ranges;
    use crate::model::participant::Assignee;
    use crate::repo::catalog_repo::CatalogItem;
    use crate::service::lines::LineShare;

    fn items(lengths: &[u64]) -> Vec<CatalogItem> {
        lengths
            .iter()
            .enumerate()
            .map(|(index, &length)| CatalogItem {
                section: 1,
                item: index as u32 + 1,
                length,
            })
            .collect()
    }

    fn share(assignee: Assignee, lines: u64) -> LineShare {
        LineShare { assignee, lines }
    }

    #[test]
    fn walk_never_splits_an_item() {
        let stream = items(&[3, 2, 4]);
        let shares = [share(Assignee::Lead, 4), share(Assignee::Participant(1), 6)];

        let result = assign_ranges(&shares, &stream);

        // Lead stops short of the length-2 item that would overshoot 4.
        assert_eq!(result[0].spans.len(), 1);
        assert_eq!(result[0].spans[0].start.item, 1);
        assert_eq!(result[0].spans[0].end.item, 1);
        assert_eq!(result[1].spans[0].start.item, 2);
        assert_eq!(result[1].spans[0].end.item, 3);
    }

    #[test]
    fn zero_quota_assignee_gets_no_span_records() {
        let stream = items(&[2, 2]);
        let shares = [share(Assignee::Lead, 4), share(Assignee::Participant(1), 0)];

        let result = assign_ranges(&shares, &stream);

        assert!(result[1].spans.is_empty());
    }

    #[test]
    fn leftover_single_lines_match_each_one_line_participant_once() {
        let stream = items(&[3, 1, 1, 1, 1]);
        let shares = [
            share(Assignee::Lead, 3),
            share(Assignee::Participant(1), 1),
            share(Assignee::Participant(2), 1),
        ];

        let result = assign_ranges(&shares, &stream);

        // The walk hands items 2 and 3 to P1 and P2; the sweep then pairs
        // leftover items 4 and 5 with P1 and P2 in stable order, once each.
        assert_eq!(result[1].spans.len(), 2);
        assert_eq!(result[1].spans[1].start.item, 4);
        assert_eq!(result[2].spans.len(), 2);
        assert_eq!(result[2].spans[1].start.item, 5);
        assert_eq!(result[0].spans.len(), 1);
    }

    #[test]
    fn unmatched_leftovers_collapse_into_final_lead_span() {
        let stream = items(&[3, 1, 2]);
        let shares = [share(Assignee::Lead, 3), share(Assignee::Participant(1), 0)];

        let result = assign_ranges(&shares, &stream);

        assert_eq!(result[0].spans.len(), 2);
        assert_eq!(result[0].spans[1].start.item, 2);
        assert_eq!(result[0].spans[1].end.item, 3);
    }
}
