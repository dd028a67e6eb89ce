use recital_core::{assign_ranges, Assignee, CatalogItem, LineShare, Position, Span};

fn section_items(section: u32, lengths: &[u64]) -> Vec<CatalogItem> {
    lengths
        .iter()
        .enumerate()
        .map(|(index, &length)| CatalogItem {
            section,
            item: index as u32 + 1,
            length,
        })
        .collect()
}

fn share(assignee: Assignee, lines: u64) -> LineShare {
    LineShare { assignee, lines }
}

fn span(from: (u32, u32), to: (u32, u32)) -> Span {
    Span::new(Position::new(from.0, from.1), Position::new(to.0, to.1))
}

/// Expands each assigned span against the stream and asserts the spans
/// jointly cover every item exactly once.
fn assert_full_coverage(assignments: &[recital_core::RangeAssignment], items: &[CatalogItem]) {
    let mut covered = vec![0u32; items.len()];
    for assignment in assignments {
        for s in &assignment.spans {
            let start = items
                .iter()
                .position(|i| i.position() == s.start)
                .expect("span start must be a stream item");
            let end = items
                .iter()
                .position(|i| i.position() == s.end)
                .expect("span end must be a stream item");
            assert!(start <= end, "span boundaries reversed");
            for slot in &mut covered[start..=end] {
                *slot += 1;
            }
        }
    }
    assert!(
        covered.iter().all(|&count| count == 1),
        "coverage must be exact: {covered:?}"
    );
}

#[test]
fn golden_scenario_splits_twelve_lines_across_lead_and_two_participants() {
    // One section, item lengths [3,2,4,1,2], 12 lines total; lead quota 4,
    // two participants with 4 lines each.
    let items = section_items(1, &[3, 2, 4, 1, 2]);
    let shares = [
        share(Assignee::Lead, 4),
        share(Assignee::Participant(1), 4),
        share(Assignee::Participant(2), 4),
    ];

    let result = assign_ranges(&shares, &items);

    // Lead stops before item 2 (3+2 would overshoot 4), participants take
    // one item each, and the unmatched tail returns to the lead.
    assert_eq!(
        result[0].spans,
        vec![span((1, 1), (1, 1)), span((1, 4), (1, 5))]
    );
    assert_eq!(result[1].spans, vec![span((1, 2), (1, 2))]);
    assert_eq!(result[2].spans, vec![span((1, 3), (1, 3))]);
    assert_full_coverage(&result, &items);
}

#[test]
fn ranges_cross_section_boundaries_without_gaps() {
    let mut items = section_items(1, &[2, 3]);
    items.extend(section_items(2, &[1, 1, 4]));
    items.extend(section_items(3, &[2]));

    let shares = [
        share(Assignee::Lead, 5),
        share(Assignee::Participant(1), 2),
        share(Assignee::Participant(2), 6),
    ];

    let result = assign_ranges(&shares, &items);

    assert_eq!(result[0].spans, vec![span((1, 1), (1, 2))]);
    assert_eq!(result[1].spans, vec![span((2, 1), (2, 2))]);
    assert_eq!(result[2].spans, vec![span((2, 3), (3, 1))]);
    assert_full_coverage(&result, &items);
}

#[test]
fn exhausted_stream_leaves_trailing_participants_empty() {
    let items = section_items(1, &[4]);
    let shares = [
        share(Assignee::Lead, 4),
        share(Assignee::Participant(1), 3),
    ];

    let result = assign_ranges(&shares, &items);

    assert_eq!(result[0].spans, vec![span((1, 1), (1, 1))]);
    assert!(result[1].spans.is_empty());
}

#[test]
fn sweep_matches_one_line_participants_then_returns_rest_to_lead() {
    let items = section_items(1, &[5, 1, 1, 3]);
    let shares = [
        share(Assignee::Lead, 5),
        share(Assignee::Participant(1), 1),
        share(Assignee::Participant(2), 1),
    ];

    let result = assign_ranges(&shares, &items);

    // The walk satisfies both one-line participants from items 2 and 3;
    // item 4 cannot match anyone and closes as the lead's final span.
    assert_eq!(result[0].spans, vec![span((1, 1), (1, 1)), span((1, 4), (1, 4))]);
    assert_eq!(result[1].spans, vec![span((1, 2), (1, 2))]);
    assert_eq!(result[2].spans, vec![span((1, 3), (1, 3))]);
    assert_full_coverage(&result, &items);
}

#[test]
fn per_participant_span_lengths_match_assigned_lines_when_walk_is_exact() {
    let items = section_items(1, &[2, 2, 2, 2]);
    let shares = [
        share(Assignee::Lead, 4),
        share(Assignee::Participant(1), 2),
        share(Assignee::Participant(2), 2),
    ];

    let result = assign_ranges(&shares, &items);

    for assignment in &result {
        let assigned: u64 = assignment
            .spans
            .iter()
            .flat_map(|s| {
                items
                    .iter()
                    .filter(|i| i.position() >= s.start && i.position() <= s.end)
            })
            .map(|i| i.length)
            .sum();
        assert_eq!(assigned, assignment.lines);
    }
    assert_full_coverage(&result, &items);
}
