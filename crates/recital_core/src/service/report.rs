//! Report rendering: raw allocation to display terms.
//!
//! # Responsibility
//! - Relabel section numbers to section names and participant ids to
//!   display names.
//!
//! # Invariants
//! - Span boundaries and counts pass through unaltered; this step only
//!   renames.
//! - The lead renders under the fixed `"Lead"` display name.
//! - Participants missing from the roster name map are skipped, matching
//!   upstream validation having already vouched for them.

use crate::model::participant::{Assignee, ParticipantId};
use crate::repo::catalog_repo::CatalogIndex;
use crate::repo::roster_repo::RosterLookup;
use crate::repo::{RepoError, RepoResult};
use crate::service::allocation_service::Allocation;
use serde::Serialize;
use std::collections::HashMap;

/// Display name used for the lead entry.
pub const LEAD_DISPLAY_NAME: &str = "Lead";

/// One assigned range in display terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeRecord {
    pub start_section: u32,
    pub start_section_name: String,
    pub start_item: u32,
    pub end_section: u32,
    pub end_section_name: String,
    pub end_item: u32,
}

/// Ranges assigned to one display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub display_name: String,
    pub ranges: Vec<RangeRecord>,
}

/// Renders an allocation into display terms via catalog and roster lookups.
pub fn render_report<C: CatalogIndex, R: RosterLookup>(
    allocation: &Allocation,
    catalog: &C,
    roster: &R,
) -> RepoResult<Vec<ReportEntry>> {
    let section_names = catalog.section_names()?;

    let participant_ids: Vec<ParticipantId> = allocation
        .entries
        .iter()
        .filter_map(|entry| match entry.assignee {
            Assignee::Participant(id) => Some(id),
            Assignee::Lead => None,
        })
        .collect();
    let display_names = roster.display_names(&participant_ids)?;

    let mut report = Vec::with_capacity(allocation.entries.len());
    for entry in &allocation.entries {
        let display_name = match entry.assignee {
            Assignee::Lead => LEAD_DISPLAY_NAME.to_string(),
            Assignee::Participant(id) => match display_names.get(&id) {
                Some(name) => name.clone(),
                None => continue,
            },
        };

        let mut ranges = Vec::with_capacity(entry.spans.len());
        for span in &entry.spans {
            let start_section_name = section_name(&section_names, span.start.section)?;
            let end_section_name = section_name(&section_names, span.end.section)?;
            ranges.push(RangeRecord {
                start_section: span.start.section,
                start_section_name,
                start_item: span.start.item,
                end_section: span.end.section,
                end_section_name,
                end_item: span.end.item,
            });
        }

        report.push(ReportEntry {
            display_name,
            ranges,
        });
    }

    Ok(report)
}

fn section_name(names: &HashMap<u32, String>, number: u32) -> RepoResult<String> {
    names.get(&number).cloned().ok_or_else(|| {
        RepoError::InvalidData(format!("section {number} missing from sections table"))
    })
}
