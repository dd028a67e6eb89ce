//! Allocation orchestration service.
//!
//! # Responsibility
//! - Resolve named span boundaries against the catalog and validate
//!   document order.
//! - Compose quota, line, and range computation into one allocation call.
//!
//! # Invariants
//! - Catalog and roster access goes through injected repositories; the
//!   service holds no connection state of its own.
//! - Identical requests against an unchanged catalog yield identical
//!   allocations.
//! - Quotas must cover the span total exactly before any range is walked.

use crate::model::participant::{Grade, ParticipantId};
use crate::model::policy::WorkloadPolicy;
use crate::model::span::{Position, Span};
use crate::repo::catalog_repo::CatalogIndex;
use crate::repo::roster_repo::RosterLookup;
use crate::repo::RepoError;
use crate::service::lines::allocate_lines;
use crate::service::quota::compute_quota;
use crate::service::ranges::{assign_ranges, RangeAssignment};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One allocation request from the API layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRequest {
    /// Participants in presentation order; this order is stable through
    /// every engine stage.
    pub participant_ids: Vec<ParticipantId>,
    pub from_section: String,
    pub from_item: u32,
    pub to_section: String,
    pub to_item: u32,
    /// Mode flag: student-paced session tables vs lead-paced review tables.
    pub students_workload: bool,
}

/// Raw allocation result before display-name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub span: Span,
    pub total_lines: u64,
    /// Lead first, then participants in request order.
    pub entries: Vec<RangeAssignment>,
}

/// Errors surfaced by the allocation flow.
#[derive(Debug)]
pub enum AllocationError {
    /// Named section is absent from the catalog.
    SectionNotFound(String),
    /// Requested participant has no roster grade.
    ParticipantNotFound(ParticipantId),
    /// Span boundaries are reversed in document order.
    InvalidRange { from: Position, to: Position },
    /// Computed quotas fail to cover the span total; reachable only with a
    /// share table summing above 1.0.
    InvalidQuantity { expected: u64, actual: u64 },
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for AllocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SectionNotFound(name) => write!(f, "section not found: `{name}`"),
            Self::ParticipantNotFound(id) => write!(f, "participant not found: {id}"),
            Self::InvalidRange { from, to } => {
                write!(f, "span start {from} comes after span end {to}")
            }
            Self::InvalidQuantity { expected, actual } => write!(
                f,
                "quota sum {actual} does not match span total {expected}"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AllocationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AllocationError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::SectionNotFound(name) => Self::SectionNotFound(name),
            RepoError::ParticipantNotFound(id) => Self::ParticipantNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Allocation entry point composing catalog, roster, and the pure engine.
pub struct AllocationService<C: CatalogIndex, R: RosterLookup> {
    catalog: C,
    roster: R,
    policy: WorkloadPolicy,
}

impl<C: CatalogIndex, R: RosterLookup> AllocationService<C, R> {
    /// Creates a service with the default workload policy.
    pub fn new(catalog: C, roster: R) -> Self {
        Self::with_policy(catalog, roster, WorkloadPolicy::default())
    }

    /// Creates a service with an institution-specific policy.
    pub fn with_policy(catalog: C, roster: R, policy: WorkloadPolicy) -> Self {
        Self {
            catalog,
            roster,
            policy,
        }
    }

    pub fn policy(&self) -> &WorkloadPolicy {
        &self.policy
    }

    /// Allocates the requested span across the lead and participants.
    pub fn allocate(&self, request: &AllocationRequest) -> Result<Allocation, AllocationError> {
        let from = self.catalog.resolve_section(&request.from_section)?;
        let to = self.catalog.resolve_section(&request.to_section)?;

        let start = Position::new(from.number, request.from_item);
        let end = Position::new(to.number, request.to_item);
        if start > end {
            return Err(AllocationError::InvalidRange {
                from: start,
                to: end,
            });
        }
        let span = Span::new(start, end);

        let total_lines = self.catalog.total_length(span)?;

        let grade_map = self.roster.grades_for(&request.participant_ids)?;
        let mut participants = Vec::with_capacity(request.participant_ids.len());
        for &id in &request.participant_ids {
            let grade = grade_map
                .get(&id)
                .copied()
                .ok_or(AllocationError::ParticipantNotFound(id))?;
            participants.push((id, grade));
        }
        let grades: Vec<Grade> = participants.iter().map(|&(_, grade)| grade).collect();

        let quota = compute_quota(
            total_lines,
            &grades,
            request.students_workload,
            &self.policy,
        );
        if quota.total() != total_lines {
            return Err(AllocationError::InvalidQuantity {
                expected: total_lines,
                actual: quota.total(),
            });
        }

        let shares = allocate_lines(total_lines, &participants, &quota, self.policy.unit_grade);
        let items = self.catalog.stream_items(span)?;
        let entries = assign_ranges(&shares, &items);

        info!(
            "event=allocation module=service status=ok span={span} total_lines={total_lines} participants={} mode={}",
            participants.len(),
            request.students_workload
        );

        Ok(Allocation {
            span,
            total_lines,
            entries,
        })
    }
}
