//! Roster lookup contracts and SQLite implementation.
//!
//! # Responsibility
//! - Resolve participant ids to skill grades for the allocation engine.
//! - Resolve participant ids to display names for the report step.
//!
//! # Invariants
//! - Ids absent from the roster are simply absent from the returned maps;
//!   deciding whether that is an error belongs to the caller.
//! - Persisted grade letters outside `A`..`D` are rejected, not coerced.

use crate::model::participant::{parse_grade, Grade, ParticipantId};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::collections::HashMap;

const PARTICIPANT_COLUMNS: &[&str] = &["id", "name", "grade"];

/// Read-only roster lookup keyed by participant id.
pub trait RosterLookup {
    /// Grades for the given ids; unknown ids are omitted from the map.
    fn grades_for(&self, ids: &[ParticipantId]) -> RepoResult<HashMap<ParticipantId, Grade>>;

    /// Display names for the given ids; unknown ids are omitted from the map.
    fn display_names(&self, ids: &[ParticipantId]) -> RepoResult<HashMap<ParticipantId, String>>;
}

/// SQLite-backed roster lookup.
pub struct SqliteRosterLookup<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRosterLookup<'conn> {
    /// Creates a lookup over a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "participants", PARTICIPANT_COLUMNS)?;
        Ok(Self { conn })
    }

    fn select_rows<T>(
        &self,
        column: &str,
        ids: &[ParticipantId],
        mut parse: impl FnMut(ParticipantId, String) -> RepoResult<T>,
    ) -> RepoResult<HashMap<ParticipantId, T>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT id, {column} FROM participants WHERE id IN ({placeholders});");
        let mut stmt = self.conn.prepare(&sql)?;
        let bind_values = ids.iter().map(|id| Value::Integer(*id));
        let mut rows = stmt.query(params_from_iter(bind_values))?;

        let mut out = HashMap::new();
        while let Some(row) = rows.next()? {
            let id: ParticipantId = row.get(0)?;
            let value: String = row.get(1)?;
            out.insert(id, parse(id, value)?);
        }
        Ok(out)
    }
}

impl RosterLookup for SqliteRosterLookup<'_> {
    fn grades_for(&self, ids: &[ParticipantId]) -> RepoResult<HashMap<ParticipantId, Grade>> {
        self.select_rows("grade", ids, |id, letter| {
            parse_grade(&letter).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid grade `{letter}` for participant {id} in participants.grade"
                ))
            })
        })
    }

    fn display_names(&self, ids: &[ParticipantId]) -> RepoResult<HashMap<ParticipantId, String>> {
        self.select_rows("name", ids, |_, name| Ok(name))
    }
}
