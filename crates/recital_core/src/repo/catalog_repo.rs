//! Section/item length catalog contracts and SQLite implementation.
//!
//! # Responsibility
//! - Resolve section names to numbered records and ordered section ranges.
//! - Stream the (section, item, length) triples covering a span in
//!   document order.
//! - Sum span lengths without double counting across section boundaries.
//!
//! # Invariants
//! - Every query is fresh and restartable; no cursor state is shared
//!   between calls.
//! - Streams are ordered by `(section_num, item_num)` ascending.
//! - Boundary sections contribute only their in-span sub-range; interior
//!   sections contribute every item exactly once.

use crate::model::span::{Position, Span};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;

const SECTION_COLUMNS: &[&str] = &["section_num", "section_name", "item_count"];
const ITEM_COLUMNS: &[&str] = &["section_num", "item_num", "item_length"];

/// Catalog row describing one named section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRecord {
    pub number: u32,
    pub name: String,
    pub item_count: u32,
}

/// Catalog row describing one item and its recitation length in lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub section: u32,
    pub item: u32,
    pub length: u64,
}

impl CatalogItem {
    pub fn position(&self) -> Position {
        Position::new(self.section, self.item)
    }
}

/// Read-only lookup over the section/item length reference tables.
pub trait CatalogIndex {
    /// Resolves a section by its unique name.
    fn resolve_section(&self, name: &str) -> RepoResult<SectionRecord>;

    /// Lists section numbers between two named sections, inclusive and
    /// ascending. Fails with `InvalidRange` when the boundaries are
    /// reversed in document order.
    fn section_range(&self, from_name: &str, to_name: &str) -> RepoResult<Vec<u32>>;

    /// Bulk section-number to section-name map for presentation.
    fn section_names(&self) -> RepoResult<HashMap<u32, String>>;

    /// Ordered item stream covering exactly the closed span.
    fn stream_items(&self, span: Span) -> RepoResult<Vec<CatalogItem>>;

    /// Total line count over the closed span.
    fn total_length(&self, span: Span) -> RepoResult<u64>;
}

/// SQLite-backed catalog index.
pub struct SqliteCatalogIndex<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogIndex<'conn> {
    /// Creates an index over a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "sections", SECTION_COLUMNS)?;
        ensure_connection_ready(conn, "section_items", ITEM_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CatalogIndex for SqliteCatalogIndex<'_> {
    fn resolve_section(&self, name: &str) -> RepoResult<SectionRecord> {
        let record = self
            .conn
            .query_row(
                "SELECT section_num, section_name, item_count
                 FROM sections
                 WHERE section_name = ?1;",
                [name],
                parse_section_row,
            )
            .optional()?;

        record.ok_or_else(|| RepoError::SectionNotFound(name.to_string()))
    }

    fn section_range(&self, from_name: &str, to_name: &str) -> RepoResult<Vec<u32>> {
        let from = self.resolve_section(from_name)?;
        let to = self.resolve_section(to_name)?;
        if from.number > to.number {
            return Err(RepoError::InvalidRange {
                from: from.number,
                to: to.number,
            });
        }

        let mut stmt = self.conn.prepare(
            "SELECT section_num
             FROM sections
             WHERE section_num BETWEEN ?1 AND ?2
             ORDER BY section_num ASC;",
        )?;
        let mut rows = stmt.query(params![from.number, to.number])?;
        let mut numbers = Vec::new();
        while let Some(row) = rows.next()? {
            numbers.push(row.get::<_, u32>(0)?);
        }
        Ok(numbers)
    }

    fn section_names(&self) -> RepoResult<HashMap<u32, String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT section_num, section_name FROM sections;")?;
        let mut rows = stmt.query([])?;
        let mut names = HashMap::new();
        while let Some(row) = rows.next()? {
            names.insert(row.get::<_, u32>(0)?, row.get::<_, String>(1)?);
        }
        Ok(names)
    }

    fn stream_items(&self, span: Span) -> RepoResult<Vec<CatalogItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT section_num, item_num, item_length
             FROM section_items
             WHERE (section_num > ?1 OR (section_num = ?1 AND item_num >= ?2))
               AND (section_num < ?3 OR (section_num = ?3 AND item_num <= ?4))
             ORDER BY section_num ASC, item_num ASC;",
        )?;
        let mut rows = stmt.query(params![
            span.start.section,
            span.start.item,
            span.end.section,
            span.end.item
        ])?;

        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn total_length(&self, span: Span) -> RepoResult<u64> {
        if span.start.section == span.end.section {
            let total = self.sum_lengths(
                "SELECT COALESCE(SUM(item_length), 0)
                 FROM section_items
                 WHERE section_num = ?1 AND item_num BETWEEN ?2 AND ?3;",
                params![span.start.section, span.start.item, span.end.item],
            )?;
            return Ok(total);
        }

        // Cross-section: from-section tail, fully-interior sections, and
        // to-section head, each summed exactly once.
        let tail = self.sum_lengths(
            "SELECT COALESCE(SUM(item_length), 0)
             FROM section_items
             WHERE section_num = ?1 AND item_num >= ?2;",
            params![span.start.section, span.start.item],
        )?;
        let interior = self.sum_lengths(
            "SELECT COALESCE(SUM(item_length), 0)
             FROM section_items
             WHERE section_num > ?1 AND section_num < ?2;",
            params![span.start.section, span.end.section],
        )?;
        let head = self.sum_lengths(
            "SELECT COALESCE(SUM(item_length), 0)
             FROM section_items
             WHERE section_num = ?1 AND item_num <= ?2;",
            params![span.end.section, span.end.item],
        )?;

        Ok(tail + interior + head)
    }
}

impl SqliteCatalogIndex<'_> {
    fn sum_lengths(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<u64> {
        let total: i64 = self.conn.query_row(sql, params, |row| row.get(0))?;
        u64::try_from(total).map_err(|_| {
            RepoError::InvalidData(format!("negative length sum `{total}` in section_items"))
        })
    }
}

fn parse_section_row(row: &Row<'_>) -> rusqlite::Result<SectionRecord> {
    Ok(SectionRecord {
        number: row.get("section_num")?,
        name: row.get("section_name")?,
        item_count: row.get("item_count")?,
    })
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<CatalogItem> {
    let section: u32 = row.get("section_num")?;
    let item: u32 = row.get("item_num")?;
    let length: i64 = row.get("item_length")?;
    if length <= 0 {
        return Err(RepoError::InvalidData(format!(
            "non-positive item_length `{length}` for item {section}:{item}"
        )));
    }
    Ok(CatalogItem {
        section,
        item,
        length: length as u64,
    })
}
