//! Document positions and closed spans.
//!
//! # Responsibility
//! - Address a single item as a (section, item) pair.
//! - Represent contiguous closed ranges of items across section boundaries.
//!
//! # Invariants
//! - Derived lexicographic ordering of `Position` is document order:
//!   section number first, item index second.
//! - Field declaration order must stay (section, item) for that derive to
//!   remain correct.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Address of one item in the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    /// Section number, dense and totally ordered.
    pub section: u32,
    /// 1-based item index within the section.
    pub item: u32,
}

impl Position {
    pub fn new(section: u32, item: u32) -> Self {
        Self { section, item }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.section, self.item)
    }
}

/// Closed, inclusive range of items under document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Whether the span addresses a single item.
    pub fn is_single_item(&self) -> bool {
        self.start == self.end
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
