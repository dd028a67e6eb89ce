//! Allocation engine services.
//!
//! # Responsibility
//! - Pure workload computation stages: quota, per-participant lines,
//!   contiguous range assignment.
//! - Orchestrate repository reads into one allocation call.
//! - Shape the human-readable report from a raw allocation.

pub mod allocation_service;
pub mod lines;
pub mod quota;
pub mod ranges;
pub mod report;
