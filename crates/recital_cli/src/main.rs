//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `recital_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("recital_core ping={}", recital_core::ping());
    println!("recital_core version={}", recital_core::core_version());
}
