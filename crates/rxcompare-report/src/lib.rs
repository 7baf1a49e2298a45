//! # rxcompare-report
//!
//! Plain-text presentation of comparator output: money formatting, grid
//! tables, and renderings of each result type. Nothing here computes a
//! price; every number is taken from the comparator as-is.

pub mod money;
pub mod render;
pub mod table;

pub use money::{dollars, format_money};
pub use table::Table;

// ── Tests ─────────────────────────────────────────────────────────────────────
