//! # rxcompare-core
//!
//! Cost resolution and comparison pipeline for rxcompare.
//!
//! This crate provides:
//! - The `DataStore` trait the pipeline reads reference tables through
//! - The cost resolver, pairing builder, trial questionnaire and ranking stage
//! - The `Comparator` that runs them in order for one request
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rxcompare_core::{Comparator, DataStore};
//! ```

pub mod comparator;
pub mod cost;
pub mod pairing;
pub mod rank;
pub mod recommend;
pub mod traits;
pub mod trial;

#[cfg(test)]
mod testing;

pub use comparator::Comparator;
pub use traits::DataStore;
