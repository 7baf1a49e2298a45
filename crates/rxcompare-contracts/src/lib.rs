//! # rxcompare-contracts
//!
//! Shared record types, pairing contracts, and errors for the rxcompare
//! workspace.
//!
//! All crates in the workspace import from here. No pricing logic lives in
//! this crate. It holds data definitions, coerce helpers and error types.

pub mod coerce;
pub mod coverage;
pub mod error;
pub mod medicine;
pub mod pairing;
pub mod request;
pub mod settings;
pub mod view;
