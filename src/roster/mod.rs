//! Roster normalization: canonical status, confidence, and capacities

pub mod capacity;
pub mod status;

pub use capacity::{capacity_derived_cap, effective_marches, incoming_cap, IncomingCapPolicy};
pub use status::{normalize_status, resolve_confidence};
