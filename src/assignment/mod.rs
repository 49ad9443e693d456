//! Shared assignment primitives used by every strategy

pub mod farms;
pub mod ledger;
pub mod order;
pub mod snapshot;

pub use farms::assign_farm_priority;
pub use ledger::Ledger;
pub use order::SourceOrder;
pub use snapshot::Snapshot;
