//! Output-side views of an assigned roster: scores, totals, and text export

pub mod score;
pub mod summary;
pub mod text;

pub use score::{edge_value, finalize_scores, incoming_counts};
pub use summary::{GroupReport, RosterReport};
pub use text::assignment_text;
