//! Output
//!
//! World snapshots and threat indicator hints for external collaborators.

pub mod indicator;
pub mod snapshot;

pub use indicator::threat_indicator;
pub use snapshot::{generate_snapshot, write_snapshot};
