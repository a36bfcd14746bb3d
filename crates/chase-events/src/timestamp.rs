//! Simulation Timestamp Types
//!
//! Simulation time is a tick counter plus the elapsed session time in seconds.
//! Ticks may have variable length, so both are carried.
//!
//! # Example
//!
//! ```
//! use chase_events::SimTimestamp;
//!
//! let ts = SimTimestamp::new(120, 2.4);
//! assert_eq!(ts.tick, 120);
//! assert_eq!(ts.to_string(), "tick_120@2.400s");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimTimestamp {
    /// Number of ticks advanced since the session started
    pub tick: u64,
    /// Seconds of simulated time since the session started
    pub elapsed: f32,
}

impl SimTimestamp {
    /// Creates a new timestamp.
    pub fn new(tick: u64, elapsed: f32) -> Self {
        Self { tick, elapsed }
    }

    /// The timestamp of a freshly started session.
    pub fn start() -> Self {
        Self::default()
    }
}

impl fmt::Display for SimTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick_{}@{:.3}s", self.tick, self.elapsed)
    }
}
