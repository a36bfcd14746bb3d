//! Event recording.
//!
//! Systems push gameplay events into [`TickEvents`]; the driver drains them
//! once per tick and callers may persist them with an [`EventLogger`].

use bevy_ecs::prelude::*;
use chase_events::{EventKind, SimEvent, SimTimestamp};

pub mod logger;

pub use logger::EventLogger;

/// Resource: events produced during the current tick
#[derive(Resource, Debug, Default)]
pub struct TickEvents {
    events: Vec<SimEvent>,
}

impl TickEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, timestamp: SimTimestamp, kind: EventKind) {
        self.events.push(SimEvent::new(timestamp, kind));
    }

    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_events_drain() {
        let mut events = TickEvents::new();
        assert!(events.is_empty());

        events.push(SimTimestamp::new(1, 0.02), EventKind::SessionPaused);
        events.push(SimTimestamp::new(1, 0.02), EventKind::SessionResumed);
        assert_eq!(events.len(), 2);
        assert_eq!(events.iter().next().unwrap().kind, EventKind::SessionPaused);

        let drained = events.drain();
        assert_eq!(drained.len(), 2);
        assert!(events.is_empty());
    }
}
