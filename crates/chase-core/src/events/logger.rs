//! Event Logger
//!
//! Append-only JSONL log of gameplay events.

use chase_events::{generate_event_id, LoggedEvent, SimEvent};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Writes one JSON object per line, each tagged with a sequential event ID.
///
/// A logger without a sink still numbers events, so IDs line up whether or
/// not the run is being recorded.
pub struct EventLogger {
    sink: Option<BufWriter<File>>,
    logged: u64,
}

impl EventLogger {
    /// Creates (or truncates) the log at `path`, making parent directories.
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "event log opened");
        Ok(Self {
            sink: Some(BufWriter::new(File::create(path)?)),
            logged: 0,
        })
    }

    /// Logger that only numbers events.
    pub fn null() -> Self {
        Self {
            sink: None,
            logged: 0,
        }
    }

    /// ID the next logged event will carry.
    pub fn peek_id(&self) -> String {
        generate_event_id(self.logged + 1)
    }

    pub fn event_count(&self) -> u64 {
        self.logged
    }

    pub fn log(&mut self, event: &SimEvent) -> std::io::Result<()> {
        let entry = LoggedEvent {
            event_id: self.peek_id(),
            event: event.clone(),
        };
        if let Some(sink) = self.sink.as_mut() {
            serde_json::to_writer(&mut *sink, &entry)?;
            sink.write_all(b"\n")?;
        }
        self.logged += 1;
        Ok(())
    }

    pub fn log_batch(&mut self, events: &[SimEvent]) -> std::io::Result<()> {
        events.iter().try_for_each(|event| self.log(event))
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        match self.sink.as_mut() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!(error = %e, "event log not flushed on drop");
        }
    }
}
