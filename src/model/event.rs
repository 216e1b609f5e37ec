//! Timed events: consultations and other appointments keyed by (name, time).

use std::fmt;

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::ModelError;
use super::field::Name;

/// Format used to read and print event times.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// An appointment with a name at a civil date and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub name: Name,
    pub time: DateTime,
}

impl TimedEvent {
    /// Same name (ignoring case) at the same time.
    pub fn is_same_event(&self, name: &Name, time: DateTime) -> bool {
        self.name.eq_ignore_case(name) && self.time == time
    }
}

impl fmt::Display for TimedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.name, self.time.strftime(TIME_FORMAT))
    }
}

/// Events ordered by time, unique on (name, time).
#[derive(Debug, Clone, Default)]
pub struct EventBook {
    events: Vec<TimedEvent>,
}

impl EventBook {
    /// Builds a book from a snapshot, rejecting duplicates.
    pub fn from_events(events: Vec<TimedEvent>) -> Result<Self, ModelError> {
        let mut book = Self::default();
        for event in events {
            book.add(event)?;
        }
        Ok(book)
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    pub fn contains(&self, name: &Name, time: DateTime) -> bool {
        self.events.iter().any(|e| e.is_same_event(name, time))
    }

    /// Inserts `event`, keeping time order. Events at the same time keep insertion order.
    pub fn add(&mut self, event: TimedEvent) -> Result<(), ModelError> {
        if self.contains(&event.name, event.time) {
            return Err(ModelError::DuplicateTimedEvent(event.to_string()));
        }
        let at = self.events.partition_point(|e| e.time <= event.time);
        self.events.insert(at, event);
        Ok(())
    }

    /// Removes and returns the event for (name, time).
    pub fn remove(&mut self, name: &Name, time: DateTime) -> Result<TimedEvent, ModelError> {
        let Some(pos) = self.events.iter().position(|e| e.is_same_event(name, time)) else {
            return Err(ModelError::TimedEventNotFound(format!(
                "{name} at {}",
                time.strftime(TIME_FORMAT)
            )));
        };
        Ok(self.events.remove(pos))
    }
}
