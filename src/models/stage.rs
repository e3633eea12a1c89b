//! Stage (resource) model.
//!
//! A stage hosts one event at a time. Events are appended in the order
//! they are assigned and never removed or moved.

use serde::{Deserialize, Serialize};

use super::{BoundaryPolicy, Event};

/// An ordered sequence of events sharing one resource.
///
/// With chronologically sorted input the events are non-decreasing by start
/// time, so the last event also has the latest end (the stage's frontier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Creation index (0 = first stage opened).
    pub index: usize,
    /// Events in assignment order.
    pub events: Vec<Event>,
}

impl Stage {
    /// Creates an empty stage.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            events: Vec::new(),
        }
    }

    /// Creates a stage holding a single event.
    pub fn with_event(index: usize, event: Event) -> Self {
        Self {
            index,
            events: vec![event],
        }
    }

    /// Appends an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// End time of the most recently assigned event.
    pub fn frontier(&self) -> Option<i64> {
        self.events.last().map(|e| e.end)
    }

    /// Whether `event` conflicts with none of the events on this stage.
    ///
    /// Checks every hosted event, not only the frontier.
    pub fn accepts(&self, event: &Event, policy: BoundaryPolicy) -> bool {
        self.events.iter().all(|e| !e.overlaps(event, policy))
    }

    /// Sum of event durations.
    pub fn busy_time(&self) -> i128 {
        self.events.iter().map(Event::duration).sum()
    }

    /// Ticks between the first start and the latest end.
    pub fn span(&self) -> i128 {
        let first = self.events.iter().map(|e| e.start).min();
        let last = self.events.iter().map(|e| e.end).max();
        match (first, last) {
            (Some(s), Some(e)) => i128::from(e) - i128::from(s),
            _ => 0,
        }
    }

    /// Number of hosted events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the stage hosts no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates over hosted events in assignment order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Labels in assignment order.
    pub fn labels(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.label.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Stage {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stage {} : ", self.index + 1)?;
        for event in &self.events {
            write!(f, "{event} --> ")?;
        }
        f.write_str(" END")
    }
}
