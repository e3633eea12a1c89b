//! Partition (solution) model.
//!
//! A partition is the complete assignment of events to stages. Stage order
//! is creation order. The model can check itself against the input it was
//! built from and report violations, which is how tests assert that a
//! partitioner neither loses nor duplicates events and never double-books
//! a stage.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{BoundaryPolicy, Event, Stage};

/// An ordered sequence of stages covering every input event exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Stages in creation order.
    pub stages: Vec<Stage>,
}

/// A broken partition invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Stage index the violation was found on, if any.
    pub stage: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Classification of partition violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two events on the same stage overlap.
    Overlap,
    /// An input event is absent from every stage.
    MissingEvent,
    /// An event appears more often than in the input.
    DuplicateEvent,
    /// A stage was created without any event.
    EmptyStage,
}

impl Violation {
    fn overlap(stage: usize, a: &Event, b: &Event) -> Self {
        Self {
            violation_type: ViolationType::Overlap,
            stage: Some(stage),
            message: format!("'{a}' overlaps '{b}'"),
        }
    }

    fn missing(event: &Event) -> Self {
        Self {
            violation_type: ViolationType::MissingEvent,
            stage: None,
            message: format!("'{event}' is not assigned to any stage"),
        }
    }

    fn duplicate(event: &Event) -> Self {
        Self {
            violation_type: ViolationType::DuplicateEvent,
            stage: None,
            message: format!("'{event}' is assigned more often than it appears in the input"),
        }
    }

    fn empty_stage(stage: usize) -> Self {
        Self {
            violation_type: ViolationType::EmptyStage,
            stage: Some(stage),
            message: format!("stage {} hosts no events", stage + 1),
        }
    }
}

impl Partition {
    /// Creates an empty partition (zero stages).
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new stage holding `event` and returns its index.
    pub fn open_stage(&mut self, event: Event) -> usize {
        let index = self.stages.len();
        self.stages.push(Stage::with_event(index, event));
        index
    }

    /// Appends `event` to the stage at `index`.
    ///
    /// # Panics
    /// If `index` does not name an existing stage.
    pub fn assign(&mut self, index: usize, event: Event) {
        self.stages[index].push(event);
    }

    /// Number of stages.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Total number of assigned events.
    pub fn event_count(&self) -> usize {
        self.stages.iter().map(Stage::len).sum()
    }

    /// Whether there are no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stages in creation order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Stage at the given creation index.
    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    /// Index of the first stage hosting an event with this label.
    pub fn stage_of(&self, label: &str) -> Option<usize> {
        self.stages
            .iter()
            .find(|s| s.iter().any(|e| e.label == label))
            .map(|s| s.index)
    }

    /// Iterates over every assigned event, stage by stage.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.stages.iter().flat_map(|s| s.iter())
    }

    /// Latest end across all stages (0 if empty).
    pub fn makespan(&self) -> i64 {
        self.events().map(|e| e.end).max().unwrap_or(0)
    }

    /// Checks the partition against the `input` it was computed from.
    ///
    /// Reports every pair of overlapping events on a stage, one violation per
    /// dropped copy of an input event, and one per extra copy of an event
    /// assigned more times than it occurs in the input. Events compare by
    /// label, start and end.
    pub fn violations(&self, input: &[Event], policy: BoundaryPolicy) -> Vec<Violation> {
        let mut violations = Vec::new();

        for stage in &self.stages {
            if stage.is_empty() {
                violations.push(Violation::empty_stage(stage.index));
            }
            for (i, a) in stage.events.iter().enumerate() {
                for b in &stage.events[i + 1..] {
                    if a.overlaps(b, policy) {
                        violations.push(Violation::overlap(stage.index, a, b));
                    }
                }
            }
        }

        // Multiset difference between input and assigned events.
        let mut balance: HashMap<&Event, i64> = HashMap::new();
        for event in input {
            *balance.entry(event).or_insert(0) += 1;
        }
        for event in self.events() {
            *balance.entry(event).or_insert(0) -= 1;
        }

        let mut missing: Vec<(&Event, i64)> = balance.into_iter().filter(|(_, n)| *n != 0).collect();
        missing.sort_by(|a, b| {
            crate::partitioning::compare_events(a.0, b.0).then_with(|| a.0.label.cmp(&b.0.label))
        });
        for (event, n) in missing {
            for _ in 0..n.unsigned_abs() {
                if n > 0 {
                    violations.push(Violation::missing(event));
                } else {
                    violations.push(Violation::duplicate(event));
                }
            }
        }

        violations
    }

    /// Whether the partition is a valid solution for `input`.
    pub fn is_valid_for(&self, input: &[Event], policy: BoundaryPolicy) -> bool {
        self.violations(input, policy).is_empty()
    }

    /// Stage sizes in creation order.
    pub fn stage_sizes(&self) -> Vec<usize> {
        self.stages.iter().map(Stage::len).collect()
    }
}

impl std::fmt::Display for Partition {
    /// One line per stage: `Stage 1 : A :(1 - 3) --> C :(4 - 6) -->  END`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stage in &self.stages {
            writeln!(f, "{stage}")?;
        }
        Ok(())
    }
}
