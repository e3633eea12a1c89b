//! Greedy interval partitioning.
//!
//! Assigns events to the fewest stages such that no stage hosts two
//! overlapping events. Two interchangeable strategies are provided:
//!
//! | Strategy | Stage lookup | Complexity |
//! |----------|--------------|------------|
//! | [`HeapPartitioner`] | min-heap of (frontier, stage) | O(n log n) |
//! | [`LinearScanPartitioner`] | first-fit scan of every stage | O(n²) |
//!
//! Both consume events sorted by [`compare_events`] and open a new stage
//! only when every existing stage conflicts with the current event, which
//! makes the stage count equal to the [`depth`] of the input.
//!
//! # Usage
//!
//! ```
//! use u_stage::models::{BoundaryPolicy, Event};
//! use u_stage::partitioning::{HeapPartitioner, Partitioner};
//!
//! let events = vec![
//!     Event::new("A", 1, 3),
//!     Event::new("B", 2, 5),
//!     Event::new("C", 4, 6),
//! ];
//! let partition = HeapPartitioner::new(BoundaryPolicy::Inclusive).partition(&events);
//! assert_eq!(partition.stage_count(), 2);
//! ```
//!
//! # References
//!
//! - Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1 (Interval Partitioning)
//! - Golumbic (2004), "Algorithmic Graph Theory and Perfect Graphs", Ch. 8

mod heap;
mod scan;

pub use heap::HeapPartitioner;
pub use scan::LinearScanPartitioner;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Debug;

use crate::models::{BoundaryPolicy, Event, Partition};

/// A strategy turning chronologically sorted events into a partition.
///
/// Implementations are pure: they hold no state across calls and never
/// mutate their input, so one instance can serve concurrent callers.
pub trait Partitioner: Send + Sync + Debug {
    /// Strategy name (e.g., "heap", "linear-scan").
    fn name(&self) -> &'static str;

    /// Boundary convention used for overlap checks.
    fn policy(&self) -> BoundaryPolicy;

    /// Partitions events already ordered by [`compare_events`].
    ///
    /// Unsorted input still yields a conflict-free partition but the stage
    /// count is no longer guaranteed minimal.
    fn partition_sorted(&self, sorted: &[Event]) -> Partition;

    /// Sorts `events` and partitions them.
    fn partition(&self, events: &[Event]) -> Partition {
        self.partition_sorted(&sort_events(events))
    }
}

/// Orders events by start time, then by end time.
pub fn compare_events(a: &Event, b: &Event) -> Ordering {
    a.start.cmp(&b.start).then(a.end.cmp(&b.end))
}

/// Returns a copy of `events` ordered by [`compare_events`].
///
/// Events with equal start and end keep their input order.
pub fn sort_events(events: &[Event]) -> Vec<Event> {
    let mut sorted = events.to_vec();
    sorted.sort_by(compare_events);
    sorted
}

/// Whether `a` and `b` conflict under `policy`.
#[inline]
pub fn overlaps(a: &Event, b: &Event, policy: BoundaryPolicy) -> bool {
    a.overlaps(b, policy)
}

/// Maximum number of events active at a single instant.
///
/// Sweep over start/end points. At equal times an `Inclusive` sweep counts
/// starts before ends (a shared instant is occupied by both events), an
/// `Exclusive` sweep counts ends first.
pub fn depth(events: &[Event], policy: BoundaryPolicy) -> usize {
    // (time, rank, delta); lower rank is applied first at equal time.
    let (start_rank, end_rank) = match policy {
        BoundaryPolicy::Inclusive => (0u8, 1u8),
        BoundaryPolicy::Exclusive => (1u8, 0u8),
    };

    let mut points: Vec<(i64, u8, i64)> = Vec::with_capacity(events.len() * 2);
    for e in events {
        points.push((e.start, start_rank, 1));
        points.push((e.end, end_rank, -1));
    }
    points.sort_unstable();

    let mut active: i64 = 0;
    let mut max_active: i64 = 0;
    for (_, _, delta) in points {
        active += delta;
        max_active = max_active.max(active);
    }
    max_active as usize
}

/// Selectable partitioning strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// [`HeapPartitioner`].
    #[default]
    Heap,
    /// [`LinearScanPartitioner`].
    LinearScan,
}

impl Strategy {
    /// All strategies, preferred first.
    pub const ALL: [Strategy; 2] = [Strategy::Heap, Strategy::LinearScan];

    /// Builds the partitioner for this strategy.
    pub fn partitioner(self, policy: BoundaryPolicy) -> Box<dyn Partitioner> {
        match self {
            Self::Heap => Box::new(HeapPartitioner::new(policy)),
            Self::LinearScan => Box::new(LinearScanPartitioner::new(policy)),
        }
    }

    /// Strategy name as used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Heap => "heap",
            Self::LinearScan => "linear-scan",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heap" | "priority-queue" | "pq" => Ok(Self::Heap),
            "scan" | "linear-scan" | "nested-loops" => Ok(Self::LinearScan),
            other => Err(format!("unknown strategy '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_start_then_end() {
        let events = vec![
            Event::new("X", 0, 5),
            Event::new("late", 7, 8),
            Event::new("Y", 0, 3),
            Event::new("mid", 2, 9),
        ];
        let sorted = sort_events(&events);
        let labels: Vec<&str> = sorted.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Y", "X", "mid", "late"]);
        // Input untouched.
        assert_eq!(events[0].label, "X");
    }

    #[test]
    fn test_sort_keeps_order_of_equal_keys() {
        let events = vec![Event::new("first", 1, 2), Event::new("second", 1, 2)];
        let sorted = sort_events(&events);
        assert_eq!(sorted[0].label, "first");
        assert_eq!(sorted[1].label, "second");
    }

    #[test]
    fn test_compare_events() {
        let a = Event::new("a", 1, 4);
        let b = Event::new("b", 1, 5);
        let c = Event::new("c", 0, 9);
        assert_eq!(compare_events(&a, &b), Ordering::Less);
        assert_eq!(compare_events(&b, &c), Ordering::Greater);
        assert_eq!(compare_events(&a, &Event::new("z", 1, 4)), Ordering::Equal);
    }

    #[test]
    fn test_overlaps_symmetric() {
        let a = Event::new("a", 0, 4);
        let b = Event::new("b", 4, 6);
        for policy in [BoundaryPolicy::Inclusive, BoundaryPolicy::Exclusive] {
            assert_eq!(overlaps(&a, &b, policy), overlaps(&b, &a, policy));
        }
    }

    #[test]
    fn test_depth_empty() {
        assert_eq!(depth(&[], BoundaryPolicy::Inclusive), 0);
    }

    #[test]
    fn test_depth_scenarios() {
        let a = vec![
            Event::new("A", 1, 3),
            Event::new("B", 2, 5),
            Event::new("C", 4, 6),
        ];
        assert_eq!(depth(&a, BoundaryPolicy::Inclusive), 2);

        let b: Vec<Event> = ["P", "Q", "R"].iter().map(|l| Event::new(*l, 0, 10)).collect();
        assert_eq!(depth(&b, BoundaryPolicy::Exclusive), 3);
    }

    #[test]
    fn test_depth_boundary() {
        let chain = vec![Event::new("a", 0, 2), Event::new("b", 2, 4), Event::new("c", 4, 6)];
        assert_eq!(depth(&chain, BoundaryPolicy::Inclusive), 2);
        assert_eq!(depth(&chain, BoundaryPolicy::Exclusive), 1);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("heap".parse::<Strategy>().unwrap(), Strategy::Heap);
        assert_eq!("priority-queue".parse::<Strategy>().unwrap(), Strategy::Heap);
        assert_eq!("Linear-Scan".parse::<Strategy>().unwrap(), Strategy::LinearScan);
        assert_eq!("nested-loops".parse::<Strategy>().unwrap(), Strategy::LinearScan);
        assert!("random".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_partitioner() {
        for strategy in Strategy::ALL {
            let p = strategy.partitioner(BoundaryPolicy::Exclusive);
            assert_eq!(p.name(), strategy.name());
            assert_eq!(p.policy(), BoundaryPolicy::Exclusive);
        }
    }

    #[test]
    fn test_strategy_serde() {
        let json = serde_json::to_string(&Strategy::LinearScan).unwrap();
        assert_eq!(json, "\"linear-scan\"");
        let s: Strategy = serde_json::from_str("\"heap\"").unwrap();
        assert_eq!(s, Strategy::Heap);
    }
}
