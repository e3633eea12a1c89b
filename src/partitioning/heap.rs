//! Priority-queue partitioner.
//!
//! # Algorithm
//!
//! 1. Keep a min-heap of [`StageFrontier`] records, one per stage, ordered
//!    by (frontier ascending, stage index ascending).
//! 2. For each event in sorted order, peek the heap top. If the event fits
//!    after that frontier, append it to that stage and replace the record
//!    with the event's end. No other stage can fit it where the top cannot.
//! 3. Otherwise open a new stage and push its record.
//!
//! The stage-index tie-break prefers the earliest-created stage when two
//! stages free up at the same instant, so output is reproducible.
//!
//! # Complexity
//! O(n log n) for n events (heap size never exceeds the stage count).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::Partitioner;
use crate::models::{BoundaryPolicy, Event, Partition};

/// Transient (frontier, stage) pairing kept in the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StageFrontier {
    frontier: i64,
    stage: usize,
}

impl Ord for StageFrontier {
    // Reversed so `BinaryHeap` (a max-heap) yields the smallest record.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .frontier
            .cmp(&self.frontier)
            .then_with(|| other.stage.cmp(&self.stage))
    }
}

impl PartialOrd for StageFrontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Greedy partitioner backed by a binary heap of stage frontiers.
///
/// Preferred strategy.
///
/// # Example
/// ```
/// use u_stage::models::{BoundaryPolicy, Event};
/// use u_stage::partitioning::{HeapPartitioner, Partitioner};
///
/// let events = vec![Event::new("X", 0, 5), Event::new("Y", 0, 3)];
/// let partition = HeapPartitioner::default().partition(&events);
/// assert_eq!(partition.stage(0).unwrap().labels(), vec!["Y"]);
/// assert_eq!(partition.stage(1).unwrap().labels(), vec!["X"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeapPartitioner {
    policy: BoundaryPolicy,
}

impl HeapPartitioner {
    /// Creates a heap partitioner with the given boundary convention.
    pub fn new(policy: BoundaryPolicy) -> Self {
        Self { policy }
    }
}

impl Partitioner for HeapPartitioner {
    fn name(&self) -> &'static str {
        "heap"
    }

    fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    fn partition_sorted(&self, sorted: &[Event]) -> Partition {
        let mut partition = Partition::new();
        let mut frontiers: BinaryHeap<StageFrontier> = BinaryHeap::new();

        for event in sorted {
            let reusable = frontiers
                .peek()
                .filter(|top| self.policy.fits_after(top.frontier, event.start))
                .map(|top| top.stage);

            let stage = match reusable {
                Some(stage) => {
                    frontiers.pop();
                    partition.assign(stage, event.clone());
                    stage
                }
                None => partition.open_stage(event.clone()),
            };

            tracing::trace!(event = %event.label, stage, "assigned");
            frontiers.push(StageFrontier {
                frontier: event.end,
                stage,
            });
        }

        tracing::debug!(
            events = sorted.len(),
            stages = partition.stage_count(),
            policy = %self.policy,
            "heap partitioning complete"
        );
        partition
    }
}
