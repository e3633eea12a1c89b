//! First-fit linear scan partitioner.
//!
//! # Algorithm
//!
//! For each event in sorted order, walk the stages in creation order and
//! place the event on the first stage none of whose events it overlaps.
//! Open a new stage when no stage accepts it.
//!
//! Every hosted event is checked rather than only the frontier, so this
//! strategy shares no shortcut with [`super::HeapPartitioner`] and serves
//! as an independent cross-check of it.
//!
//! # Complexity
//! O(n²) for n events.

use super::Partitioner;
use crate::models::{BoundaryPolicy, Event, Partition};

/// Greedy first-fit partitioner scanning every stage.
///
/// Reference strategy; produces the same stage count as
/// [`super::HeapPartitioner`] for any input.
#[derive(Debug, Clone, Default)]
pub struct LinearScanPartitioner {
    policy: BoundaryPolicy,
}

impl LinearScanPartitioner {
    /// Creates a linear scan partitioner with the given boundary convention.
    pub fn new(policy: BoundaryPolicy) -> Self {
        Self { policy }
    }
}

impl Partitioner for LinearScanPartitioner {
    fn name(&self) -> &'static str {
        "linear-scan"
    }

    fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    fn partition_sorted(&self, sorted: &[Event]) -> Partition {
        let mut partition = Partition::new();

        for event in sorted {
            let fit = partition
                .stages()
                .iter()
                .position(|stage| stage.accepts(event, self.policy));

            let stage = match fit {
                Some(stage) => {
                    partition.assign(stage, event.clone());
                    stage
                }
                None => partition.open_stage(event.clone()),
            };
            tracing::trace!(event = %event.label, stage, "assigned");
        }

        tracing::debug!(
            events = sorted.len(),
            stages = partition.stage_count(),
            policy = %self.policy,
            "linear-scan partitioning complete"
        );
        partition
    }
}
