//! Partition quality metrics (KPIs).
//!
//! Computes summary indicators from a finished partition.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Stage count | Number of stages opened |
//! | Depth | Max events active at one instant (lower bound on stages) |
//! | Optimal | Stage count equals depth |
//! | Makespan | Latest event end |
//! | Utilization | Busy time / span, per stage |
//!
//! # Reference
//! Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1

use serde::{Deserialize, Serialize};

use crate::models::{BoundaryPolicy, Event, Partition};
use crate::partitioning::depth;

/// Partition performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionKpi {
    /// Number of stages used.
    pub stage_count: usize,
    /// Number of events placed.
    pub event_count: usize,
    /// Depth of the placed events.
    pub depth: usize,
    /// Whether `stage_count == depth`.
    pub is_optimal: bool,
    /// Latest end across all events.
    pub makespan: i64,
    /// Busy time / span for each stage, in creation order (0.0..=1.0).
    pub utilization_by_stage: Vec<f64>,
    /// Mean of `utilization_by_stage` (0.0 when there are no stages).
    pub avg_utilization: f64,
    /// Largest number of events hosted by a single stage.
    pub max_stage_len: usize,
}

impl PartitionKpi {
    /// Computes KPIs for a partition.
    ///
    /// Depth is computed from the events in the partition itself, so the
    /// result is only meaningful for a partition that covers its input.
    pub fn calculate(partition: &Partition, policy: BoundaryPolicy) -> Self {
        let events: Vec<Event> = partition.events().cloned().collect();
        let depth = depth(&events, policy);

        let utilization_by_stage: Vec<f64> = partition
            .stages()
            .iter()
            .map(|s| {
                let span = s.span();
                if span <= 0 {
                    0.0
                } else {
                    s.busy_time() as f64 / span as f64
                }
            })
            .collect();

        let avg_utilization = if utilization_by_stage.is_empty() {
            0.0
        } else {
            utilization_by_stage.iter().sum::<f64>() / utilization_by_stage.len() as f64
        };

        Self {
            stage_count: partition.stage_count(),
            event_count: events.len(),
            depth,
            is_optimal: partition.stage_count() == depth,
            makespan: partition.makespan(),
            utilization_by_stage,
            avg_utilization,
            max_stage_len: partition.stage_sizes().into_iter().max().unwrap_or(0),
        }
    }
}

impl std::fmt::Display for PartitionKpi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} event(s) on {} stage(s), depth {}{}, makespan {}, avg utilization {:.1}%",
            self.event_count,
            self.stage_count,
            self.depth,
            if self.is_optimal { " (optimal)" } else { "" },
            self.makespan,
            self.avg_utilization * 100.0
        )
    }
}
