//! Interval partitioning domain models.
//!
//! Provides the core data types for describing a set of time-bounded
//! events and the stages they are partitioned into.
//!
//! # Domain Mappings
//!
//! | u-stage | Festival | Conference | Compute |
//! |---------|----------|------------|---------|
//! | Event | Show | Talk | Job |
//! | Stage | Stage | Room | Worker |
//! | Partition | Line-up | Room plan | Allocation |

mod event;
mod partition;
mod stage;

pub use event::{BoundaryPolicy, Event};
pub use partition::{Partition, Violation, ViolationType};
pub use stage::Stage;
