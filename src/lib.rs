//! Interval partitioning for the U-Engine ecosystem.
//!
//! Assigns time-bounded events ("shows") to the minimum number of parallel
//! resources ("stages") such that no stage hosts two overlapping events.
//! This is the classical interval-partitioning (interval-graph coloring)
//! problem; the greedy strategies here always use exactly as many stages
//! as the input's depth.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Event`, `Stage`, `Partition`, `BoundaryPolicy`
//! - **`partitioning`**: Event ordering, the `Partitioner` trait, heap and
//!   linear-scan strategies, depth computation
//! - **`validation`**: Input integrity checks (interval length, labels)
//! - **`input`**: Text and JSON event list readers
//! - **`kpi`**: Partition quality metrics
//! - **`generator`**: Seeded random event lists
//! - **`config`**: Strategy/boundary selection and the `plan` entry point
//!
//! # Example
//!
//! ```
//! use u_stage::config::{plan, PlannerConfig};
//! use u_stage::models::Event;
//!
//! let events = vec![
//!     Event::new("A", 1, 3),
//!     Event::new("B", 2, 5),
//!     Event::new("C", 4, 6),
//! ];
//! let partition = plan(&events, &PlannerConfig::default());
//! assert_eq!(partition.stage_count(), 2);
//! assert_eq!(partition.stage(0).unwrap().labels(), vec!["A", "C"]);
//! ```
//!
//! # References
//!
//! - Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1
//! - Golumbic (2004), "Algorithmic Graph Theory and Perfect Graphs"

pub mod config;
pub mod generator;
pub mod input;
pub mod kpi;
pub mod models;
pub mod partitioning;
pub mod validation;
