//! Event (show) model.
//!
//! An event is the smallest schedulable unit: a labelled time interval that
//! must be hosted by exactly one stage.
//!
//! # Time Representation
//! Times are discrete integer ticks. The consumer defines what a tick means
//! (minutes since doors open, seconds since midnight, ...). Whether the end
//! tick is part of the event is decided by [`BoundaryPolicy`].

use serde::{Deserialize, Serialize};

/// A time-bounded event to be placed on a stage.
///
/// Events are immutable once created; partitioners copy them into the
/// stage that hosts them and never alter `start` or `end`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// Identifier shown in the rendered planning.
    pub label: String,
    /// First tick of the event.
    pub start: i64,
    /// Last tick of the event (see [`BoundaryPolicy`]).
    pub end: i64,
}

impl Event {
    /// Creates a new event.
    pub fn new(label: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }

    /// Length of the event in ticks (`end - start`).
    ///
    /// Widened to `i128` so events spanning the whole `i64` range still fit.
    #[inline]
    pub fn duration(&self) -> i128 {
        i128::from(self.end) - i128::from(self.start)
    }

    /// Whether `start < end`.
    ///
    /// Zero or negative length events are rejected at the input boundary.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Whether this event conflicts with `other` under `policy`.
    #[inline]
    pub fn overlaps(&self, other: &Event, policy: BoundaryPolicy) -> bool {
        policy.overlaps(self.start, self.end, other.start, other.end)
    }
}

/// How a shared boundary instant between two events is treated.
///
/// | Policy | Interval | `[1,3]` vs `[3,5]` | Stage fits when |
/// |--------|----------|--------------------|-----------------|
/// | `Inclusive` | closed `[start, end]` | conflict | `start > frontier` |
/// | `Exclusive` | half-open `[start, end)` | no conflict | `start >= frontier` |
///
/// Every partitioner and the depth computation take the same policy, so
/// stage counts agree with each other and with the interval depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// A show ending at `t` and one starting at `t` need different stages.
    #[default]
    Inclusive,
    /// A show may start on the tick the previous one ends.
    Exclusive,
}

impl BoundaryPolicy {
    /// Overlap predicate for `[a_start, a_end]` and `[b_start, b_end]`.
    ///
    /// Total and symmetric in its two intervals.
    #[inline]
    pub fn overlaps(self, a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
        match self {
            Self::Inclusive => !(a_end < b_start || b_end < a_start),
            Self::Exclusive => !(a_end <= b_start || b_end <= a_start),
        }
    }

    /// Whether an event starting at `start` can follow a stage whose
    /// last event ends at `frontier`.
    ///
    /// Special case of [`overlaps`](Self::overlaps) for chronologically
    /// sorted input, where the stage's events all start no later than `start`.
    #[inline]
    pub fn fits_after(self, frontier: i64, start: i64) -> bool {
        match self {
            Self::Inclusive => start > frontier,
            Self::Exclusive => start >= frontier,
        }
    }

    /// Policy name as used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Inclusive => "inclusive",
            Self::Exclusive => "exclusive",
        }
    }
}

impl std::fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BoundaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inclusive" | "closed" => Ok(Self::Inclusive),
            "exclusive" | "half-open" => Ok(Self::Exclusive),
            other => Err(format!("unknown boundary policy '{other}'")),
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :({} - {})", self.label, self.start, self.end)
    }
}
