use serde::{Deserialize, Serialize};

use crate::io::store::KvStore;
use crate::ops::ids::{IdKey, get_ids};

/// Step direction through an id list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    fn offset(self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Prev => -1,
        }
    }
}

/// What happens at the ends of the list.
///
/// The two source apps disagreed here, so the choice is explicit: session
/// config sets the default and callers may override per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NavPolicy {
    /// Stop at the ends and report the boundary
    Bounded,
    /// Cycle from the last id back to the first, and vice versa
    Wraparound,
}

impl NavPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            NavPolicy::Bounded => "bounded",
            NavPolicy::Wraparound => "wraparound",
        }
    }
}

/// Outcome of a navigation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The neighboring id
    To(String),
    /// Bounded policy only: no further id in that direction
    Boundary,
    /// The list is empty; neither policy has anywhere to go
    Empty,
}

impl Step {
    /// The target id, if the step moved
    pub fn id(&self) -> Option<&str> {
        match self {
            Step::To(id) => Some(id),
            Step::Boundary | Step::Empty => None,
        }
    }
}

/// Compute the neighbor of `current` in the list stored under `key`.
///
/// An unknown `current` is treated as index -1, so stepping forward from
/// it lands on the first id under both policies. Never panics; degenerate
/// inputs resolve to `Boundary` or `Empty`.
pub fn step(
    store: &dyn KvStore,
    current: &str,
    key: IdKey,
    direction: Direction,
    policy: NavPolicy,
) -> Step {
    let ids = get_ids(store, key);
    if ids.is_empty() {
        return Step::Empty;
    }

    let len = ids.len() as isize;
    let index = ids
        .iter()
        .position(|id| id == current)
        .map(|i| i as isize)
        .unwrap_or(-1);
    let target = index + direction.offset();

    let target = if (0..len).contains(&target) {
        target
    } else {
        match policy {
            NavPolicy::Bounded => return Step::Boundary,
            NavPolicy::Wraparound => {
                if direction == Direction::Next {
                    0
                } else {
                    len - 1
                }
            }
        }
    };

    Step::To(ids[target as usize].clone())
}
