use crate::aspect::{catalog, FieldDef};
use crate::completion::FieldValue;
use crate::video::Video;
use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Completed/total pair over a group of fields. Always recomputed from the
/// current field values; never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tasks {
    pub completed: usize,
    pub total: usize,
}

impl Tasks {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    pub fn is_done(&self) -> bool {
        self.completed == self.total
    }

    /// Whole-number percentage, 0 for an empty group.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.completed * 100 / self.total
        }
    }
}

impl std::ops::Add for Tasks {
    type Output = Tasks;

    fn add(self, other: Tasks) -> Tasks {
        Tasks::new(self.completed + other.completed, self.total + other.total)
    }
}

impl std::iter::Sum for Tasks {
    fn sum<I: Iterator<Item = Tasks>>(iter: I) -> Tasks {
        iter.fold(Tasks::default(), |acc, t| acc + t)
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Count the fields of a group and how many satisfy their criterion.
pub fn aggregate(fields: &[FieldDef], item: &Video) -> Tasks {
    Tasks::new(
        fields.iter().filter(|f| f.is_complete(item)).count(),
        fields.len(),
    )
}

/// Untyped counting over raw values using the generic filled rule.
pub fn count(values: &[FieldValue]) -> Tasks {
    Tasks::new(values.iter().filter(|v| v.is_filled()).count(), values.len())
}

// ---------------------------------------------------------------------------
// VideoProgress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GroupProgress {
    pub key: &'static str,
    pub title: &'static str,
    #[serde(flatten)]
    pub tasks: Tasks,
}

/// Per-aspect progress plus the overall sum for one video.
#[derive(Debug, Clone, Serialize)]
pub struct VideoProgress {
    pub groups: Vec<GroupProgress>,
    pub overall: Tasks,
}

impl VideoProgress {
    pub fn of(item: &Video) -> Self {
        let groups: Vec<GroupProgress> = catalog()
            .iter()
            .map(|a| GroupProgress {
                key: a.key,
                title: a.title,
                tasks: a.progress(item),
            })
            .collect();
        let overall = groups.iter().map(|g| g.tasks).sum();
        Self { groups, overall }
    }

    pub fn group(&self, key: &str) -> Option<Tasks> {
        self.groups.iter().find(|g| g.key == key).map(|g| g.tasks)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
