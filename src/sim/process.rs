use serde::{Deserialize, Serialize};

use crate::core::Ticks;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: String,
    pub arrival: Ticks,
    pub burst: Ticks,
}

impl Process {
    pub fn new(id: impl Into<String>, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            id: id.into(),
            arrival,
            burst,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessWait {
    pub id: String,
    pub waiting: Ticks,
}

/// Accumulated waiting time per process, in the caller's input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitingTimeReport {
    pub waits: Vec<ProcessWait>,
    pub average: f64,
}

impl WaitingTimeReport {
    pub fn get(&self, id: &str) -> Option<Ticks> {
        self.waits.iter().find(|w| w.id == id).map(|w| w.waiting)
    }

    pub fn total(&self) -> Ticks {
        self.waits.iter().map(|w| w.waiting).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.waits.is_empty()
    }
}
