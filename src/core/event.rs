use serde::Serialize;

use crate::core::{Cylinder, PageId, Ticks};

/// One contiguous run of a process on the CPU, covering `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineSegment {
    pub process: String,
    pub start: Ticks,
    pub end: Ticks,
}

impl TimelineSegment {
    pub fn new(process: impl Into<String>, start: Ticks, end: Ticks) -> Self {
        debug_assert!(end > start, "empty timeline segment");
        Self {
            process: process.into(),
            start,
            end,
        }
    }

    pub fn len(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Access {
    Hit,
    // `evicted` is None while free frames remain
    Fault { evicted: Option<PageId> },
}

impl Access {
    pub fn is_fault(&self) -> bool {
        matches!(self, Access::Fault { .. })
    }
}

/// Outcome of a single page reference plus the frame contents right after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultLogEntry {
    pub page: PageId,
    pub access: Access,
    pub frames: Vec<PageId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeekLogEntry {
    pub from: Cylinder,
    pub to: Cylinder,
    pub movement: u64,
}

impl SeekLogEntry {
    pub fn new(from: Cylinder, to: Cylinder) -> Self {
        Self {
            from,
            to,
            movement: from.abs_diff(to),
        }
    }
}
