//! Disk-head scheduling.
//!
//! Requests are identified by position, so a cylinder listed twice is
//! serviced twice (the second visit costs no movement).

pub mod fcfs;
pub mod sstf;

use std::fmt;

use log::{debug, trace};
use serde::Serialize;

use crate::core::{Cylinder, SeekLogEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskPolicy {
    Fcfs,
    Sstf,
}

impl fmt::Display for DiskPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskPolicy::Fcfs => write!(f, "FCFS"),
            DiskPolicy::Sstf => write!(f, "SSTF"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskSchedule {
    pub seeks: Vec<SeekLogEntry>,
    pub total_movement: u64,
}

impl DiskSchedule {
    pub fn service_order(&self) -> Vec<Cylinder> {
        self.seeks.iter().map(|s| s.to).collect()
    }
}

/// Service every request starting from `head`. Never fails: an empty request
/// list simply yields an empty log.
pub fn run_disk_schedule(head: Cylinder, requests: &[Cylinder], policy: DiskPolicy) -> DiskSchedule {
    let order = match policy {
        DiskPolicy::Fcfs => fcfs::service_order(requests),
        DiskPolicy::Sstf => sstf::service_order(head, requests),
    };
    debug_assert_eq!(order.len(), requests.len(), "every request is serviced once");

    let mut seeks = Vec::with_capacity(order.len());
    let mut pos = head;
    for to in order {
        let seek = SeekLogEntry::new(pos, to);
        trace!("{} -> {} (move {})", seek.from, seek.to, seek.movement);
        seeks.push(seek);
        pos = to;
    }
    let total_movement: u64 = seeks.iter().map(|s| s.movement).sum();

    debug!(
        "{}: {} requests from head {}, total movement {}",
        policy,
        requests.len(),
        head,
        total_movement
    );
    DiskSchedule {
        seeks,
        total_movement,
    }
}
