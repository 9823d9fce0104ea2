//! Deterministic simulators for three classic OS resource policies:
//! CPU scheduling (FCFS, Round-Robin), page replacement (FIFO, LRU) and
//! disk-head scheduling (FCFS, SSTF).

pub mod core;
pub mod disk;
pub mod memory;
pub mod report;
pub mod scheduler;
pub mod sim;

pub use crate::core::{
    Access, ConfigError, Cylinder, FaultLogEntry, InputError, PageId, SeekLogEntry, SimError,
    Ticks, TimelineSegment,
};
pub use disk::{DiskPolicy, DiskSchedule, run_disk_schedule};
pub use memory::{PagePolicy, PageReplacement, run_page_replacement};
pub use scheduler::{CpuPolicy, Scheduler};
pub use sim::{CpuSchedule, Process, WaitingTimeReport, Workload, run_cpu_schedule};
