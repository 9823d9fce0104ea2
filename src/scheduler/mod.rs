pub mod fcfs;
pub mod round_robin;

use std::fmt;

use crate::core::{
    ConfigError, Ticks,
    state::{KernelCtx, TaskId},
};
pub use fcfs::FcfsScheduler;
pub use round_robin::RoundRobinScheduler;

/// CPU scheduling policies understood by [`crate::run_cpu_schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuPolicy {
    Fcfs,
    RoundRobin { quantum: Ticks },
}

impl CpuPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            CpuPolicy::Fcfs => Ok(()),
            CpuPolicy::RoundRobin { quantum: 0 } => Err(ConfigError::ZeroQuantum),
            CpuPolicy::RoundRobin { .. } => Ok(()),
        }
    }
}

impl fmt::Display for CpuPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuPolicy::Fcfs => write!(f, "FCFS"),
            CpuPolicy::RoundRobin { quantum } => write!(f, "Round Robin (q={quantum})"),
        }
    }
}

/// Policy hooks driven by [`crate::core::SchedCore`].
pub trait Scheduler {
    /// Place a task that just became runnable, either on arrival or after
    /// its slice expired.
    fn enqueue(&mut self, ctx: &mut KernelCtx, task: TaskId);

    /// Pick the next task to run on an idle CPU.
    fn dispatch(&mut self, ctx: &mut KernelCtx) -> Option<TaskId> {
        ctx.ready_pop_front()
    }

    /// Maximum contiguous service granted to `task` for this dispatch.
    fn slice(&self, ctx: &KernelCtx, task: TaskId) -> Ticks;
}
