use super::{KernelCtx, Scheduler, TaskId, Ticks};

pub struct RoundRobinScheduler {
    quantum: Ticks,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Ticks) -> Self {
        debug_assert!(quantum > 0, "quantum must be validated before use");
        Self { quantum }
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl Scheduler for RoundRobinScheduler {
    // Preempted tasks go to the tail, behind anything admitted during their slice
    fn enqueue(&mut self, ctx: &mut KernelCtx, task: TaskId) {
        ctx.ready_push_back(task);
    }

    fn slice(&self, ctx: &KernelCtx, task: TaskId) -> Ticks {
        self.quantum.min(ctx.task(task).remaining())
    }
}
