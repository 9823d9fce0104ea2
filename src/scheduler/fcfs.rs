use super::{KernelCtx, Scheduler, TaskId, Ticks};

/// Non-preemptive: every dispatch runs the task to completion, so the ready
/// queue order (arrival order) is the service order.
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    fn enqueue(&mut self, ctx: &mut KernelCtx, task: TaskId) {
        ctx.ready_push_back(task);
    }

    fn slice(&self, ctx: &KernelCtx, task: TaskId) -> Ticks {
        ctx.task(task).remaining()
    }
}
