use super::state::{KernelCtx, TaskState};

/// Checks run-queue invariants after every dispatch. All checks compile away
/// in release builds.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &KernelCtx) {
        self.step += 1;

        if let Some(task_id) = ctx.current {
            let task = ctx.task(task_id);
            debug_assert_eq!(
                task.state,
                TaskState::Running,
                "current task {task_id} must be Running"
            );
            debug_assert!(
                !ctx.task_in_ready(task_id),
                "Running task {task_id} must not appear in the ready queue"
            );
        }

        for &task_id in &ctx.ready {
            let task = ctx.task(task_id);
            debug_assert_eq!(
                task.state,
                TaskState::Runnable,
                "Queued task {task_id} must be Runnable"
            );
            debug_assert!(
                task.remaining() > 0,
                "Task {task_id} queued with no remaining service"
            );
        }

        for task in &ctx.tasks {
            debug_assert_eq!(
                task.state == TaskState::Completed,
                task.completion_time.is_some(),
                "Task {} completion time out of sync with its state",
                task.id
            );
            debug_assert!(
                task.state != TaskState::Completed || task.remaining() == 0,
                "Task {} completed with service left",
                task.id
            );
        }
    }
}
