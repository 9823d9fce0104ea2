use log::trace;

use super::{
    observer::Observer,
    state::{KernelCtx, TaskId, Ticks},
};
use crate::scheduler::Scheduler;

/// A dispatch that has finished executing but whose task has not yet been
/// re-queued or retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub task: TaskId,
    pub start: Ticks,
    pub end: Ticks,
}

pub struct SchedCore<S: Scheduler> {
    pub ctx: KernelCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            ctx: KernelCtx::new(),
            scheduler,
            observer: Observer::new(),
        }
    }

    /// Hand an arrived task to the policy's run queue.
    pub fn admit(&mut self, task: TaskId) {
        let arrival = self.ctx.task(task).arrival;
        debug_assert!(arrival <= self.ctx.now, "Task {task} admitted before arrival");
        self.ctx.mark_runnable(task, arrival);
        self.scheduler.enqueue(&mut self.ctx, task);
    }

    /// Dispatch the next runnable task and run it for the slice the policy
    /// grants. Returns None when the run queue is empty.
    ///
    /// The CPU stays occupied until [`SchedCore::finish_slice`] is called, so
    /// that arrivals during the slice can be admitted first.
    pub fn run_next(&mut self) -> Option<Slice> {
        debug_assert!(self.ctx.cpu_is_idle(), "dispatch while a slice is pending");
        let task = self.scheduler.dispatch(&mut self.ctx)?;

        let waited = self.ctx.set_running(task);
        let remaining = self.ctx.task(task).remaining();
        let slice = self.scheduler.slice(&self.ctx, task).min(remaining);
        debug_assert!(slice > 0, "Scheduler granted an empty slice to task {task}");

        let start = self.ctx.now;
        self.ctx.advance_time(slice);
        self.ctx.charge(task, slice);
        trace!(
            "t={} dispatch task {} for {} (waited {}, {} left)",
            start,
            task,
            slice,
            waited,
            remaining - slice
        );

        Some(Slice {
            task,
            start,
            end: self.ctx.now,
        })
    }

    /// Retire the task if its burst is used up, otherwise put it back on the
    /// run queue behind anything admitted meanwhile.
    pub fn finish_slice(&mut self, slice: Slice) {
        debug_assert_eq!(self.ctx.current, Some(slice.task));
        let now = self.ctx.now;
        self.ctx.clear_cpu();

        if self.ctx.task(slice.task).remaining() == 0 {
            self.ctx.mark_completed(slice.task, now);
            trace!("t={} task {} completed", now, slice.task);
        } else {
            self.ctx.mark_runnable(slice.task, now);
            self.scheduler.enqueue(&mut self.ctx, slice.task);
        }

        self.observer.observe(&self.ctx);
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
