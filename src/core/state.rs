use rustc_hash::FxHashSet;
use std::collections::VecDeque;

// Index into Task Vec; equals the process's position in the caller's input
pub type TaskId = usize;
pub type Ticks = u64;
pub type PageId = u32;
pub type Cylinder = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    // Not yet admitted to the run queue
    Pending,
    Runnable,
    Running,
    Completed,
}

/// Per-run bookkeeping for one process. Owned by the [`KernelCtx`] of a single
/// simulation; the caller's `Process` values are never touched.
#[derive(Debug)]
pub struct Task {
    pub id: TaskId,
    pub state: TaskState,
    pub arrival: Ticks,
    pub required_service: Ticks,
    pub consumed_service: Ticks,
    // Instant the task last became runnable (arrival or end of its last slice)
    pub ready_since: Ticks,
    pub waited: Ticks,
    pub completion_time: Option<Ticks>,
}

impl Task {
    pub fn remaining(&self) -> Ticks {
        self.required_service - self.consumed_service
    }
}

#[derive(Debug)]
pub struct KernelCtx {
    pub now: Ticks,
    pub current: Option<TaskId>,
    pub tasks: Vec<Task>,
    pub ready: VecDeque<TaskId>,
    enqueued: FxHashSet<TaskId>,
}

impl KernelCtx {
    pub fn new() -> Self {
        Self {
            now: 0,
            current: None,
            tasks: Vec::new(),
            ready: VecDeque::new(),
            enqueued: FxHashSet::default(),
        }
    }

    pub fn create_task(&mut self, arrival: Ticks, required_service: Ticks) -> TaskId {
        let id = self.tasks.len();
        self.tasks.push(Task {
            id,
            state: TaskState::Pending,
            arrival,
            required_service,
            consumed_service: 0,
            ready_since: arrival,
            waited: 0,
            completion_time: None,
        });
        id
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    // Jump an idle CPU forward; time never runs backwards
    pub fn advance_to(&mut self, at: Ticks) {
        debug_assert!(self.current.is_none(), "Skipping time while a task is running");
        self.now = self.now.max(at);
    }

    pub fn ready_push_back(&mut self, task_id: TaskId) {
        assert!(
            self.enqueued.insert(task_id),
            "Task {task_id} already present in the ready queue"
        );
        debug_assert_eq!(
            self.task(task_id).state,
            TaskState::Runnable,
            "Task {task_id} must be Runnable when enqueued"
        );
        self.ready.push_back(task_id);
    }

    pub fn ready_pop_front(&mut self) -> Option<TaskId> {
        let task = self.ready.pop_front()?;
        let removed = self.enqueued.remove(&task);
        debug_assert!(removed, "Task {task} missing ready queue membership");
        Some(task)
    }

    pub fn task_in_ready(&self, task_id: TaskId) -> bool {
        self.enqueued.contains(&task_id)
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[task_id]
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn all_completed(&self) -> bool {
        self.tasks.iter().all(|t| t.state == TaskState::Completed)
    }

    pub fn mark_runnable(&mut self, task_id: TaskId, since: Ticks) {
        let task = self.task_mut(task_id);
        debug_assert!(
            task.state != TaskState::Completed,
            "Completed task {} cannot be runnable",
            task.id
        );
        task.state = TaskState::Runnable;
        task.ready_since = since;
    }

    // Returns the time the task spent waiting before this dispatch
    pub fn set_running(&mut self, task_id: TaskId) -> Ticks {
        debug_assert!(
            !self.enqueued.contains(&task_id),
            "Running task {task_id} must not be enqueued"
        );
        debug_assert!(self.current.is_none(), "CPU already running a task");

        let now = self.now;
        self.current = Some(task_id);
        let task = self.task_mut(task_id);
        let wait = now - task.ready_since;
        task.state = TaskState::Running;
        task.waited += wait;
        wait
    }

    pub fn charge(&mut self, task_id: TaskId, service: Ticks) {
        let task = self.task_mut(task_id);
        debug_assert!(
            service <= task.remaining(),
            "Task {task_id} charged past its burst"
        );
        task.consumed_service += service;
    }

    pub fn clear_cpu(&mut self) {
        self.current = None;
    }

    pub fn mark_completed(&mut self, task_id: TaskId, completion_time: Ticks) {
        debug_assert!(
            !self.enqueued.contains(&task_id),
            "Completing task {task_id} that is still enqueued"
        );

        let task = &mut self.tasks[task_id];
        debug_assert!(
            task.state == TaskState::Running,
            "Task {task_id} must have been running before marked complete"
        );
        debug_assert_eq!(task.remaining(), 0, "Task {task_id} completed early");

        task.state = TaskState::Completed;
        task.completion_time = Some(completion_time);
    }
}

impl Default for KernelCtx {
    fn default() -> Self {
        Self::new()
    }
}
