use average::Estimate;
use log::debug;
use rustc_hash::FxHashSet;
use serde::Serialize;

use super::process::{Process, ProcessWait, WaitingTimeReport};
use crate::{
    core::{InputError, SchedCore, SimError, TaskId, Ticks, TimelineSegment},
    scheduler::{CpuPolicy, FcfsScheduler, RoundRobinScheduler, Scheduler},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuSchedule {
    pub schedule: Vec<TimelineSegment>,
    pub waiting: WaitingTimeReport,
}

pub struct CpuSim<'a, S: Scheduler> {
    pub core: SchedCore<S>,
    processes: &'a [Process],
    // Task ids in admission order: by arrival, ties by input position
    arrivals: Vec<TaskId>,
    arrival_cursor: usize,
}

impl<'a, S: Scheduler> CpuSim<'a, S> {
    pub fn new(processes: &'a [Process], scheduler: S) -> Self {
        let mut core = SchedCore::new(scheduler);
        for process in processes {
            core.ctx.create_task(process.arrival, process.burst);
        }

        let mut arrivals: Vec<TaskId> = (0..processes.len()).collect();
        // Stable sort keeps input order among equal arrivals
        arrivals.sort_by_key(|&task| processes[task].arrival);

        Self {
            core,
            processes,
            arrivals,
            arrival_cursor: 0,
        }
    }

    /// Run until every process has completed, returning the timeline.
    pub fn run(&mut self) -> Vec<TimelineSegment> {
        let mut schedule = Vec::new();

        loop {
            self.handle_arrivals();

            match self.core.run_next() {
                Some(slice) => {
                    schedule.push(TimelineSegment::new(
                        self.processes[slice.task].id.clone(),
                        slice.start,
                        slice.end,
                    ));
                    // Arrivals during the slice queue up ahead of the preempted task
                    self.handle_arrivals();
                    self.core.finish_slice(slice);
                }
                None => match self.next_arrival() {
                    Some(at) => self.core.ctx.advance_to(at),
                    None => break,
                },
            }
        }

        debug_assert!(self.core.ctx.all_completed(), "simulation stalled");
        schedule
    }

    fn handle_arrivals(&mut self) {
        let now = self.core.now();
        while let Some(&task) = self.arrivals.get(self.arrival_cursor) {
            // Contiguous, since arrivals are sorted
            if self.processes[task].arrival > now {
                break;
            }
            self.core.admit(task);
            self.arrival_cursor += 1;
        }
    }

    fn next_arrival(&self) -> Option<Ticks> {
        self.arrivals
            .get(self.arrival_cursor)
            .map(|&task| self.processes[task].arrival)
    }

    pub fn waiting_report(&self) -> WaitingTimeReport {
        let waits: Vec<ProcessWait> = self
            .processes
            .iter()
            .zip(&self.core.ctx.tasks)
            .map(|(process, task)| ProcessWait {
                id: process.id.clone(),
                waiting: task.waited,
            })
            .collect();
        let average = if waits.is_empty() {
            0.0
        } else {
            avg(waits.iter().map(|w| w.waiting as f64))
        };
        WaitingTimeReport { waits, average }
    }
}

fn validate(processes: &[Process], policy: CpuPolicy) -> Result<(), SimError> {
    policy.validate()?;

    let mut seen = FxHashSet::default();
    for process in processes {
        if process.burst == 0 {
            return Err(InputError::ZeroBurst {
                process: process.id.clone(),
            }
            .into());
        }
        if !seen.insert(process.id.as_str()) {
            return Err(InputError::DuplicateProcessId(process.id.clone()).into());
        }
    }

    // Every segment ends by the latest arrival plus all service combined
    let last_arrival = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
    let total_burst = processes
        .iter()
        .try_fold(0 as Ticks, |acc, p| acc.checked_add(p.burst));
    match total_burst.and_then(|total| last_arrival.checked_add(total)) {
        Some(_) => Ok(()),
        None => Err(InputError::TimelineOverflow {
            last_arrival,
            total_burst: total_burst.unwrap_or(Ticks::MAX),
        }
        .into()),
    }
}

/// Simulate `processes` under `policy`, producing the CPU timeline and the
/// waiting time of every process.
pub fn run_cpu_schedule(processes: &[Process], policy: CpuPolicy) -> Result<CpuSchedule, SimError> {
    validate(processes, policy)?;

    let result = match policy {
        CpuPolicy::Fcfs => simulate(processes, FcfsScheduler),
        CpuPolicy::RoundRobin { quantum } => {
            simulate(processes, RoundRobinScheduler::new(quantum))
        }
    };

    debug!(
        "{}: {} processes, {} segments, average wait {:.2}",
        policy,
        processes.len(),
        result.schedule.len(),
        result.waiting.average
    );
    Ok(result)
}

fn simulate<S: Scheduler>(processes: &[Process], scheduler: S) -> CpuSchedule {
    let mut sim = CpuSim::new(processes, scheduler);
    let schedule = sim.run();
    CpuSchedule {
        schedule,
        waiting: sim.waiting_report(),
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<average::Mean>().estimate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConfigError, TaskState};

    fn sample() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 5),
            Process::new("P2", 1, 3),
            Process::new("P3", 2, 1),
        ]
    }

    fn seg(p: &str, start: Ticks, end: Ticks) -> TimelineSegment {
        TimelineSegment::new(p, start, end)
    }

    fn round2(x: f64) -> f64 {
        (x * 100.0).round() / 100.0
    }

    #[test]
    fn fcfs_sample_workload() {
        let out = run_cpu_schedule(&sample(), CpuPolicy::Fcfs).unwrap();
        assert_eq!(
            out.schedule,
            vec![seg("P1", 0, 5), seg("P2", 5, 8), seg("P3", 8, 9)]
        );
        assert_eq!(out.waiting.get("P1"), Some(0));
        assert_eq!(out.waiting.get("P2"), Some(4));
        assert_eq!(out.waiting.get("P3"), Some(6));
        assert_eq!(round2(out.waiting.average), 3.33);
    }

    #[test]
    fn round_robin_sample_workload() {
        let out = run_cpu_schedule(&sample(), CpuPolicy::RoundRobin { quantum: 2 }).unwrap();
        assert_eq!(
            out.schedule,
            vec![
                seg("P1", 0, 2),
                seg("P2", 2, 4),
                seg("P3", 4, 5),
                seg("P1", 5, 7),
                seg("P2", 7, 8),
                seg("P1", 8, 9),
            ]
        );
        assert_eq!(out.waiting.get("P1"), Some(4));
        assert_eq!(out.waiting.get("P2"), Some(4));
        assert_eq!(out.waiting.get("P3"), Some(2));
        assert_eq!(round2(out.waiting.average), 3.33);
    }

    #[test]
    fn fcfs_idles_until_next_arrival() {
        let procs = vec![Process::new("A", 2, 3), Process::new("B", 10, 1)];
        let out = run_cpu_schedule(&procs, CpuPolicy::Fcfs).unwrap();
        assert_eq!(out.schedule, vec![seg("A", 2, 5), seg("B", 10, 11)]);
        assert_eq!(out.waiting.total(), 0);
    }

    #[test]
    fn fcfs_orders_by_arrival_then_input_position() {
        let procs = vec![
            Process::new("late", 4, 1),
            Process::new("first", 0, 2),
            Process::new("tie", 0, 1),
        ];
        let out = run_cpu_schedule(&procs, CpuPolicy::Fcfs).unwrap();
        let order: Vec<&str> = out.schedule.iter().map(|s| s.process.as_str()).collect();
        assert_eq!(order, ["first", "tie", "late"]);
        // Report keeps the caller's order
        let ids: Vec<&str> = out.waiting.waits.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["late", "first", "tie"]);
        assert_eq!(out.waiting.get("tie"), Some(2));
        assert_eq!(out.waiting.get("late"), Some(0));
    }

    #[test]
    fn round_robin_large_quantum_matches_fcfs() {
        let rr = run_cpu_schedule(&sample(), CpuPolicy::RoundRobin { quantum: 100 }).unwrap();
        let fcfs = run_cpu_schedule(&sample(), CpuPolicy::Fcfs).unwrap();
        assert_eq!(rr, fcfs);
    }

    #[test]
    fn round_robin_lone_process_is_split_into_quanta() {
        let procs = vec![Process::new("solo", 3, 5)];
        let out = run_cpu_schedule(&procs, CpuPolicy::RoundRobin { quantum: 2 }).unwrap();
        assert_eq!(
            out.schedule,
            vec![seg("solo", 3, 5), seg("solo", 5, 7), seg("solo", 7, 8)]
        );
        assert_eq!(out.waiting.get("solo"), Some(0));
    }

    #[test]
    fn empty_workload_is_a_no_op() {
        let out = run_cpu_schedule(&[], CpuPolicy::RoundRobin { quantum: 1 }).unwrap();
        assert!(out.schedule.is_empty());
        assert!(out.waiting.is_empty());
        assert_eq!(out.waiting.average, 0.0);
    }

    #[test]
    fn zero_quantum_is_rejected_before_input_checks() {
        let procs = vec![Process::new("P1", 0, 0)];
        let err = run_cpu_schedule(&procs, CpuPolicy::RoundRobin { quantum: 0 }).unwrap_err();
        assert_eq!(err, SimError::InvalidConfiguration(ConfigError::ZeroQuantum));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let procs = vec![Process::new("P1", 0, 1), Process::new("P1", 1, 1)];
        let err = run_cpu_schedule(&procs, CpuPolicy::Fcfs).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidInput(InputError::DuplicateProcessId("P1".into()))
        );
    }

    #[test]
    fn zero_burst_is_rejected() {
        let procs = vec![Process::new("P1", 0, 1), Process::new("P2", 1, 0)];
        let err = run_cpu_schedule(&procs, CpuPolicy::Fcfs).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidInput(InputError::ZeroBurst {
                process: "P2".into()
            })
        );
    }

    #[test]
    fn timeline_past_the_clock_is_rejected() {
        let procs = vec![Process::new("A", 0, Ticks::MAX), Process::new("B", 0, 1)];
        let err = run_cpu_schedule(&procs, CpuPolicy::Fcfs).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidInput(InputError::TimelineOverflow {
                last_arrival: 0,
                total_burst: Ticks::MAX,
            })
        );

        let late = vec![Process::new("A", Ticks::MAX - 1, 2)];
        let err = run_cpu_schedule(&late, CpuPolicy::RoundRobin { quantum: 1 }).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidInput(InputError::TimelineOverflow { total_burst: 2, .. })
        ));
    }

    #[test]
    fn timeline_ending_at_the_clock_limit_runs() {
        let procs = vec![Process::new("A", 0, Ticks::MAX - 1), Process::new("B", 0, 1)];
        let out = run_cpu_schedule(&procs, CpuPolicy::Fcfs).unwrap();
        assert_eq!(out.schedule.last(), Some(&seg("B", Ticks::MAX - 1, Ticks::MAX)));
    }

    #[test]
    fn sim_retires_every_task_and_observes_each_dispatch() {
        let procs = sample();
        let mut sim = CpuSim::new(&procs, RoundRobinScheduler::new(2));
        let schedule = sim.run();
        assert_eq!(sim.core.observer().steps(), schedule.len() as u64);
        assert_eq!(sim.core.scheduler.quantum(), 2);
        for task in &sim.core.ctx.tasks {
            assert_eq!(task.state, TaskState::Completed);
            assert_eq!(task.remaining(), 0);
        }
        assert_eq!(sim.core.ctx.task(0).completion_time, Some(9));
        assert_eq!(sim.core.ctx.task(2).completion_time, Some(5));
    }

    #[test]
    fn caller_processes_are_untouched() {
        let procs = sample();
        let before = procs.clone();
        let _ = run_cpu_schedule(&procs, CpuPolicy::RoundRobin { quantum: 1 }).unwrap();
        assert_eq!(procs, before);
    }
}
