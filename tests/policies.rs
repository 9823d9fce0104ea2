//! End-to-end checks of the three engines through the public API, plus
//! randomized properties over small workloads.

use os_policy_sim::{
    Access, CpuPolicy, DiskPolicy, PagePolicy, Process, Workload,
    report::{Verdict, compare},
    run_cpu_schedule, run_disk_schedule, run_page_replacement,
};
use proptest::prelude::*;
use std::collections::HashMap;

const PROPTEST_CASES: u32 = 64;

#[test]
fn sample_workload_end_to_end() {
    let w = Workload::sample();

    let fcfs = run_cpu_schedule(&w.processes, CpuPolicy::Fcfs).unwrap();
    let rr = run_cpu_schedule(&w.processes, CpuPolicy::RoundRobin { quantum: w.quantum }).unwrap();
    assert_eq!(fcfs.waiting.total(), 10);
    assert_eq!(rr.waiting.total(), 10);
    assert_eq!(compare(fcfs.waiting.average, rr.waiting.average), Verdict::Tie);

    let fifo = run_page_replacement(&w.references, w.frames, PagePolicy::Fifo).unwrap();
    let lru = run_page_replacement(&w.references, w.frames, PagePolicy::Lru).unwrap();
    assert_eq!((fifo.faults, lru.faults), (6, 6));

    let dfcfs = run_disk_schedule(w.head, &w.requests, DiskPolicy::Fcfs);
    let sstf = run_disk_schedule(w.head, &w.requests, DiskPolicy::Sstf);
    assert_eq!((dfcfs.total_movement, sstf.total_movement), (640, 236));
    assert_eq!(
        compare(dfcfs.total_movement, sstf.total_movement),
        Verdict::RightWins
    );
}

#[test]
fn random_workloads_run_cleanly() {
    for seed in 0..16 {
        let w = Workload::random(seed);
        run_cpu_schedule(&w.processes, CpuPolicy::Fcfs).unwrap();
        run_cpu_schedule(&w.processes, CpuPolicy::RoundRobin { quantum: w.quantum }).unwrap();
        run_page_replacement(&w.references, w.frames, PagePolicy::Lru).unwrap();
        let _ = run_disk_schedule(w.head, &w.requests, DiskPolicy::Sstf);
    }
}

fn processes() -> impl Strategy<Value = Vec<Process>> {
    prop::collection::vec((0u64..20, 1u64..8), 0..8).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (arrival, burst))| Process::new(format!("P{}", i + 1), arrival, burst))
            .collect()
    })
}

fn policies() -> impl Strategy<Value = CpuPolicy> {
    prop_oneof![
        Just(CpuPolicy::Fcfs),
        (1u64..5).prop_map(|quantum| CpuPolicy::RoundRobin { quantum }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn cpu_schedule_conserves_bursts(procs in processes(), policy in policies()) {
        let out = run_cpu_schedule(&procs, policy).unwrap();

        let mut served: HashMap<&str, u64> = HashMap::new();
        for seg in &out.schedule {
            prop_assert!(seg.end > seg.start);
            *served.entry(seg.process.as_str()).or_default() += seg.len();
        }
        for p in &procs {
            prop_assert_eq!(served.get(p.id.as_str()).copied(), Some(p.burst));
        }

        // One CPU: segments never overlap and never start before arrival
        for pair in out.schedule.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for seg in &out.schedule {
            let p = procs.iter().find(|p| p.id == seg.process).unwrap();
            prop_assert!(seg.start >= p.arrival);
        }

        // waiting = completion - arrival - burst
        for p in &procs {
            let finish = out.schedule.iter().filter(|s| s.process == p.id).map(|s| s.end).max().unwrap();
            prop_assert_eq!(out.waiting.get(&p.id), Some(finish - p.arrival - p.burst));
        }
    }

    #[test]
    fn fcfs_preserves_arrival_order(procs in processes()) {
        let out = run_cpu_schedule(&procs, CpuPolicy::Fcfs).unwrap();
        prop_assert_eq!(out.schedule.len(), procs.len());
        let arrivals: Vec<u64> = out
            .schedule
            .iter()
            .map(|s| procs.iter().find(|p| p.id == s.process).unwrap().arrival)
            .collect();
        prop_assert!(arrivals.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn engines_are_idempotent(
        procs in processes(),
        policy in policies(),
        refs in prop::collection::vec(1u32..6, 0..30),
        frames in 1usize..5,
        head in 0u64..200,
        reqs in prop::collection::vec(0u64..200, 0..12),
    ) {
        prop_assert_eq!(run_cpu_schedule(&procs, policy), run_cpu_schedule(&procs, policy));
        for page_policy in [PagePolicy::Fifo, PagePolicy::Lru] {
            prop_assert_eq!(
                run_page_replacement(&refs, frames, page_policy),
                run_page_replacement(&refs, frames, page_policy)
            );
        }
        for disk_policy in [DiskPolicy::Fcfs, DiskPolicy::Sstf] {
            prop_assert_eq!(
                run_disk_schedule(head, &reqs, disk_policy),
                run_disk_schedule(head, &reqs, disk_policy)
            );
        }
    }

    #[test]
    fn frame_sets_respect_capacity(
        refs in prop::collection::vec(1u32..10, 0..40),
        frames in 1usize..6,
    ) {
        for policy in [PagePolicy::Fifo, PagePolicy::Lru] {
            let out = run_page_replacement(&refs, frames, policy).unwrap();
            prop_assert_eq!(out.log.len(), refs.len());
            prop_assert_eq!(out.faults, out.log.iter().filter(|e| e.access.is_fault()).count());
            for entry in &out.log {
                prop_assert!(entry.frames.len() <= frames);
                prop_assert!(entry.frames.contains(&entry.page));
                if let Access::Fault { evicted: Some(victim) } = entry.access {
                    prop_assert!(!entry.frames.contains(&victim));
                    prop_assert_eq!(entry.frames.len(), frames);
                }
            }
        }
    }

    #[test]
    fn every_request_serviced_once(head in 0u64..200, reqs in prop::collection::vec(0u64..200, 0..12)) {
        for policy in [DiskPolicy::Fcfs, DiskPolicy::Sstf] {
            let out = run_disk_schedule(head, &reqs, policy);
            let mut serviced = out.service_order();
            let mut expected = reqs.clone();
            serviced.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(serviced, expected);
            prop_assert_eq!(out.total_movement, out.seeks.iter().map(|s| s.movement).sum::<u64>());
        }
    }

    #[test]
    fn sstf_first_seek_is_nearest(head in 0u64..200, reqs in prop::collection::vec(0u64..200, 1..12)) {
        let out = run_disk_schedule(head, &reqs, DiskPolicy::Sstf);
        let nearest = reqs.iter().map(|r| r.abs_diff(head)).min().unwrap();
        prop_assert_eq!(out.seeks[0].movement, nearest);
    }
}
