//! Workload descriptions shared by the three engines.
//!
//! A [`Workload`] bundles one input set per engine: the processes and quantum
//! for CPU scheduling, the reference stream and frame count for page
//! replacement, and the head position and request list for disk scheduling.
//! Workloads come from the built-in textbook example, a seeded generator, or
//! a JSON document in which every field but `processes` may be omitted.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::process::Process;
use crate::core::{Cylinder, PageId, Ticks};

pub const SAMPLE_QUANTUM: Ticks = 2;
pub const SAMPLE_FRAMES: usize = 3;
pub const SAMPLE_HEAD: Cylinder = 53;
pub const SAMPLE_REFERENCES: [PageId; 7] = [1, 2, 3, 2, 4, 1, 5];
pub const SAMPLE_REQUESTS: [Cylinder; 8] = [98, 183, 37, 122, 14, 124, 65, 67];

// Upper bound (exclusive) for generated cylinder numbers
pub const DISK_CYLINDERS: Cylinder = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub processes: Vec<Process>,
    #[serde(default = "default_quantum")]
    pub quantum: Ticks,
    #[serde(default = "default_references")]
    pub references: Vec<PageId>,
    #[serde(default = "default_frames")]
    pub frames: usize,
    #[serde(default = "default_head")]
    pub head: Cylinder,
    #[serde(default = "default_requests")]
    pub requests: Vec<Cylinder>,
}

fn default_quantum() -> Ticks {
    SAMPLE_QUANTUM
}

fn default_references() -> Vec<PageId> {
    SAMPLE_REFERENCES.to_vec()
}

fn default_frames() -> usize {
    SAMPLE_FRAMES
}

fn default_head() -> Cylinder {
    SAMPLE_HEAD
}

fn default_requests() -> Vec<Cylinder> {
    SAMPLE_REQUESTS.to_vec()
}

impl Workload {
    /// The classic three-process / seven-reference / eight-request example.
    pub fn sample() -> Self {
        Self {
            processes: vec![
                Process::new("P1", 0, 5),
                Process::new("P2", 1, 3),
                Process::new("P3", 2, 1),
            ],
            quantum: default_quantum(),
            references: default_references(),
            frames: default_frames(),
            head: default_head(),
            requests: default_requests(),
        }
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Generate a reproducible workload from `seed`.
    pub fn random(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let processes = bernoulli_processes(&mut rng, 20, 0.3, 0.4, 2, 7);
        let references = (0..rng.random_range(10..=20))
            .map(|_| rng.random_range(1..=8))
            .collect();
        let requests = (0..rng.random_range(5..=10))
            .map(|_| rng.random_range(0..DISK_CYLINDERS))
            .collect();

        Self {
            processes,
            quantum: rng.random_range(1..=4),
            references,
            frames: rng.random_range(2..=4),
            head: rng.random_range(0..DISK_CYLINDERS),
            requests,
        }
    }
}

// Each tick spawns a process with probability `p_arrival`; bursts are short
// with probability `p_short`, long otherwise.
fn bernoulli_processes(
    rng: &mut StdRng,
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
) -> Vec<Process> {
    let mut processes = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };
            let id = format!("P{}", processes.len() + 1);
            processes.push(Process::new(id, t, burst));
        }
    }

    processes
}
