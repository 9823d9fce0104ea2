use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use os_policy_sim::{
    CpuPolicy, Cylinder, DiskPolicy, PagePolicy, Ticks, Workload,
    report::{self, compare, verdict_line},
    run_cpu_schedule, run_disk_schedule, run_page_replacement,
};

/// Compare classic OS resource policies on a fixed workload: FCFS vs
/// Round-Robin CPU scheduling, FIFO vs LRU page replacement and FCFS vs SSTF
/// disk scheduling.
///
/// Without --workload or --random the textbook sample workload is used.
#[derive(Debug, Parser)]
#[clap(name = "os-policy-sim", version)]
struct Opts {
    /// JSON workload file. Fields other than "processes" fall back to the
    /// sample workload.
    #[clap(short = 'w', long, conflicts_with = "random")]
    workload: Option<PathBuf>,

    /// Generate a reproducible random workload from this seed.
    #[clap(short = 'r', long)]
    random: Option<u64>,

    /// Override the Round-Robin time quantum.
    #[clap(short = 'q', long)]
    quantum: Option<Ticks>,

    /// Override the number of physical frames.
    #[clap(short = 'f', long)]
    frames: Option<usize>,

    /// Override the starting disk head cylinder.
    #[clap(long)]
    head: Option<Cylinder>,

    /// Enable verbose output, including per-step simulator traces. Specify
    /// multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_workload(opts: &Opts) -> Result<Workload> {
    let mut workload = if let Some(path) = &opts.workload {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read workload {}", path.display()))?;
        Workload::from_json(&text)
            .with_context(|| format!("Failed to parse workload {}", path.display()))?
    } else if let Some(seed) = opts.random {
        info!("Generating random workload with seed {seed}");
        Workload::random(seed)
    } else {
        Workload::sample()
    };

    if let Some(quantum) = opts.quantum {
        workload.quantum = quantum;
    }
    if let Some(frames) = opts.frames {
        workload.frames = frames;
    }
    if let Some(head) = opts.head {
        workload.head = head;
    }
    Ok(workload)
}

fn cpu_section(workload: &Workload) -> Result<()> {
    println!("== Process Scheduling ==");
    let fcfs_policy = CpuPolicy::Fcfs;
    let rr_policy = CpuPolicy::RoundRobin {
        quantum: workload.quantum,
    };

    let mut averages = Vec::with_capacity(2);
    for policy in [fcfs_policy, rr_policy] {
        let out = run_cpu_schedule(&workload.processes, policy)
            .with_context(|| format!("{policy} scheduling failed"))?;
        let waits: Vec<Ticks> = out.waiting.waits.iter().map(|w| w.waiting).collect();
        let average = (out.waiting.average * 100.0).round() / 100.0;

        println!("\n{policy} Gantt Chart:");
        print!("{}", report::gantt_listing(&out.schedule));
        println!("{policy} Waiting Times: {waits:?} Average: {average:.2}");
        averages.push(average);
    }

    println!(
        "\n{}\n",
        verdict_line(
            compare(averages[0], averages[1]),
            &fcfs_policy.to_string(),
            &rr_policy.to_string()
        )
    );
    Ok(())
}

fn memory_section(workload: &Workload) -> Result<()> {
    println!("== Memory Management ==");
    let mut faults = Vec::with_capacity(2);
    for policy in [PagePolicy::Fifo, PagePolicy::Lru] {
        let out = run_page_replacement(&workload.references, workload.frames, policy)
            .with_context(|| format!("{policy} page replacement failed"))?;
        println!("\n{policy} Simulation ({} frames):", workload.frames);
        for entry in &out.log {
            println!("{}", report::fault_line(entry));
        }
        faults.push(out.faults);
    }

    println!("\nFIFO Faults: {}, LRU Faults: {}", faults[0], faults[1]);
    println!(
        "{}\n",
        verdict_line(compare(faults[0], faults[1]), "FIFO", "LRU")
    );
    Ok(())
}

fn disk_section(workload: &Workload) {
    println!("== Disk Scheduling ==");
    let mut totals = Vec::with_capacity(2);
    for policy in [DiskPolicy::Fcfs, DiskPolicy::Sstf] {
        let out = run_disk_schedule(workload.head, &workload.requests, policy);
        println!("\n{policy} (head at {}):", workload.head);
        for seek in &out.seeks {
            println!("{}", report::seek_line(seek));
        }
        totals.push(out.total_movement);
    }

    println!(
        "\nTotal head movement - FCFS: {}, SSTF: {}",
        totals[0], totals[1]
    );
    println!(
        "{}\n",
        verdict_line(compare(totals[0], totals[1]), "FCFS", "SSTF")
    );
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let llv = match opts.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let workload = load_workload(&opts)?;

    cpu_section(&workload)?;
    memory_section(&workload)?;
    disk_section(&workload);
    Ok(())
}
