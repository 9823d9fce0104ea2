pub mod driver;
pub mod process;
pub mod workload;

pub use driver::{CpuSchedule, CpuSim, run_cpu_schedule};
pub use process::{Process, ProcessWait, WaitingTimeReport};
pub use workload::Workload;
