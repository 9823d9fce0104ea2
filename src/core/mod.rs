pub mod driver;
pub mod error;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::{SchedCore, Slice};
pub use error::{ConfigError, InputError, Result, SimError};
pub use event::{Access, FaultLogEntry, SeekLogEntry, TimelineSegment};
pub use observer::Observer;
pub use state::{Cylinder, KernelCtx, PageId, Task, TaskId, TaskState, Ticks};
