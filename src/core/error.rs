use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

/// Rejection of a workload before any simulation state is created.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(ConfigError),

    #[error("invalid input: {0}")]
    InvalidInput(InputError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("round-robin quantum must be at least 1")]
    ZeroQuantum,

    #[error("frame capacity must be at least 1")]
    ZeroFrameCapacity,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("process id {0:?} appears more than once")]
    DuplicateProcessId(String),

    #[error("process {process:?} has a zero burst time")]
    ZeroBurst { process: String },

    #[error("latest arrival {last_arrival} plus total burst {total_burst} overflows the clock")]
    TimelineOverflow { last_arrival: u64, total_burst: u64 },
}

impl From<ConfigError> for SimError {
    fn from(err: ConfigError) -> Self {
        SimError::InvalidConfiguration(err)
    }
}

impl From<InputError> for SimError {
    fn from(err: InputError) -> Self {
        SimError::InvalidInput(err)
    }
}
