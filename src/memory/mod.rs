//! Page replacement over a fixed number of physical frames.

pub mod fifo;
pub mod lru;

use std::fmt;

use log::{debug, trace};
use serde::Serialize;

use crate::core::{Access, ConfigError, FaultLogEntry, PageId, SimError};
pub use fifo::FifoFrames;
pub use lru::LruFrames;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePolicy {
    Fifo,
    Lru,
}

impl fmt::Display for PagePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagePolicy::Fifo => write!(f, "FIFO"),
            PagePolicy::Lru => write!(f, "LRU"),
        }
    }
}

/// A resident set of at most `capacity()` distinct pages.
pub trait FrameSet {
    fn capacity(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, page: PageId) -> bool;

    /// Touch `page`, loading it (and evicting a victim if full) on a miss.
    fn reference(&mut self, page: PageId) -> Access;

    /// Resident pages in the order the policy keeps them.
    fn frames(&self) -> Vec<PageId>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReplacement {
    pub log: Vec<FaultLogEntry>,
    pub faults: usize,
}

impl PageReplacement {
    pub fn hits(&self) -> usize {
        self.log.len() - self.faults
    }
}

/// Replay `references` once through a fresh frame set of `capacity` frames.
pub fn run_page_replacement(
    references: &[PageId],
    capacity: usize,
    policy: PagePolicy,
) -> Result<PageReplacement, SimError> {
    if capacity == 0 {
        return Err(ConfigError::ZeroFrameCapacity.into());
    }

    let result = match policy {
        PagePolicy::Fifo => replay(references, FifoFrames::new(capacity)),
        PagePolicy::Lru => replay(references, LruFrames::new(capacity)),
    };

    debug!(
        "{}: {} references over {} frames, {} faults",
        policy,
        references.len(),
        capacity,
        result.faults
    );
    Ok(result)
}

fn replay<F: FrameSet>(references: &[PageId], mut frames: F) -> PageReplacement {
    let mut log = Vec::with_capacity(references.len());
    let mut faults = 0;

    for &page in references {
        let access = frames.reference(page);
        debug_assert!(frames.len() <= frames.capacity(), "frame set overflow");
        if access.is_fault() {
            faults += 1;
        }
        let snapshot = frames.frames();
        trace!("page {page}: {access:?} -> {snapshot:?}");
        log.push(FaultLogEntry {
            page,
            access,
            frames: snapshot,
        });
    }

    PageReplacement { log, faults }
}
