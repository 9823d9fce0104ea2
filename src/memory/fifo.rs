use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use super::FrameSet;
use crate::core::{Access, PageId};

/// Evicts the longest-resident page. Hits never reorder the queue.
#[derive(Debug)]
pub struct FifoFrames {
    capacity: usize,
    // Front = oldest load
    queue: VecDeque<PageId>,
    resident: FxHashSet<PageId>,
}

impl FifoFrames {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "frame set needs at least one frame");
        Self {
            capacity,
            queue: VecDeque::new(),
            resident: FxHashSet::default(),
        }
    }
}

impl FrameSet for FifoFrames {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn contains(&self, page: PageId) -> bool {
        self.resident.contains(&page)
    }

    fn reference(&mut self, page: PageId) -> Access {
        if self.contains(page) {
            return Access::Hit;
        }

        let evicted = if self.queue.len() < self.capacity {
            None
        } else {
            let victim = self.queue.pop_front();
            if let Some(victim) = victim {
                self.resident.remove(&victim);
            }
            victim
        };

        self.queue.push_back(page);
        self.resident.insert(page);
        Access::Fault { evicted }
    }

    fn frames(&self) -> Vec<PageId> {
        self.queue.iter().copied().collect()
    }
}
