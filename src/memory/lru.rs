use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use super::FrameSet;
use crate::core::{Access, PageId};

new_key_type! {
    struct NodeKey;
}

#[derive(Debug)]
struct Node {
    page: PageId,
    // Physical frame the page occupies
    slot: usize,
    prev: Option<NodeKey>,
    next: Option<NodeKey>,
}

/// Evicts the page whose last reference is furthest in the past.
///
/// Recency is a doubly-linked list threaded through a `SlotMap`, with `lru`
/// at the cold end and `mru` at the hot end, so both a hit (unlink and
/// append) and an eviction (pop the cold end) are O(1). Pages also keep the
/// physical slot they were loaded into: a new page reuses its victim's slot,
/// which is the order [`FrameSet::frames`] reports.
#[derive(Debug)]
pub struct LruFrames {
    capacity: usize,
    nodes: SlotMap<NodeKey, Node>,
    index: FxHashMap<PageId, NodeKey>,
    lru: Option<NodeKey>,
    mru: Option<NodeKey>,
    slots: Vec<PageId>,
}

impl LruFrames {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "frame set needs at least one frame");
        Self {
            capacity,
            nodes: SlotMap::with_key(),
            index: FxHashMap::default(),
            lru: None,
            mru: None,
            slots: Vec::new(),
        }
    }

    /// Resident pages from least to most recently used.
    pub fn recency(&self) -> Vec<PageId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.lru;
        while let Some(key) = cursor {
            let node = &self.nodes[key];
            order.push(node.page);
            cursor = node.next;
        }
        order
    }

    fn unlink(&mut self, key: NodeKey) {
        let (prev, next) = {
            let node = &self.nodes[key];
            (node.prev, node.next)
        };

        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.lru = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.mru = prev,
        }

        let node = &mut self.nodes[key];
        node.prev = None;
        node.next = None;
    }

    fn push_mru(&mut self, key: NodeKey) {
        let old_mru = self.mru;
        {
            let node = &mut self.nodes[key];
            node.prev = old_mru;
            node.next = None;
        }
        match old_mru {
            Some(old) => self.nodes[old].next = Some(key),
            None => self.lru = Some(key),
        }
        self.mru = Some(key);
    }

    fn evict_lru(&mut self) -> Option<Node> {
        let key = self.lru?;
        self.unlink(key);
        let node = self.nodes.remove(key)?;
        self.index.remove(&node.page);
        Some(node)
    }

    fn load(&mut self, page: PageId, slot: usize) {
        let key = self.nodes.insert(Node {
            page,
            slot,
            prev: None,
            next: None,
        });
        self.index.insert(page, key);
        self.push_mru(key);
    }
}

impl FrameSet for LruFrames {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn contains(&self, page: PageId) -> bool {
        self.index.contains_key(&page)
    }

    fn reference(&mut self, page: PageId) -> Access {
        if let Some(&key) = self.index.get(&page) {
            self.unlink(key);
            self.push_mru(key);
            return Access::Hit;
        }

        if self.slots.len() < self.capacity {
            let slot = self.slots.len();
            self.slots.push(page);
            self.load(page, slot);
            return Access::Fault { evicted: None };
        }

        let Some(victim) = self.evict_lru() else {
            unreachable!("full frame set with no LRU page");
        };
        self.slots[victim.slot] = page;
        self.load(page, victim.slot);
        Access::Fault {
            evicted: Some(victim.page),
        }
    }

    fn frames(&self) -> Vec<PageId> {
        self.slots.clone()
    }
}
