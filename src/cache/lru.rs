//! Recency List Module
//!
//! Implements the recency order used for LRU eviction.
//!
//! Entries live in a slab of slots linked into a doubly linked list, so that
//! promotion, removal and eviction are all O(1) given a [`NodeId`].

use super::CacheEntry;

/// Stable handle to an entry's slot in the recency list.
///
/// A handle stays valid until its entry is removed; the slot may then be
/// reused for a later entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug)]
struct Node {
    entry: CacheEntry,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

// == Recency List ==
/// Owns cache entries ordered by access time.
///
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
#[derive(Debug, Default)]
pub(crate) struct RecencyList {
    slots: Vec<Option<Node>>,
    /// Indices of vacated slots available for reuse
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Front ==
    /// Inserts an entry as the most recently used and returns its handle.
    pub fn push_front(&mut self, entry: CacheEntry) -> NodeId {
        let node = Node {
            entry,
            prev: None,
            next: self.head,
        };

        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        };

        self.attach_front(id);
        self.len += 1;
        id
    }

    // == Touch ==
    /// Marks an entry as recently used (moves it to the front).
    ///
    /// Returns false if the handle does not refer to a live entry.
    pub fn touch(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.unlink(id);
        self.attach_front(id);
        true
    }

    // == Remove ==
    /// Removes an entry from the list, returning it.
    pub fn remove(&mut self, id: NodeId) -> Option<CacheEntry> {
        self.node(id)?;
        self.unlink(id);
        let node = self.slots[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.entry)
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn evict_oldest(&mut self) -> Option<CacheEntry> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Peek Oldest ==
    /// Returns the least recently used entry without removing it.
    #[cfg(test)]
    pub fn peek_oldest(&self) -> Option<&CacheEntry> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the entry behind a handle.
    pub fn get(&self, id: NodeId) -> Option<&CacheEntry> {
        self.node(id).map(|node| &node.entry)
    }

    // == Clear ==
    /// Drops every entry and resets the list to empty.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    /// Returns true if the list holds no entries.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Splices a live, detached node in at the head.
    fn attach_front(&mut self, id: NodeId) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head) => {
                if let Some(node) = self.node_mut(head) {
                    node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Detaches a node from its neighbours without freeing its slot.
    fn unlink(&mut self, id: NodeId) {
        let (prev, next) = match self.node(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }
}

/// Front-to-back iterator over `(handle, entry)` pairs.
pub(crate) struct Iter<'a> {
    list: &'a RecencyList,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeId, &'a CacheEntry);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.list.node(id)?;
        self.cursor = node.next;
        Some((id, &node.entry))
    }
}
