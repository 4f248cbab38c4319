//! `WaitQueue<T>`: FIFO parking for passive processes.
//!
//! A pure container: inserting into a queue does not suspend anybody, and
//! removing does not reactivate anybody.  Callers pair every insert with a
//! `Step::Passivate` and every removal with an activation.

use std::collections::VecDeque;

/// First-in first-out queue of waiting entities.
#[derive(Clone, Debug)]
pub struct WaitQueue<T> {
    inner: VecDeque<T>,
}

impl<T> Default for WaitQueue<T> {
    fn default() -> Self {
        Self { inner: VecDeque::new() }
    }
}

impl<T> WaitQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` at the tail.
    pub fn insert(&mut self, item: T) {
        self.inner.push_back(item);
    }

    /// The head of the queue without removing it.
    pub fn first(&self) -> Option<&T> {
        self.inner.front()
    }

    /// Remove and return the head.
    pub fn remove_first(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inner.iter()
    }
}

impl<T: PartialEq> WaitQueue<T> {
    /// Remove the first element equal to `item`, wherever it sits.
    /// Returns `false` if it was not queued.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.inner.iter().position(|x| x == item) {
            Some(pos) => {
                self.inner.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.inner.contains(item)
    }
}
