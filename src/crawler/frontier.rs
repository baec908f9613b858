//! Crawl frontier: FIFO work queue plus visited set
//!
//! Entries are enqueued unconditionally, duplicates included. Deduplication
//! happens when an entry is dequeued and marked visited, so a URL may sit in
//! the queue several times but is processed at most once, at the depth it was
//! first dequeued with.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting to be processed, with its distance from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: u32,
}

/// Breadth-first frontier
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry to the back of the queue
    pub fn push(&mut self, url: Url, depth: u32) {
        self.queue.push_back(FrontierEntry { url, depth });
    }

    /// Removes the entry at the head of the queue
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Marks a URL visited
    ///
    /// Check and insert are one operation: returns `false` if the URL had
    /// already been visited, in which case the caller must discard the entry.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Number of entries still queued, duplicates included
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
