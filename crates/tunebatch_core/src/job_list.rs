use serde::Serialize;
use thiserror::Error;

use crate::validate::is_acceptable;

/// Maximum number of queued single-track jobs.
pub const MAX_JOBS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Downloading,
    Completed,
    Failed,
}

/// One queued ad-hoc URL.
///
/// `position` is a view of the current list order, not a permanent identity:
/// it is rewritten whenever an earlier item is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobItem {
    pub url: String,
    pub title: String,
    pub position: usize,
    pub status: JobStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Please enter a URL")]
    Empty,
    #[error("Maximum {max} URLs allowed")]
    CapacityExceeded { max: usize },
    #[error("Please enter a valid YouTube/YouTube Music URL")]
    InvalidUrl,
    #[error("URL already added")]
    Duplicate,
    #[error("No song at position {} (list has {len})", .position + 1)]
    OutOfRange { position: usize, len: usize },
}

/// Bounded, ordered, duplicate-free list of single-track jobs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobList {
    items: Vec<JobItem>,
}

impl JobList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends a new pending job.
    ///
    /// Checks run in a fixed order: blank, capacity, URL shape, duplicate.
    pub fn add(&mut self, url: &str) -> Result<JobItem, Rejection> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Rejection::Empty);
        }
        if self.items.len() >= MAX_JOBS {
            return Err(Rejection::CapacityExceeded { max: MAX_JOBS });
        }
        if !is_acceptable(url) {
            return Err(Rejection::InvalidUrl);
        }
        if self.items.iter().any(|item| item.url == url) {
            return Err(Rejection::Duplicate);
        }

        let position = self.items.len();
        let item = JobItem {
            url: url.to_string(),
            title: format!("Song {}", position + 1),
            position,
            status: JobStatus::Pending,
        };
        self.items.push(item.clone());
        Ok(item)
    }

    /// Removes the item at `position` and re-indexes the remainder.
    pub fn remove_at(&mut self, position: usize) -> Result<JobItem, Rejection> {
        if position >= self.items.len() {
            return Err(Rejection::OutOfRange {
                position,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(position);
        for (index, item) in self.items.iter_mut().enumerate() {
            item.position = index;
        }
        Ok(removed)
    }

    /// Empties the list, returning how many items were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        count
    }

    /// Sets the status of the item with `url`. Returns false if no such item
    /// exists (for example because it was removed mid-run).
    pub fn set_status(&mut self, url: &str, status: JobStatus) -> bool {
        match self.items.iter_mut().find(|item| item.url == url) {
            Some(item) => {
                item.status = status;
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[JobItem] {
        &self.items
    }

    pub fn snapshot(&self) -> Vec<JobItem> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
