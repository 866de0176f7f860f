// src/engine/slot.rs

//! The single work slot: at most one task is active at any time.

use std::path::Path;

use tracing::debug;

use super::queue::PendingQueue;
use super::Task;
use crate::discover::TestItem;
use crate::types::QueueOrder;

/// Pending queue plus the one active task.
///
/// A task is active from the moment it is handed to the converter until
/// its completion has been classified and aggregated.
#[derive(Debug)]
pub struct WorkSlot {
    pending: PendingQueue,
    active: Option<TestItem>,
    discovery_finished: bool,
}

impl WorkSlot {
    pub fn new(order: QueueOrder) -> Self {
        Self {
            pending: PendingQueue::new(order),
            active: None,
            discovery_finished: false,
        }
    }

    /// No task is active.
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    pub fn active(&self) -> Option<&TestItem> {
        self.active.as_ref()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn push(&mut self, task: Task) {
        self.pending.push(task);
    }

    /// If idle, take the next pending task and mark it active.
    pub fn activate_next(&mut self) -> Option<Task> {
        if !self.is_idle() {
            return None;
        }
        let task = self.pending.pop()?;
        debug!(path = %task.item, remaining = self.pending.len(), "activating task");
        self.active = Some(task.item.clone());
        Some(task)
    }

    /// Release the slot if `path` is the active task. Returns the released
    /// item, or `None` for a stale completion.
    pub fn release(&mut self, path: &Path) -> Option<TestItem> {
        match &self.active {
            Some(item) if item.path == path => self.active.take(),
            _ => None,
        }
    }

    /// `true` if `path` is the active task.
    pub fn is_active(&self, path: &Path) -> bool {
        self.active.as_ref().is_some_and(|item| item.path == path)
    }

    pub fn mark_discovery_finished(&mut self) {
        self.discovery_finished = true;
    }

    pub fn discovery_finished(&self) -> bool {
        self.discovery_finished
    }

    /// Nothing left to do: discovery is over, nothing pending or active.
    pub fn is_drained(&self) -> bool {
        self.discovery_finished && self.active.is_none() && self.pending.is_empty()
    }
}
