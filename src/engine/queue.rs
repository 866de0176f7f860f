// src/engine/queue.rs

use std::collections::VecDeque;

use tracing::debug;

use super::Task;
use crate::types::QueueOrder;

/// Tasks waiting for the work slot.
///
/// With [`QueueOrder::Lifo`] this behaves as a stack: the most recently
/// enqueued task is taken first, so within a burst of discovered documents
/// the last one found runs first. [`QueueOrder::Fifo`] takes tasks in
/// discovery order.
#[derive(Debug)]
pub struct PendingQueue {
    order: QueueOrder,
    tasks: VecDeque<Task>,
}

impl PendingQueue {
    pub fn new(order: QueueOrder) -> Self {
        Self {
            order,
            tasks: VecDeque::new(),
        }
    }

    /// Returns true if nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the configured order.
    pub fn order(&self) -> QueueOrder {
        self.order
    }

    pub fn push(&mut self, task: Task) {
        debug!(path = %task.item, pending = self.tasks.len() + 1, "task enqueued");
        self.tasks.push_back(task);
    }

    /// Take the next task according to the configured order.
    pub fn pop(&mut self) -> Option<Task> {
        match self.order {
            QueueOrder::Lifo => self.tasks.pop_back(),
            QueueOrder::Fifo => self.tasks.pop_front(),
        }
    }
}
