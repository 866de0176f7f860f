// tests/work_slot.rs

use std::path::{Path, PathBuf};

use specsweep::engine::{PendingQueue, QueueOrder, WorkSlot};
use specsweep_test_utils::builders::TaskBuilder;

fn pop_all(queue: &mut PendingQueue) -> Vec<PathBuf> {
    std::iter::from_fn(|| queue.pop().map(|t| t.item.path)).collect()
}

#[test]
fn queue_pops_by_configured_order() {
    let mut lifo = PendingQueue::new(QueueOrder::Lifo);
    let mut fifo = PendingQueue::new(QueueOrder::Fifo);
    for name in ["a.yaml", "b.yaml", "c.yaml"] {
        lifo.push(TaskBuilder::new(name).build());
        fifo.push(TaskBuilder::new(name).build());
    }

    assert_eq!(lifo.order(), QueueOrder::Lifo);
    assert_eq!(lifo.len(), 3);
    assert_eq!(
        pop_all(&mut lifo),
        vec![PathBuf::from("c.yaml"), PathBuf::from("b.yaml"), PathBuf::from("a.yaml")]
    );
    assert_eq!(
        pop_all(&mut fifo),
        vec![PathBuf::from("a.yaml"), PathBuf::from("b.yaml"), PathBuf::from("c.yaml")]
    );
    assert!(lifo.is_empty());
}

#[test]
fn slot_holds_one_task_until_released() {
    let mut slot = WorkSlot::new(QueueOrder::Lifo);
    slot.push(TaskBuilder::new("a.yaml").build());
    slot.push(TaskBuilder::new("b.yaml").build());

    let first = slot.activate_next().map(|t| t.item.path);
    assert_eq!(first, Some(PathBuf::from("b.yaml")));
    assert!(slot.activate_next().is_none());
    assert_eq!(slot.active().map(|i| i.path.clone()), Some(PathBuf::from("b.yaml")));

    // A release for some other path leaves the slot occupied.
    assert!(slot.release(Path::new("a.yaml")).is_none());
    assert!(slot.is_active(Path::new("b.yaml")));

    assert!(slot.release(Path::new("b.yaml")).is_some());
    assert!(slot.is_idle());
    assert_eq!(slot.pending_len(), 1);
}

#[test]
fn slot_is_drained_only_after_discovery_finishes() {
    let mut slot = WorkSlot::new(QueueOrder::Fifo);
    assert!(!slot.is_drained());

    slot.mark_discovery_finished();
    assert!(slot.discovery_finished());
    assert!(slot.is_drained());

    slot.push(TaskBuilder::new("a.yaml").build());
    assert!(!slot.is_drained());
    slot.activate_next();
    assert!(!slot.is_drained());
    slot.release(Path::new("a.yaml"));
    assert!(slot.is_drained());
}
