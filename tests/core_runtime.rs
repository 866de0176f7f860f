// tests/core_runtime.rs

use std::path::PathBuf;

use specsweep::classify::{Classification, Verdict};
use specsweep::discover::TestItem;
use specsweep::engine::{
    CoreCommand, CoreRuntime, CoreStep, CrashPolicy, QueueOrder, RunEnd, RuntimeEvent,
    RuntimeOptions,
};
use specsweep_test_utils::builders::{converted, openapi_doc, TaskBuilder};

fn core_with(order: QueueOrder, stop_on_failure: bool, crash_policy: CrashPolicy) -> CoreRuntime {
    CoreRuntime::new(RuntimeOptions {
        stop_on_failure,
        order,
        crash_policy,
    })
}

fn default_core() -> CoreRuntime {
    core_with(QueueOrder::Lifo, false, CrashPolicy::Pass)
}

fn enqueue(path: &str) -> RuntimeEvent {
    RuntimeEvent::TaskEnqueued(TaskBuilder::new(path).build())
}

fn classified(path: &str, verdict: Verdict) -> RuntimeEvent {
    RuntimeEvent::TaskClassified(Classification {
        item: TestItem::new(path, false, false),
        verdict,
        lines: Vec::new(),
    })
}

fn activated(step: &CoreStep) -> Vec<PathBuf> {
    step.commands
        .iter()
        .filter_map(|c| match c {
            CoreCommand::Activate(task) => Some(task.item.path.clone()),
            _ => None,
        })
        .collect()
}

fn finished(step: &CoreStep) -> Option<RunEnd> {
    step.commands.iter().find_map(|c| match c {
        CoreCommand::Finish(end) => Some(*end),
        _ => None,
    })
}

#[test]
fn first_enqueue_activates_immediately_and_later_ones_wait() {
    let mut core = default_core();

    let step = core.step(enqueue("A.yaml"));
    assert_eq!(activated(&step), vec![PathBuf::from("A.yaml")]);
    assert!(step.keep_running);
    assert!(!core.is_idle());

    let step = core.step(enqueue("B.yaml"));
    assert!(step.commands.is_empty());
    assert_eq!(core.pending_len(), 1);
}

#[test]
fn lifo_order_activates_most_recent_task_first() {
    let mut core = default_core();
    core.step(enqueue("A.yaml"));
    core.step(enqueue("B.yaml"));
    core.step(enqueue("C.yaml"));

    let step = core.step(classified("A.yaml", Verdict::Pass));
    assert_eq!(activated(&step), vec![PathBuf::from("C.yaml")]);

    let step = core.step(classified("C.yaml", Verdict::Pass));
    assert_eq!(activated(&step), vec![PathBuf::from("B.yaml")]);
}

#[test]
fn fifo_order_follows_discovery_order() {
    let mut core = core_with(QueueOrder::Fifo, false, CrashPolicy::Pass);
    core.step(enqueue("A.yaml"));
    core.step(enqueue("B.yaml"));
    core.step(enqueue("C.yaml"));

    let step = core.step(classified("A.yaml", Verdict::Pass));
    assert_eq!(activated(&step), vec![PathBuf::from("B.yaml")]);

    let step = core.step(classified("B.yaml", Verdict::Pass));
    assert_eq!(activated(&step), vec![PathBuf::from("C.yaml")]);
}

#[test]
fn conversion_finished_requests_classification_but_keeps_slot_busy() {
    let mut core = default_core();
    core.step(enqueue("A.yaml"));

    let outcome = converted(TaskBuilder::new("A.yaml").build(), openapi_doc("A"));
    let step = core.step(RuntimeEvent::ConversionFinished(outcome));
    assert!(matches!(step.commands.as_slice(), [CoreCommand::Classify(_)]));

    // Still busy until the classification comes back.
    let step = core.step(enqueue("B.yaml"));
    assert!(activated(&step).is_empty());

    let step = core.step(classified("A.yaml", Verdict::Pass));
    assert_eq!(activated(&step), vec![PathBuf::from("B.yaml")]);
}

#[test]
fn completion_for_inactive_task_is_ignored() {
    let mut core = default_core();
    core.step(enqueue("A.yaml"));
    core.step(enqueue("B.yaml"));

    let outcome = converted(TaskBuilder::new("B.yaml").build(), openapi_doc("B"));
    let step = core.step(RuntimeEvent::ConversionFinished(outcome));
    assert!(step.commands.is_empty());
    assert!(step.keep_running);

    let step = core.step(classified("B.yaml", Verdict::Fail));
    assert!(step.commands.is_empty());
    assert_eq!(core.run_state().fail_count, 0);
}

#[test]
fn stop_mode_ends_run_at_first_failure() {
    let mut core = core_with(QueueOrder::Lifo, true, CrashPolicy::Pass);
    core.step(enqueue("A.yaml"));
    core.step(enqueue("B.yaml"));

    let step = core.step(classified("A.yaml", Verdict::Fail));
    assert_eq!(finished(&step), Some(RunEnd::StoppedOnFailure));
    assert!(!step.keep_running);
    assert!(activated(&step).is_empty());

    // Nothing is processed after the stop.
    let step = core.step(enqueue("C.yaml"));
    assert!(step.commands.is_empty());
    assert!(!step.keep_running);

    let state = core.run_state();
    assert_eq!(state.fail_count, 1);
    assert_eq!(state.pass_count, 0);
    assert_eq!(state.failure_paths, vec![PathBuf::from("A.yaml")]);
    assert_eq!(core.end(), Some(RunEnd::StoppedOnFailure));
}

#[test]
fn stop_mode_keeps_going_after_passes() {
    let mut core = core_with(QueueOrder::Fifo, true, CrashPolicy::Pass);
    core.step(enqueue("A.yaml"));
    core.step(enqueue("B.yaml"));

    let step = core.step(classified("A.yaml", Verdict::Pass));
    assert_eq!(activated(&step), vec![PathBuf::from("B.yaml")]);
}

#[test]
fn empty_discovery_finishes_immediately() {
    let mut core = default_core();
    let step = core.step(RuntimeEvent::DiscoveryFinished);
    assert_eq!(finished(&step), Some(RunEnd::Completed));
    assert!(!step.keep_running);
    assert_eq!(core.run_state().pass_count, 0);
}

#[test]
fn run_completes_after_last_task_once_discovery_is_over() {
    let mut core = default_core();
    core.step(enqueue("A.yaml"));

    let step = core.step(RuntimeEvent::DiscoveryFinished);
    assert!(step.keep_running);
    assert!(finished(&step).is_none());

    let step = core.step(classified("A.yaml", Verdict::Pass));
    assert_eq!(finished(&step), Some(RunEnd::Completed));
    assert_eq!(core.run_state().pass_count, 1);
}

#[test]
fn idle_slot_waits_for_more_discovery() {
    let mut core = default_core();
    core.step(enqueue("A.yaml"));

    // Discovery still running: the slot goes idle without ending the run.
    let step = core.step(classified("A.yaml", Verdict::Pass));
    assert!(step.commands.is_empty());
    assert!(step.keep_running);
    assert!(core.is_idle());

    let step = core.step(enqueue("B.yaml"));
    assert_eq!(activated(&step), vec![PathBuf::from("B.yaml")]);
}

#[test]
fn converter_crash_counts_as_pass_by_default() {
    let mut core = default_core();
    core.step(enqueue("A.yaml"));

    let step = core.step(RuntimeEvent::ConverterCrashed {
        item: TestItem::new("A.yaml", false, false),
        error: "boom".to_string(),
    });
    assert!(step.keep_running);

    let state = core.run_state();
    assert_eq!(state.pass_count, 1);
    assert_eq!(state.warnings, vec!["Converter failed A.yaml".to_string()]);
}

#[test]
fn converter_crash_of_expected_failure_counts_as_fail_by_default() {
    let mut core = default_core();
    core.step(RuntimeEvent::TaskEnqueued(
        TaskBuilder::new("A.yaml").expect_failure(true).build(),
    ));

    core.step(RuntimeEvent::ConverterCrashed {
        item: TestItem::new("A.yaml", false, true),
        error: "boom".to_string(),
    });
    assert_eq!(core.run_state().fail_count, 1);
}

#[test]
fn strict_crash_policy_treats_crash_as_failed_conversion() {
    let mut core = core_with(QueueOrder::Lifo, false, CrashPolicy::Fail);
    core.step(enqueue("A.yaml"));
    core.step(RuntimeEvent::TaskEnqueued(
        TaskBuilder::new("B.yaml").expect_failure(true).build(),
    ));

    core.step(RuntimeEvent::ConverterCrashed {
        item: TestItem::new("A.yaml", false, false),
        error: "boom".to_string(),
    });
    core.step(RuntimeEvent::ConverterCrashed {
        item: TestItem::new("B.yaml", false, true),
        error: "boom".to_string(),
    });

    let state = core.run_state();
    assert_eq!(state.fail_count, 1);
    assert_eq!(state.pass_count, 1);
    assert_eq!(state.failure_paths, vec![PathBuf::from("A.yaml")]);
    assert_eq!(state.warnings.len(), 2);
}

#[test]
fn skips_and_warnings_are_aggregated() {
    let mut core = default_core();
    core.step(RuntimeEvent::ItemSkipped {
        path: PathBuf::from("notes.txt"),
        warning: None,
    });
    core.step(RuntimeEvent::ItemSkipped {
        path: PathBuf::from("bad.yaml"),
        warning: Some("Could not parse file bad.yaml".to_string()),
    });
    core.step(RuntimeEvent::Warning("Could not access path missing".to_string()));
    core.step(RuntimeEvent::DiscoveryFinished);

    let state = core.run_state();
    assert_eq!(state.skipped_count, 2);
    assert_eq!(state.discovered_count, 2);
    assert_eq!(state.classified_count(), 0);
    assert!(state.is_settled());
    assert_eq!(state.warnings.len(), 2);
}

#[test]
fn shutdown_request_interrupts_run() {
    let mut core = default_core();
    core.step(enqueue("A.yaml"));

    let step = core.step(RuntimeEvent::ShutdownRequested);
    assert_eq!(finished(&step), Some(RunEnd::Interrupted));
    assert!(!step.keep_running);
}
