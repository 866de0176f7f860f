// tests/properties.rs

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

use proptest::prelude::*;
use specsweep::classify::{Classification, Verdict};
use specsweep::engine::{
    CoreCommand, CoreRuntime, CrashPolicy, QueueOrder, RunEnd, RuntimeEvent, RuntimeOptions,
};
use specsweep_test_utils::builders::{conversion_failed, converted, openapi_doc, TaskBuilder};

/// What happens to one discovered candidate.
#[derive(Debug, Clone, Copy)]
enum Fate {
    Skipped,
    Valid,
    Invalid,
    ConversionFails,
    Crashes,
}

fn fate_strategy() -> impl Strategy<Value = Fate> {
    prop_oneof![
        Just(Fate::Skipped),
        Just(Fate::Valid),
        Just(Fate::Invalid),
        Just(Fate::ConversionFails),
        Just(Fate::Crashes),
    ]
}

fn expected_verdict(fate: Fate, expect_failure: bool, policy: CrashPolicy) -> Option<Verdict> {
    match fate {
        Fate::Skipped => None,
        Fate::Valid => Some(Verdict::judge(true, expect_failure)),
        Fate::Invalid | Fate::ConversionFails => Some(Verdict::judge(false, expect_failure)),
        Fate::Crashes => Some(match (policy, expect_failure) {
            (CrashPolicy::Pass, false) => Verdict::Pass,
            (CrashPolicy::Pass, true) => Verdict::Fail,
            (CrashPolicy::Fail, false) => Verdict::Fail,
            (CrashPolicy::Fail, true) => Verdict::Pass,
        }),
    }
}

proptest! {
    #[test]
    fn verdict_is_pass_exactly_when_outcome_disagrees_with_expectation(
        valid in any::<bool>(),
        expect_failure in any::<bool>(),
    ) {
        prop_assert_eq!(Verdict::judge(valid, expect_failure).is_pass(), valid != expect_failure);
    }

    /// Drives the core with a scripted converter. At most one task may be
    /// active, and the final counts must follow the classification law.
    #[test]
    fn every_candidate_is_classified_or_skipped(
        corpus in proptest::collection::vec((fate_strategy(), any::<bool>()), 0..24),
        fifo in any::<bool>(),
        strict_crashes in any::<bool>(),
    ) {
        let policy = if strict_crashes { CrashPolicy::Fail } else { CrashPolicy::Pass };
        let mut core = CoreRuntime::new(RuntimeOptions {
            stop_on_failure: false,
            order: if fifo { QueueOrder::Fifo } else { QueueOrder::Lifo },
            crash_policy: policy,
        });

        let mut fates = HashMap::new();
        let mut events = VecDeque::new();
        for (i, (fate, expect_failure)) in corpus.iter().enumerate() {
            let path = format!("doc{i}.yaml");
            fates.insert(PathBuf::from(&path), (*fate, *expect_failure));
            events.push_back(match fate {
                Fate::Skipped => RuntimeEvent::ItemSkipped { path: PathBuf::from(&path), warning: None },
                _ => RuntimeEvent::TaskEnqueued(
                    TaskBuilder::new(&path).expect_failure(*expect_failure).build(),
                ),
            });
        }
        events.push_back(RuntimeEvent::DiscoveryFinished);

        let mut active: Option<PathBuf> = None;
        let mut end = None;
        while let Some(event) = events.pop_front() {
            if matches!(
                event,
                RuntimeEvent::TaskClassified(_) | RuntimeEvent::ConverterCrashed { .. }
            ) {
                active = None;
            }
            let step = core.step(event);
            for command in step.commands {
                match command {
                    CoreCommand::Activate(task) => {
                        prop_assert!(active.is_none(), "two tasks active at once");
                        let path = task.item.path.clone();
                        active = Some(path.clone());
                        let (fate, _) = fates[&path];
                        events.push_back(match fate {
                            Fate::Crashes => RuntimeEvent::ConverterCrashed {
                                item: task.item.clone(),
                                error: "boom".to_string(),
                            },
                            Fate::ConversionFails => {
                                RuntimeEvent::ConversionFinished(conversion_failed(task, "bad"))
                            }
                            _ => RuntimeEvent::ConversionFinished(converted(task, openapi_doc("x"))),
                        });
                    }
                    CoreCommand::Classify(outcome) => {
                        let (fate, expect_failure) = fates[&outcome.item.path];
                        let valid = matches!(fate, Fate::Valid);
                        let succeeded = outcome.result.is_ok() && valid;
                        events.push_back(RuntimeEvent::TaskClassified(Classification {
                            item: outcome.item,
                            verdict: Verdict::judge(succeeded, expect_failure),
                            lines: Vec::new(),
                        }));
                    }
                    CoreCommand::Finish(e) => end = Some(e),
                }
            }
            if !step.keep_running {
                break;
            }
        }

        prop_assert_eq!(end, Some(RunEnd::Completed));
        let state = core.run_state();
        prop_assert!(state.is_settled());
        prop_assert_eq!(state.discovered_count, corpus.len());

        let verdicts: Vec<Verdict> = corpus
            .iter()
            .filter_map(|(fate, expect)| expected_verdict(*fate, *expect, policy))
            .collect();
        let passes = verdicts.iter().filter(|v| v.is_pass()).count();
        prop_assert_eq!(state.pass_count, passes);
        prop_assert_eq!(state.fail_count, verdicts.len() - passes);
    }
}
