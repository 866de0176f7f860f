// tests/report.rs

use std::path::PathBuf;

use specsweep::console::Palette;
use specsweep::exit_codes;
use specsweep::report::{finalize, RunState};
use specsweep_test_utils::capture::SharedBuffer;

fn state(pass: usize, fail: usize) -> RunState {
    RunState {
        pass_count: pass,
        fail_count: fail,
        discovered_count: pass + fail,
        failure_paths: (0..fail).map(|i| PathBuf::from(format!("f{i}.yaml"))).collect(),
        ..RunState::default()
    }
}

#[test]
fn exit_code_requires_a_pass_and_no_failures() {
    assert_eq!(finalize(&state(3, 0)).1, exit_codes::OK);
    assert_eq!(finalize(&state(3, 1)).1, exit_codes::FAILED);
    assert_eq!(finalize(&state(0, 0)).1, exit_codes::FAILED);
    assert_eq!(finalize(&state(0, 2)).1, exit_codes::FAILED);
}

#[test]
fn report_sorts_warnings_and_failures() {
    let state = RunState {
        pass_count: 1,
        fail_count: 2,
        failure_paths: vec![PathBuf::from("z.yaml"), PathBuf::from("a.json")],
        warnings: vec![
            "Could not parse file y.yaml".to_string(),
            "Converter failed b.yaml".to_string(),
        ],
        ..RunState::default()
    };

    let (report, _) = finalize(&state);
    assert_eq!(report.failures, vec!["a.json".to_string(), "z.yaml".to_string()]);
    assert_eq!(
        report.render(&Palette::plain()),
        "\nWarnings:\nConverter failed b.yaml\nCould not parse file y.yaml\n\
         \nFailures:\na.json\nz.yaml\n\
         \nTests: 1 passing, 2 failing, 2 warnings\n"
    );
}

#[test]
fn clean_run_renders_only_the_summary() {
    let (report, _) = finalize(&state(2, 0));
    assert_eq!(
        report.render(&Palette::plain()),
        "\nTests: 2 passing, 0 failing, 0 warnings\n"
    );
}

#[test]
fn quiet_console_still_prints_the_report() {
    let buffer = SharedBuffer::new();
    let mut console = buffer.console(true);
    let (report, _) = finalize(&state(1, 1));

    console.write_raw(&report.render(&console.palette()));

    assert_eq!(
        buffer.contents(),
        "\nFailures:\nf0.yaml\n\nTests: 1 passing, 1 failing, 0 warnings\n"
    );
}

#[test]
fn coloured_report_wraps_failures_in_red() {
    let (report, _) = finalize(&state(0, 1));
    let rendered = report.render(&Palette::new(true));
    assert!(rendered.contains("\x1b[31mf0.yaml\x1b[0m"));
}

#[test]
fn settled_state_accounts_for_every_candidate() {
    let mut state = RunState::new();
    state.record_discovered();
    state.record_discovered();
    state.record_skip();
    assert!(!state.is_settled());

    state.pass_count += 1;
    assert!(state.is_settled());
    assert_eq!(state.classified_count(), 1);
}
