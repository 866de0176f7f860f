// src/lib.rs

pub mod classify;
pub mod cli;
pub mod config;
pub mod console;
pub mod convert;
pub mod discover;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod exit_codes;
pub mod fs;
pub mod logging;
pub mod report;
pub mod types;
pub mod validate;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::classify::ResultClassifier;
use crate::cli::CliArgs;
use crate::config::{load_for_cli, ConfigFile};
use crate::console::{Console, Palette};
use crate::convert::{completion_channel, CommandConverter, ConvertOptions};
use crate::discover::{Orchestrator, PathSpecs};
use crate::engine::{CoreRuntime, RunEnd, Runtime, RuntimeEvent, RuntimeOptions};
use crate::fs::RealFileSystem;
use crate::report::finalize;
use crate::validate::{BuiltinValidator, CommandValidator, Validator};

/// High-level entry point used by `main.rs`. Returns the process exit code.
///
/// This wires together:
/// - config loading
/// - discovery (on a blocking worker)
/// - the core runtime and its async shell
/// - converter and validator
/// - Ctrl-C handling
/// - the final report
pub async fn run(args: CliArgs) -> Result<i32> {
    let cfg = load_for_cli(&args)?;
    // Banner and final report; per-file lines go through the runtime's
    // own console.
    let mut out = Console::stdout(Palette::from_env(), args.quiet);
    out.write_raw("Gathering...\n");

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let (completion_tx, completion_rx) = completion_channel();
    let converter = CommandConverter::new(cfg.converter_cmd.clone(), completion_tx);
    let classifier = ResultClassifier::new(build_validator(&cfg), args.verbose);

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    // Discovery runs alongside conversions and talks to the runtime only
    // through the event channel.
    let specs = PathSpecs::new(args.paths.clone(), args.fail.clone())
        .or_default(&cfg.run.default_path);
    let options = ConvertOptions {
        resolve: args.resolve,
        verbose: args.verbose,
        patch: true,
        encoding: cfg.run.encoding,
    };
    let orchestrator = Orchestrator::new(RealFileSystem, cfg.run.encoding, options, rt_tx);
    tokio::task::spawn_blocking(move || orchestrator.run(&specs));

    let runtime_options = RuntimeOptions {
        stop_on_failure: args.stop,
        order: cfg.run.order,
        crash_policy: cfg.run.converter_crash,
    };
    info!(?runtime_options, converter = %cfg.converter_cmd, "starting run");

    let core = CoreRuntime::new(runtime_options);
    let console = Console::stdout(out.palette(), args.quiet);
    let runtime = Runtime::new(core, rt_rx, completion_rx, converter, classifier, console);
    let summary = runtime.run().await?;

    let (report, mut code) = finalize(&summary.state);
    if summary.end != RunEnd::Completed {
        warn!(end = ?summary.end, "run did not complete");
        code = exit_codes::FAILED;
    }
    out.write_raw(&report.render(&out.palette()));

    Ok(code)
}

fn build_validator(cfg: &ConfigFile) -> Box<dyn Validator> {
    match &cfg.validator_cmd {
        Some(cmd) => Box::new(CommandValidator::new(cmd.clone())),
        None => Box::new(BuiltinValidator),
    }
}
