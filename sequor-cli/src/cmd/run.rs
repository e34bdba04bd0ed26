use std::path::Path;
use std::sync::Arc;

use sequor_core::{parse_suite_str, validate_suite, DocumentFormat};
use sequor_exec::executor::{
    EventSink, HttpTransport, Leniency, NoOpEventSink, ReplayTransport, ReqwestTransport,
    RunReport, Runner, RunnerConfig, StdoutEventSink,
};
use sequor_exec::{parse_env_document, select_env};
use sequor_store::{FileStore, MemoryStore, VariableStore};

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{EnvArgs, OutputArgs, StoreArgs};

pub async fn run_cmd(
    path: &Path,
    env_args: EnvArgs,
    store_args: StoreArgs,
    replay: Option<&Path>,
    lenient: bool,
    events: bool,
    output: OutputArgs,
) -> i32 {
    let content = match std::fs::read_to_string(path) {
        Ok(v) => v,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to read {}: {e}", path.display()),
            );
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let parsed = match parse_suite_str(&content, DocumentFormat::Auto) {
        Ok(p) => p,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::VALIDATION_FAILED;
        }
    };
    if let Err(e) = validate_suite(&parsed.suite) {
        print_error(output.format, output.quiet, &e.to_string());
        return exit_codes::VALIDATION_FAILED;
    }

    let env = {
        let content = match std::fs::read_to_string(&env_args.config) {
            Ok(v) => v,
            Err(e) => {
                print_error(
                    output.format,
                    output.quiet,
                    &format!("failed to read {}: {e}", env_args.config.display()),
                );
                return exit_codes::RUNTIME_ERROR;
            }
        };
        let doc = match parse_env_document(&content) {
            Ok(d) => d,
            Err(e) => {
                print_error(output.format, output.quiet, &e.to_string());
                return exit_codes::RUNTIME_ERROR;
            }
        };
        match select_env(&doc, &env_args.env) {
            Ok(env) => env,
            Err(e) => {
                print_error(output.format, output.quiet, &e.to_string());
                return exit_codes::RUNTIME_ERROR;
            }
        }
    };

    let store: Arc<dyn VariableStore> = if store_args.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::new(&store_args.store))
    };

    let transport: Arc<dyn HttpTransport> = match replay {
        Some(replay_path) => {
            let content = match std::fs::read_to_string(replay_path) {
                Ok(v) => v,
                Err(e) => {
                    print_error(
                        output.format,
                        output.quiet,
                        &format!("failed to read {}: {e}", replay_path.display()),
                    );
                    return exit_codes::RUNTIME_ERROR;
                }
            };
            match ReplayTransport::parse(&content) {
                Ok(t) => Arc::new(t),
                Err(e) => {
                    print_error(output.format, output.quiet, &e.to_string());
                    return exit_codes::RUNTIME_ERROR;
                }
            }
        }
        None => match ReqwestTransport::new() {
            Ok(t) => Arc::new(t),
            Err(e) => {
                print_error(output.format, output.quiet, &e.to_string());
                return exit_codes::RUNTIME_ERROR;
            }
        },
    };

    let sink: Arc<dyn EventSink> = if events {
        Arc::new(StdoutEventSink)
    } else {
        Arc::new(NoOpEventSink)
    };

    let leniency = if lenient {
        Leniency::Lenient
    } else {
        Leniency::Strict
    };
    let runner = Runner::new(store, transport, sink, env)
        .with_config(RunnerConfig { leniency });

    let report = runner.run(&parsed.suite).await;
    print_report(&report, &output);

    if report.ok() {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUN_FAILED
    }
}

fn print_report(report: &RunReport, output: &OutputArgs) {
    if output.format == OutputFormat::Text && !output.quiet {
        for o in &report.outcomes {
            match (&o.stage, &o.detail) {
                (None, _) => println!("pass: {}", o.name),
                (Some(stage), detail) => println!(
                    "fail: {} [{}] {}",
                    o.name,
                    stage.as_str(),
                    detail.as_deref().unwrap_or_default()
                ),
            }
        }
        println!(
            "{} passed, {} failed, {} errored",
            report.passed_count(),
            report.failed_count(),
            report.errored_count()
        );
    } else {
        print_result(output.format, output.quiet, report);
    }
}
