use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "sequor", version, about = "Ordered HTTP scenario runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Run {
            path,
            env,
            store,
            replay,
            lenient,
            events,
            output,
        } => {
            cmd::run::run_cmd(
                &path,
                env,
                store,
                replay.as_deref(),
                lenient,
                events,
                output,
            )
            .await
        }
        Command::Validate { path, output } => cmd::validate::validate_cmd(&path, output).await,
        Command::Plan { path, output } => cmd::plan::plan_cmd(&path, output).await,
        Command::Vars { store, output } => cmd::vars::vars_cmd(&store, output).await,
    }
}
