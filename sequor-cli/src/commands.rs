use std::path::PathBuf;

use clap::Subcommand;

use crate::args::{EnvArgs, OutputArgs, StoreArgs};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute a scenario suite in declared order.
    Run {
        /// Suite file (JSON or YAML).
        path: PathBuf,
        #[command(flatten)]
        env: EnvArgs,
        #[command(flatten)]
        store: StoreArgs,
        /// Answer requests from a canned-response file instead of the network.
        #[arg(long)]
        replay: Option<PathBuf>,
        /// Leave unresolved placeholders in place instead of failing RESOLVE.
        #[arg(long)]
        lenient: bool,
        /// Emit JSON-line events while running.
        #[arg(long)]
        events: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Parse and validate a suite without executing it.
    Validate {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show which variables each scenario requires and provides.
    Plan {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the current variable store document.
    Vars {
        /// Variable store file to inspect.
        #[arg(long, default_value = "vars.json")]
        store: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}
