use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct EnvArgs {
    /// Environment name to select from the config document.
    #[arg(long, default_value = "test")]
    pub env: String,
    /// Environment config file (JSON or YAML).
    #[arg(long, default_value = "config/env.yaml")]
    pub config: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct StoreArgs {
    /// Variable store file, created on first update.
    #[arg(long, default_value = "vars.json")]
    pub store: PathBuf,
    /// Keep variables in memory only; nothing is persisted.
    #[arg(long)]
    pub ephemeral: bool,
}
