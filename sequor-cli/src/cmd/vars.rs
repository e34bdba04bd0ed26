use std::path::Path;

use sequor_store::{FileStore, VariableStore};

use crate::exit_codes;
use crate::output::{print_error, print_result};
use crate::OutputArgs;

pub async fn vars_cmd(store: &Path, output: OutputArgs) -> i32 {
    let file_store = FileStore::new(store);
    match file_store.snapshot().await {
        Ok(vars) => {
            print_result(output.format, output.quiet, &vars);
            exit_codes::SUCCESS
        }
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to read store {}: {e}", store.display()),
            );
            exit_codes::RUNTIME_ERROR
        }
    }
}
