use std::path::Path;

use sequor_core::{parse_suite_str, plan_suite, validate_suite, DocumentFormat};

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::OutputArgs;

pub async fn plan_cmd(path: &Path, output: OutputArgs) -> i32 {
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

    let plan = plan_suite(&parsed.suite);
    if output.format == OutputFormat::Text && !output.quiet {
        for io in &plan.scenarios {
            let requires: Vec<&str> = io.requires.iter().map(|s| s.as_str()).collect();
            let provides: Vec<&str> = io.provides.iter().map(|s| s.as_str()).collect();
            println!(
                "{}: requires [{}] provides [{}]",
                io.name,
                requires.join(", "),
                provides.join(", ")
            );
        }
        for u in &plan.unseeded {
            println!(
                "warning: `{}` needs `{}` before any scenario provides it",
                u.required_by, u.variable
            );
        }
    } else {
        print_result(output.format, output.quiet, &plan);
    }
    exit_codes::SUCCESS
}
