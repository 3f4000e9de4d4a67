//! dupefinder - duplicate file finder
//!
//! Entry point for the dupefinder CLI application.

use std::process;

use clap::Parser;
use dupefinder::{
    cli::Cli,
    error::{ErrorReport, ExitCode},
};

fn main() -> process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version text go to stdout
            let _ = err.print();
            return ExitCode::for_parse_error(&err)
                .map_or(process::ExitCode::SUCCESS, Into::into);
        }
    };
    let json_errors = cli.json_errors;

    match dupefinder::run_app(cli) {
        Ok(code) => code.into(),
        Err(err) => {
            let exit_code = ExitCode::Failed;
            let report = ErrorReport::new(&err, exit_code);

            match serde_json::to_string_pretty(&report) {
                Ok(json) if json_errors => eprintln!("{}", json),
                _ => eprintln!("[{}] Error: {}", report.code, report.message),
            }

            exit_code.into()
        }
    }
}
