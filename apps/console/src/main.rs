//! # Dreams POS Console Entry Point
//!
//! The setup lives in lib.rs so it can be tested; this only maps the
//! outcome to an exit code.

use std::process::ExitCode;

fn main() -> ExitCode {
    match dreams_console::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
