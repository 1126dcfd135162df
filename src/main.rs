//! linkfield - resolve, validate and render typed link fields

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = linkfield::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
