use std::process::ExitCode;

mod audio;
mod cli;
mod config;
mod error;
mod input;
mod library;
mod logging;
mod runtime;

fn main() -> ExitCode {
    match runtime::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("spindle: {e}");
            ExitCode::FAILURE
        }
    }
}
