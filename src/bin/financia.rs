use std::process::ExitCode;

use financia::cli::{output, run_cli};

fn main() -> ExitCode {
    financia::init();
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("Fatal: {err}"));
            ExitCode::FAILURE
        }
    }
}
