//! gitwalk binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match gitwalk::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            gitwalk::ui::output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
