use std::process::ExitCode;

mod app;
mod logging;

use app::AppError;
use fsops::output as out;

fn main() -> ExitCode {
    let args = fsops::cli::parse();
    match app::run(args) {
        Ok(code) => code,
        Err(e @ AppError::Fs(_)) => {
            out::print_error(&e.to_string());
            ExitCode::FAILURE
        }
        Err(e) => {
            out::print_error(&e.to_string());
            ExitCode::from(2)
        }
    }
}
