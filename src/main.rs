use std::process::ExitCode;

fn main() -> ExitCode {
    match julia_field::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
