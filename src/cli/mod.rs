mod handlers;
pub mod parse;
pub mod signal;
pub mod tty_raw;

use clap::Parser;
pub use parse::Cli;

use crate::core::error::FieldError;

pub fn run() -> Result<(), FieldError> {
    let cli = parse::Cli::parse();
    match cli.cmd {
        parse::Command::Run(a) => handlers::run(a),
        parse::Command::Frame(a) => handlers::frame(&a),
        parse::Command::Explain => {
            handlers::explain(crate::core::TIME_STEP);
            Ok(())
        }
        parse::Command::Palettes => {
            handlers::palettes();
            Ok(())
        }
        parse::Command::Colors => {
            handlers::colors();
            Ok(())
        }
        parse::Command::Examples => {
            handlers::examples();
            Ok(())
        }
    }
}
