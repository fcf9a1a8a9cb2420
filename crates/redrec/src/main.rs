use std::process::ExitCode;

use clap::Parser;
use redrec::app::{self, Outcome, TerminalPicker};
use redrec::cli::Cli;
use redrec::config::EnvConfig;
use redrec::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let env = EnvConfig::from_env();
    logging::init(env.log_filter.as_deref());

    match app::run(&cli, &env, &mut TerminalPicker) {
        Ok(Outcome::Recorded { path, .. }) => {
            println!("Recording saved to {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(Outcome::Cancelled) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
