//! Main entry point for the `glossa` binary.

use std::process::ExitCode;

use clap::Parser;
use glossa_cli::Cli;
use glossa_log::LogConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = glossa_log::init(LogConfig::for_verbosity(cli.verbose, cli.quiet)) {
        eprintln!("warning: {e}");
    }

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error[{}]: {e}", e.code());
            e.exit_code()
        }
    }
}
