//! Stagehand CLI - frame-timed layouts for Mermaid-style diagrams

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();
    let mut app = cli::StagehandApp::new();

    // Logging is initialized inside run() from the flags and environment
    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
