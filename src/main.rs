use std::io;
use std::process::ExitCode;
use std::time::Duration;

use bdi_rates::{Cli, UreqTransport, run};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Cli::parse();

    // stdout is reserved for rates
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let transport = UreqTransport::new(args.timeout.map(Duration::from_secs));
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    match run(&args, stdin, &mut stdout, &transport) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
