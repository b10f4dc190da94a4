use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use dynoprune::cli::Cli;
use dynoprune::logging::init_logging;
use dynoprune::{build_client, run_sweep, SweepError, SweepOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if let Err(err) = init_logging(cli.verbose, cli.log_format) {
        eprintln!("failed to install logger: {}", err);
        return ExitCode::FAILURE;
    }

    match run(&cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<SweepOutcome, SweepError> {
    let client = build_client(&cli.aws_config()).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_sweep(&client, &cli.sweep_options(), &mut out).await
}
