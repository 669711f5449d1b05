use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use invoicely_cli::{App, AppConfig, Cli, Outcome};
use invoicely_core::SystemClock;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::from_env();

    invoicely_observability::init(config.log_format);
    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }

    let app = App::build(&config, Arc::new(SystemClock))?;
    let mut stdout = std::io::stdout().lock();

    Ok(match app.run(&cli.command, &mut stdout)? {
        Outcome::Success => ExitCode::SUCCESS,
        Outcome::Failure => ExitCode::FAILURE,
    })
}
