use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pipeline_secrets::app::{App, Settings};
use pipeline_secrets::cli::{Cli, Mode};
use pipeline_secrets::config::{Config, Tools};
use pipeline_secrets::{constants, error, output, paths};

fn report(e: &anyhow::Error, tools: &Tools) -> ExitCode {
    output::error(&error::format_error_chain(e));
    if let Some(hint) = error::remediation_hint(e, tools) {
        output::hint(&hint);
    }
    ExitCode::FAILURE
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Help has no side effects and must not depend on the environment.
    if cli.mode() == Mode::Help {
        App::show_help();
        return ExitCode::SUCCESS;
    }

    let filter = EnvFilter::try_from_env(constants::env::LOG).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("pipeline_secrets=debug")
        } else {
            EnvFilter::new("pipeline_secrets=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .init();

    if let Some(path) = paths::load_env_file() {
        tracing::debug!(path = %path.display(), "loaded env file");
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => return report(&e, &Tools::default()),
    };
    let tools = config.tools.clone();

    match App::run(Settings::new(&cli, config)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e, &tools),
    }
}
