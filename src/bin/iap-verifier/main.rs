//! iap-verifier CLI entry point.

mod cli;

use clap::Parser;
use cli::Cli;
use iap_verifier::util::IapUtil;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the result.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            cli.json_logs
                .then(|| fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!cli.json_logs).then(|| fmt::layer().with_writer(std::io::stderr)),
        )
        .init();

    let input = cli.read_invocation()?;
    info!(task_name = %input.task_name, "iap-verifier v{}", env!("CARGO_PKG_VERSION"));

    let output = IapUtil::from_env()?.handle_invocation(&input).await?;
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}
