mod audit;
mod cli;
mod config;
mod error;
mod logging;
mod model;
mod providers;
mod report;

use anyhow::Result;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: cli::Args) -> Result<()> {
    logging::init(args.verbose)?;

    let [manage, grow] =
        providers::connect(config::api_key_from_env(), args.config.as_deref())?;
    let plan = args.plan();
    info!(resources = ?plan.resources, "starting audit");

    let outcomes = audit::run(&manage, &grow, &plan).await?;
    for outcome in &outcomes {
        println!(
            "{}: {} mismatch(es) written to {}",
            outcome.kind,
            outcome.mismatches.len(),
            outcome.report_path.display()
        );
    }

    Ok(())
}
