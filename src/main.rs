use clap::Parser;
use ecs_elbless::cli::Cli;
use ecs_elbless::{discovery, report, ElblessError, Result};
use std::process;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let region = cli.resolve_region()?;

    info!(
        "Discovering endpoints in cluster {} ({})",
        cli.cluster, region
    );

    let discovery = discovery::discover(&cli.cluster, &region, &cli.service_filter).await?;

    for skipped in &discovery.skipped {
        warn!("Skipped task {}: {}", skipped.task_id, skipped.reason);
    }

    match cli.output.as_str() {
        "table" => print!("{}", report::render(&discovery.services)),
        "json" => println!("{}", report::render_json(&discovery)?),
        other => {
            return Err(ElblessError::Config(format!(
                "unknown output format {:?} (expected table or json)",
                other
            )))
        }
    }

    Ok(())
}
