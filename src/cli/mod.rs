use crate::{ElblessError, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "ecs-elbless")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Discover public and private endpoints of ECS tasks without a load balancer", long_about = None)]
pub struct Cli {
    /// ECS cluster ID
    #[arg(short, long)]
    pub cluster: String,

    /// AWS region (falls back to AWS_DEFAULT_REGION)
    #[arg(short, long)]
    pub region: Option<String>,

    /// Glob filter on service (container) names, e.g. 'web-*'
    #[arg(short = 'f', long, default_value = "*")]
    pub service_filter: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub output: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Effective region: the --region flag wins, then AWS_DEFAULT_REGION.
    pub fn resolve_region(&self) -> Result<String> {
        match &self.region {
            Some(region) if !region.is_empty() => Ok(region.clone()),
            _ => match std::env::var("AWS_DEFAULT_REGION") {
                Ok(region) if !region.is_empty() => Ok(region),
                _ => Err(ElblessError::MissingRegion),
            },
        }
    }
}
