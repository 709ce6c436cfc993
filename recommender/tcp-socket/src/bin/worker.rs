// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::Parser;
use recommender_collaborative_filtering::CollaborativeFiltering;
use recommender_core::config::Config;
use recommender_tcp_socket::logging::init_tracing;
use recommender_tcp_socket::socket_worker::{run_worker, WorkerOutcome};
use std::error::Error;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about = "Computes recommendations for one partition", long_about = None)]
struct Cli {
    /// Optional JSON config shared with the coordinator
    #[arg(long)]
    config: Option<String>,

    /// Overrides coordinator_address
    #[arg(long)]
    address: Option<String>,

    /// Overrides max_users_per_partition
    #[arg(long)]
    max_users: Option<usize>,

    /// Overrides score_threshold
    #[arg(long)]
    threshold: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref().map(|path| Config::load(path)) {
        Some(Ok(cfg)) => cfg,
        Some(Err(e)) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
        None => Config::default(),
    };
    if let Some(address) = cli.address {
        config.coordinator_address = address;
    }
    if let Some(max_users) = cli.max_users {
        config.max_users_per_partition = max_users;
    }
    if let Some(threshold) = cli.threshold {
        config.score_threshold = threshold;
    }
    config.validate()?;

    let job = Arc::new(CollaborativeFiltering::from_config(&config));
    match run_worker(&config.coordinator_address, job, config.max_message_bytes).await? {
        WorkerOutcome::NoMoreWork => info!("Worker exiting, nothing to do"),
        WorkerOutcome::Completed { records, users } => {
            info!(records, users, "Worker finished partition")
        }
    }

    Ok(())
}
