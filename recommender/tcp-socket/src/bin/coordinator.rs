// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::Parser;
use recommender_core::config::Config;
use recommender_core::dataset::Dataset;
use recommender_tcp_socket::coordinator::Coordinator;
use recommender_tcp_socket::logging::init_tracing;
use recommender_tcp_socket::query_prompt::run_prompt;
use std::error::Error;
use std::io;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about = "Distributes rating partitions and serves category lookups", long_about = None)]
struct Cli {
    #[arg(long, default_value = "config.json")]
    config: String,

    /// Overrides dataset_path
    #[arg(long)]
    dataset: Option<String>,

    /// Overrides bind_address
    #[arg(long)]
    bind: Option<String>,

    /// Overrides max_clients
    #[arg(long)]
    workers: Option<usize>,

    /// Overrides num_partitions
    #[arg(long)]
    partitions: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    let start_time = Instant::now();

    let mut config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(path = %cli.config, error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };
    if let Some(dataset) = cli.dataset {
        config.dataset_path = dataset;
    }
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }
    if let Some(workers) = cli.workers {
        config.max_clients = workers;
    }
    if let Some(partitions) = cli.partitions {
        config.num_partitions = partitions;
    }
    config.validate()?;

    info!(
        dataset = %config.dataset_path,
        partitions = config.num_partitions,
        workers = config.max_clients,
        threshold = config.score_threshold,
        "Starting coordinator"
    );

    let dataset = Dataset::load_csv(&config.dataset_path)?;
    let coordinator = Coordinator::new(dataset, &config)?;
    let listener = TcpListener::bind(&config.bind_address).await?;
    info!(address = %listener.local_addr()?, "Listening for workers");

    let shutdown = CancellationToken::new();
    let shutdown_on_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C received, initiating shutdown");
            shutdown_on_signal.cancel();
        }
    });

    let summary = coordinator.run(listener, shutdown.clone()).await;
    info!(
        accepted = summary.accepted,
        completed = summary.completed,
        terminated = summary.terminated,
        failed = summary.failed,
        categories = summary.categories,
        unassigned_partitions = coordinator.partitions_remaining(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Recommendations ready"
    );

    if shutdown.is_cancelled() {
        return Ok(());
    }

    let table = coordinator.table();
    tokio::task::spawn_blocking(move || run_prompt(&table, io::stdin().lock(), io::stdout()))
        .await??;

    Ok(())
}
