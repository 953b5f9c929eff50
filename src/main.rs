mod cli;
mod logging;

use std::process;
use std::time::Instant;

use clap::Parser;
use colored::*;
use dotenv::dotenv;
use tracing::{error, info};

use cli::Cli;
use shardman::{RunEngine, RunReport};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let start = Instant::now();
    let args = Cli::parse();

    let config = match args.into_run_config() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(2);
        }
    };

    match RunEngine::new(config).run() {
        Ok(report) => {
            let code = summarize(&report, start);
            process::exit(code);
        }
        Err(err) => {
            error!("Error: {}", err);
            process::exit(1);
        }
    }
}

fn summarize(report: &RunReport, start: Instant) -> i32 {
    let Some(outcome) = &report.outcome else {
        println!("No models found.");
        return 0;
    };

    info!(
        "Discovery: {}, Sharding: {}, Workers: {}",
        format!("{:.2}s", report.discovery_duration.as_secs_f64()).green(),
        format!("{:.2}s", report.shard_duration.as_secs_f64()).green(),
        format!("{:.2}s", report.worker_duration.as_secs_f64()).green(),
    );
    info!(
        "{} model(s) across {} shard(s), {} copy failure(s)",
        report.models_found,
        report.models_assigned.len(),
        report.copy_failures,
    );

    let failed = outcome.failed_count();
    if failed > 0 {
        eprintln!(
            "{}",
            format!(
                "{} shard(s) failed; check logs under {}",
                failed,
                report.logs_root.display()
            )
            .red()
        );
        return 1;
    }

    println!(
        "All shards completed successfully in {} seconds.",
        format!("{:.2}", start.elapsed().as_secs_f64()).green()
    );
    0
}
