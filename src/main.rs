// ABOUTME: Entry point for the greenlight CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use greenlight::config::{self, Config};
use greenlight::cutover;
use greenlight::error::Result;
use greenlight::platform::HttpPlatform;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { app, force } => {
            let cwd = env::current_dir().expect("Failed to get current directory");
            config::init_config(&cwd, app.as_deref(), force)
        }
        Commands::Cutover { target } => {
            let config = load_config(target.as_deref())?;
            run_cutover(config).await
        }
        Commands::Status { target } => {
            let config = load_config(target.as_deref())?;
            show_status(config).await
        }
    }
}

fn load_config(target: Option<&str>) -> Result<Config> {
    let cwd = env::current_dir().expect("Failed to get current directory");
    let config = Config::discover(&cwd)?;

    // Apply target overrides if specified
    match target {
        Some(t) => config.for_target(t),
        None => Ok(config),
    }
}

/// Run the stage-2 cutover against the configured platform.
async fn run_cutover(config: Config) -> Result<()> {
    let live = config.live_identity();

    println!(
        "Cutting over {} on route {} via {}",
        live.name(),
        live.route(),
        config.api
    );

    let platform = HttpPlatform::new(&config.api, config.token.clone(), config.request_timeout)?;

    println!("  → Migrating traffic to the green candidate...");
    if let Err(e) = cutover::run_cutover(&platform, &live).await {
        eprintln!("  ✗ Cutover halted: {e}");
        return Err(e.into());
    }

    println!(
        "  ✓ Route {} now serves {}; previous version retained as {}-blue (stopped)",
        live.route(),
        live.name(),
        live.name()
    );
    Ok(())
}

/// Query and print live, candidate, and backup status.
async fn show_status(config: Config) -> Result<()> {
    let live = config.live_identity();
    let platform = HttpPlatform::new(&config.api, config.token.clone(), config.request_timeout)?;

    let report = cutover::survey(&platform, &live).await?;

    for (label, (identity, detail)) in [
        ("live", &report.live),
        ("candidate", &report.green),
        ("backup", &report.blue),
    ] {
        match detail {
            Some(d) => {
                let state = d.state.as_deref().unwrap_or("unknown");
                let instances = d
                    .instances
                    .map(|n| format!(", {n} instance(s)"))
                    .unwrap_or_default();
                println!("{label}: {identity} is {state}{instances}");
            }
            None => println!("{label}: {identity} is absent"),
        }
    }

    Ok(())
}
