//! # LED Driver Binary
//!
//! Raspberry Pi GPIO LED platform driver. Loads a board description,
//! binds the LED controller to the matching device node (LED on),
//! then waits for a shutdown signal and unbinds (LED off).
//!
//! # Usage
//!
//! ```bash
//! # Run against real hardware
//! led_driver --config config/board.toml
//!
//! # Run with the simulated line provider
//! led_driver --config config/board.toml --simulate
//!
//! # Verbose logging
//! led_driver --config config/board.toml -s -v
//! ```

#![deny(warnings)]

use clap::Parser;
use led_common::config::BoardConfig;
use led_common::line::LineProvider;
use led_driver::controller::LedController;
use led_driver::providers::cdev::CdevLineProvider;
use led_driver::providers::sim::SimLineProvider;
use led_driver::registry::PlatformRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// LED Driver - Raspberry Pi GPIO LED platform driver
#[derive(Parser, Debug)]
#[command(name = "led_driver")]
#[command(author = "Vo Truong")]
#[command(version)]
#[command(about = "Raspberry Pi GPIO LED platform driver")]
#[command(long_about = None)]
struct Args {
    /// Path to board description file (board.toml)
    #[arg(short, long, default_value = "/etc/led_driver/board.toml")]
    config: PathBuf,

    /// Use the simulated line provider instead of the GPIO character device
    #[arg(short = 's', long)]
    simulate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("LED driver startup failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing
    setup_tracing(&args);

    info!("LED driver v{} starting...", env!("CARGO_PKG_VERSION"));

    let board = BoardConfig::load(&args.config)?;
    info!(
        "Loaded {} device node(s) from {}",
        board.devices.len(),
        args.config.display()
    );

    let provider: Box<dyn LineProvider> = if args.simulate {
        info!("Simulation mode enabled");
        Box::new(SimLineProvider::new())
    } else {
        Box::new(CdevLineProvider::new("led_driver"))
    };

    let mut registry = PlatformRegistry::new();
    registry.register(Box::new(LedController::new(provider)));

    let report = registry.probe(&board.devices);
    info!(
        "Probe complete: {} bound, {} failed, {} skipped, {} unmatched",
        report.bound, report.failed, report.skipped, report.unmatched
    );
    if report.bound == 0 {
        warn!("No device node bound; waiting for shutdown signal anyway");
    }

    // Setup signal handler.
    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        flag.store(false, Ordering::SeqCst);
    })?;

    while running.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(100));
    }

    registry.remove_all();
    info!("LED driver shutdown complete");
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
