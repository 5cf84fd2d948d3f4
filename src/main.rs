//! uiset-driver: Scripted UI Harness Driver
//!
//! Usage:
//!   uiset-driver [--host HOST] [--port PORT] [--seed SEED]   # Run the slider/live/reset script

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use uiset_driver::connection::{ConnectionConfig, Endpoint};
use uiset_driver::runner::{Runner, RunnerConfig};

/// Replay randomized uiset commands against a remote UI test harness
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Harness host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Harness port
    #[arg(short, long, default_value_t = 27960)]
    port: u16,

    /// View addressed by slider and live mode commands
    #[arg(long, default_value = "ScatterPlotView0")]
    view: String,

    /// Top-level iterations
    #[arg(long, default_value_t = 5)]
    iterations: usize,

    /// Slider commands per iteration
    #[arg(long, default_value_t = 10)]
    sliders: usize,

    /// Pause after each slider command
    #[arg(long, default_value = "5s")]
    slider_delay: humantime::Duration,

    /// Pause after a live toggle or view reset
    #[arg(long, default_value = "5s")]
    action_delay: humantime::Duration,

    /// Seed for coin flips and slider values
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum bytes read per response
    #[arg(long, default_value_t = 1024)]
    recv_buffer: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("debug")
        ).init();
    } else {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("info")
        ).init();
    }

    let config = RunnerConfig {
        endpoint: Endpoint::new(args.host, args.port),
        connection: ConnectionConfig {
            recv_buffer: args.recv_buffer,
        },
        view: args.view,
        iterations: args.iterations,
        sliders_per_iteration: args.sliders,
        slider_delay: args.slider_delay.into(),
        action_delay: args.action_delay.into(),
        ..Default::default()
    };

    let rng = match args.seed {
        Some(seed) => {
            info!("🎲 Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    info!("🚀 Driving harness at {}", config.endpoint);
    let summary = Runner::new(config, rng).run().await?;

    println!();
    println!("  Iterations:     {}", summary.iterations);
    println!("  Slider moves:   {}", summary.slider_commands);
    println!("  Live toggles:   {}", summary.live_toggles);
    println!("  View resets:    {}", summary.view_resets);
    println!("  Total commands: {}", summary.total_commands());

    Ok(())
}
