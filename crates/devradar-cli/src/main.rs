//! devradar: terminal client for the nearby-developers feed.
//!
//! Loads config, takes the device position from the command line, and drives
//! a [`Radar`] from stdin commands, printing every snapshot change.

mod cli;
mod commands;
mod display;
mod settings;

use std::sync::Arc;

use devradar_common::{Coordinates, FilterTags, RadarError};
use devradar_feed::{
    FixedLocationProvider, HttpSearchGateway, LocationProvider, Radar, RadarHandle,
    RealtimeClient,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::commands::{Input, HELP};

/// Filter used when neither the command line nor the config names one.
const DEFAULT_DIRECTIVE: &str = "devradar=info";

#[tokio::main]
async fn main() {
    let args = cli::parse();

    // The config supplies the fallback filter, so load it under a provisional
    // subscriber to keep the loader's warnings visible.
    let config = tracing::subscriber::with_default(
        subscriber(log_filter(args.log_level.as_deref(), DEFAULT_DIRECTIVE)),
        || devradar_config::load_config(args.config.as_deref()),
    );
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("devradar: {e}");
            std::process::exit(2);
        }
    };
    let filter = log_filter(args.log_level.as_deref(), &config.logging.level);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber(filter)) {
        eprintln!("devradar: failed to install logger: {e}");
    }

    if let Err(e) = run(args, config).await {
        eprintln!("devradar: {e}");
        std::process::exit(1);
    }
}

/// `--log-level`, else `RUST_LOG`, else `fallback`.
fn log_filter(cli_directive: Option<&str>, fallback: &str) -> EnvFilter {
    match cli_directive {
        Some(directive) => EnvFilter::try_new(directive),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback)),
    }
    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

fn subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

async fn run(args: cli::Args, config: devradar_config::RadarConfig) -> Result<(), RadarError> {
    let location: Arc<dyn LocationProvider> = match (args.latitude, args.longitude) {
        (Some(latitude), Some(longitude)) => Arc::new(FixedLocationProvider::at(
            Coordinates::new(latitude, longitude)?,
        )),
        _ => Arc::new(FixedLocationProvider::denied()),
    };
    let search = Arc::new(HttpSearchGateway::new(settings::search_gateway(&config))?);
    let transport = Arc::new(RealtimeClient::new(settings::realtime(&config)));
    let options = settings::radar_options(&config, FilterTags::parse(&args.techs));

    tracing::info!(
        search = %search.search_url(),
        realtime = %config.realtime.url,
        "devradar starting"
    );

    let radar = Radar::new(location, search, transport, options).spawn();
    drive(&radar).await;
    radar.shutdown().await;
    Ok(())
}

/// Feed stdin commands to the radar and print snapshots until `quit`, EOF
/// or Ctrl-C.
async fn drive(radar: &RadarHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut snapshots = radar.subscribe();
    print!("{}", display::render(&snapshots.borrow_and_update()));

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => match commands::parse_line(&line) {
                    Ok(Some(Input::Radar(command))) => {
                        if !radar.send(command).await {
                            break;
                        }
                    }
                    Ok(Some(Input::Help)) => println!("{HELP}"),
                    Ok(Some(Input::Quit)) => break,
                    Ok(None) => {}
                    Err(e) => eprintln!("{e}"),
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read stdin");
                    break;
                }
            },
            changed = snapshots.changed() => {
                if changed.is_err() {
                    tracing::warn!("Radar stopped unexpectedly");
                    break;
                }
                print!("{}", display::render(&snapshots.borrow_and_update()));
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
}
