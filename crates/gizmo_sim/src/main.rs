//! Gizmo Simulator
//!
//! Replays a scripted sequence of gizmo input against a target that carries
//! a custom collision volume, then casts a ray from the camera at it.
//!
//! Run with: cargo run -p gizmo_sim -- [config.toml]

mod config;
mod session;

use config::SimConfig;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => {
            log::info!("No config given, running the built-in script");
            SimConfig::default()
        }
    };
    config.print_summary();

    match session::run(&config) {
        Ok(report) => report.print_summary(),
        Err(e) => {
            log::error!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    }
}
