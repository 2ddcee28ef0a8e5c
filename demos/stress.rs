//! # Stress Demo
//!
//! Large pool, heavy emission. Holding the mouse saturates the pool within a
//! second; after that most spawn attempts land on live slots and are dropped.
//!
//! Run with: `RUST_LOG=debug cargo run --example stress --release`
//!
//! Optional first argument overrides the capacity.

use pointburst::prelude::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let capacity: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(10_000);

    let result = Simulation::new()
        .with_title("pointburst - stress")
        .with_capacity(capacity)
        .with_emitter(
            EmitterConfig::default()
                .with_particles_per_frame(200)
                .with_speed(20.0..250.0)
                .with_lifetime(2.0..6.0),
        )
        .with_point_size(2.5)
        .with_clear_color(0.02, 0.02, 0.05)
        .with_seed(0x5eed)
        .run();

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
