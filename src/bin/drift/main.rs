//! drift - Terminal soundscape interface
//!
//! Run with: cargo run --bin drift

mod app;
mod ui;

use app::Drift;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // The TUI owns stdout, so diagnostics go to stderr and stay silent
    // unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    Drift::new().run()
}
