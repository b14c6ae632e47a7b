//! Headless client entry point.
//!
//! Plays one run to completion against the store using a simple autoplay
//! policy. A saved run in progress is resumed instead of starting over.
//! `FORGE_CATALOG` points at a RON content file replacing the built-in one.
mod autoplay;

use anyhow::{Context, Result};
use autoplay::Autoplay;
use game_content::CatalogLoader;
use runtime::{GameStore, RuntimeConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let seed = std::env::var("FORGE_SEED")
        .ok()
        .or_else(|| std::env::args().nth(1));

    let mut builder = GameStore::builder().config(RuntimeConfig::from_env()?);
    if let Ok(path) = std::env::var("FORGE_CATALOG") {
        let catalog = CatalogLoader::load(path.as_ref())?;
        tracing::info!("Loaded content catalog from {}", path);
        builder = builder.catalog(catalog);
    }
    let store = builder.build().context("failed to build game store")?;

    let summary = Autoplay::new(store, seed).run()?;
    println!("{summary}");
    Ok(())
}

/// Log to stderr so stdout carries only the run summary.
fn setup_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
