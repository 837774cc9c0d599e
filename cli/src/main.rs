//! Motus CLI - screen one profile and print the finalized plan.
//!
//! Reads a screening profile (JSON) from the path given as the first
//! argument, or from stdin when no argument is given. The catalog location
//! and the formatting service credentials come from the environment (see
//! `motus-config`); without an API key the deterministic offline formatter
//! is used. The plan is printed to stdout as pretty JSON, logs go to
//! stderr.

use std::env;
use std::fs;
use std::io;
use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use motus_config::{Settings, load_catalog};
use motus_engine::Screener;
use motus_providers::{CannedFormatter, Formatter, RemoteFormatter};
use motus_types::ScreenProfile;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn read_profile() -> Result<ScreenProfile> {
    let raw = match env::args().nth(1) {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read profile from '{path}'"))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read profile from stdin")?;
            buffer
        }
    };
    serde_json::from_str(&raw).context("profile JSON is invalid")
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let settings = Settings::from_env();
    let catalog =
        load_catalog(&settings.catalog_path).context("cannot start without a loaded catalog")?;
    tracing::info!(
        entries = catalog.len(),
        path = %settings.catalog_path.display(),
        "catalog loaded"
    );

    let formatter = match settings.api {
        Some(api) => {
            tracing::info!(model = %api.model, "using remote plan formatter");
            Formatter::Remote(RemoteFormatter::new(api.base_url, api.api_key, api.model))
        }
        None => {
            tracing::info!("no API key configured; using offline plan formatter");
            Formatter::Canned(CannedFormatter::new())
        }
    };

    let profile = read_profile()?;
    let screener = Screener::new(Arc::new(catalog), formatter);
    let plan = screener.plan(&profile).await?;

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
