//! Command implementations for the fyyur CLI

pub mod db;
pub mod serve;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fyyur_server::Settings;

pub use db::{run_migrate, run_seed};
pub use serve::run_serve;

/// Settings sources shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Settings file (default: ~/.fyyur/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database URL (overrides the settings file)
    #[arg(long, global = true, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

impl SettingsArgs {
    /// Resolve settings: flags and environment over file over defaults.
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => Settings::load().context("Failed to load settings")?,
        };

        if let Some(url) = &self.database_url {
            settings.database_url = url.clone();
        }
        Ok(settings)
    }
}
