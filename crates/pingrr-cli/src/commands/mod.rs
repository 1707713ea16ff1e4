pub mod config;
pub mod daemon;
pub mod run;

use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use pingrr_config::Config;
use pingrr_core::Orchestrator;
use std::path::PathBuf;

/// Load and validate the configuration at `path`
pub fn load_config(path: &PathBuf) -> Result<Config> {
    if !path.exists() {
        return Err(eyre!(
            "Configuration file not found at {}. Run 'pingrr config init' to create one.",
            path.display()
        ));
    }

    let config = Config::load_from_file(path)
        .map_err(|e| eyre!("Failed to load config from {}: {}", path.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", path.display(), e))?;
    Ok(config)
}

/// Orchestrator wired to the configured services
///
/// `dry_run` from the command line is combined with `[pingrr] dry_run`.
pub fn build_orchestrator(config: &Config, dry_run: bool) -> Result<Orchestrator> {
    let orchestrator = Orchestrator::from_config(config).wrap_err("Failed to set up service clients")?;
    Ok(orchestrator.with_dry_run(config.pingrr.dry_run || dry_run))
}
