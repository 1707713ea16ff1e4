use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use pingrr_config::{Config, PathManager};
use std::path::PathBuf;

pub fn run_config(cmd: ConfigCommands, path: &PathBuf, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(path, full, output),
        ConfigCommands::Init { force } => init_config(path, force, output),
        ConfigCommands::Path => {
            match output.format() {
                OutputFormat::Human => println!("{}", path.display()),
                _ => output.json(&serde_json::json!({ "path": path.display().to_string() })),
            }
            Ok(())
        }
    }
}

fn show_config(path: &PathBuf, full: bool, output: &Output) -> Result<()> {
    if !path.exists() {
        output.warn(format!("Configuration file not found at: {}", path.display()));
        output.info("Run 'pingrr config init' to create one.");
        return Ok(());
    }

    let mut config = Config::load_from_file(path)
        .map_err(|e| eyre!("Failed to load config from {}: {}", path.display(), e))?;
    if !full {
        mask_secrets(&mut config);
    }

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }
            println!("# {}", path.display());
            println!("{}", toml::to_string_pretty(&config)?);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&config)?);
        }
    }

    if let Err(e) = config.validate() {
        output.warn(format!("Configuration is not valid: {}", e));
    }
    Ok(())
}

fn init_config(path: &PathBuf, force: bool, output: &Output) -> Result<()> {
    if path.exists() && !force {
        return Err(eyre!(
            "Configuration file already exists at {}. Use --force to overwrite it.",
            path.display()
        ));
    }

    let mut config = Config::example();
    config.logging.file = Some(PathManager::default().default_log_file());
    config
        .save_to_file(path)
        .map_err(|e| eyre!("Failed to write config to {}: {}", path.display(), e))?;
    output.success(format!("Wrote starter configuration to {}", path.display()));
    output.info("Fill in the Trakt client id and the Sonarr/Radarr api keys, then run 'pingrr run --dry-run'.");
    Ok(())
}

fn mask_secrets(config: &mut Config) {
    config.trakt.client_id = mask_string(&config.trakt.client_id);
    if let Some(sonarr) = config.sonarr.as_mut() {
        sonarr.api_key = mask_string(&sonarr.api_key);
    }
    if let Some(radarr) = config.radarr.as_mut() {
        radarr.api_key = mask_string(&radarr.api_key);
    }
    if let Some(pushover) = config.notifications.pushover.as_mut() {
        pushover.app_token = mask_string(&pushover.app_token);
        pushover.user_key = mask_string(&pushover.user_key);
    }
}

fn mask_string(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let visible: String = value.chars().take(4).collect();
    if value.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
