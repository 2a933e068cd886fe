//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use docdesk_core::Config;

use crate::output::{Output, OutputFormat};

const NOT_SET: &str = "(not set)";

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "log_file": config.log_file,
                    "log_level": config.log_level,
                    "history_limit": config.history_limit,
                    "start_dir": config.start_dir,
                    "file_filters": config.file_filters,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:      {}", config.data_dir.display());
            println!("  log_file:      {}", display_optional(&config.log_file));
            println!("  log_level:     {}", config.log_level);
            println!("  history_limit: {}", config.history_limit);
            println!("  start_dir:     {}", display_optional(&config.start_dir));
            println!("  file_filters:");
            for filter in &config.file_filters {
                println!("    {} ({})", filter.name, filter.extensions.join(", "));
            }
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Update one key in place
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "log_file" => {
            config.log_file = match value {
                "" | "none" => None,
                "default" => Some(config.default_log_path()),
                path => Some(path.into()),
            };
        }
        "log_level" => {
            if value.is_empty() {
                bail!("log_level cannot be empty");
            }
            config.log_level = value.to_string();
        }
        "history_limit" => {
            let limit: usize = value
                .parse()
                .context("Invalid value for history_limit. Use a whole number.")?;
            if limit == 0 {
                bail!("history_limit must be at least 1");
            }
            config.history_limit = limit;
        }
        "start_dir" => {
            config.start_dir = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, log_file, log_level, history_limit, start_dir",
                key
            );
        }
    }
    Ok(())
}

fn display_optional(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| NOT_SET.to_string())
}
