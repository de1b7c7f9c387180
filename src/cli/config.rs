//! Configuration CLI command handlers

use colored::Colorize;

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::config::{self, CommitStyle, Config};
use crate::error::{CommitaiError, Result};

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => handle_show(),
        ConfigCommand::Set { key, value } => handle_set(key, value),
        ConfigCommand::Get { key } => handle_get(key),
        ConfigCommand::Remove { key } => handle_remove(key),
    }
}

fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;

    println!();
    println!("{}", "⚙️  commitai configuration:".cyan());
    println!();
    for key in [
        ConfigKey::ApiKey,
        ConfigKey::Language,
        ConfigKey::Style,
        ConfigKey::Model,
        ConfigKey::MaxTokens,
        ConfigKey::Endpoint,
    ] {
        println!("  {:<13} {}", format!("{}:", label(key)), display_value(&config, key));
    }
    println!();
    println!("  {:<13} {}", "Config file:", path.display());
    println!("  {:<13} {}", "Env override:", config::API_KEY_ENV);
    println!();
    Ok(())
}

/// Handle setting a configuration value
fn handle_set(key: ConfigKey, value: String) -> Result<()> {
    let mut config = Config::load()?;
    apply_value(&mut config, key, &value)?;
    config.save()?;

    match key {
        ConfigKey::ApiKey => {
            println!("{}", "✅ API key saved".green());
            if Config::api_key_from_env() {
                println!(
                    "{}",
                    format!("⚠️  {} is set and takes precedence over the stored key.", config::API_KEY_ENV)
                        .yellow()
                );
            }
        }
        _ => println!(
            "{}",
            format!("✅ {} set to: {}", label(key), display_value(&config, key)).green()
        ),
    }
    Ok(())
}

/// Handle getting a configuration value
fn handle_get(key: ConfigKey) -> Result<()> {
    let config = Config::load()?;
    println!("{}: {}", label(key), display_value(&config, key));
    Ok(())
}

/// Handle resetting a configuration value
fn handle_remove(key: ConfigKey) -> Result<()> {
    let mut config = Config::load()?;
    reset_value(&mut config, key);
    config.save()?;

    match key {
        ConfigKey::ApiKey => println!("Stored API key has been removed."),
        _ => println!(
            "{} reset to default: {}",
            label(key),
            display_value(&config, key)
        ),
    }
    Ok(())
}

/// Validate and store one value
pub fn apply_value(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CommitaiError::InvalidInput(format!(
            "A value is required for '{}'",
            label(key)
        )));
    }

    match key {
        ConfigKey::ApiKey => config.api_key = Some(value.to_string()),
        ConfigKey::Language => config.language = value.to_string(),
        ConfigKey::Style => {
            config.commit_style = CommitStyle::from_str(value).ok_or_else(|| {
                CommitaiError::InvalidInput(format!(
                    "Invalid style '{}'. Available styles: conventional, simple",
                    value
                ))
            })?;
        }
        ConfigKey::Model => config.model = value.to_string(),
        ConfigKey::MaxTokens => {
            config.max_tokens = value
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    CommitaiError::InvalidInput(format!(
                        "Invalid token budget '{}'. Expected a positive number.",
                        value
                    ))
                })?;
        }
        ConfigKey::Endpoint => config.endpoint = value.trim_end_matches('/').to_string(),
    }
    Ok(())
}

/// Put one value back to its default
pub fn reset_value(config: &mut Config, key: ConfigKey) {
    let defaults = Config::default();
    match key {
        ConfigKey::ApiKey => config.api_key = None,
        ConfigKey::Language => config.language = defaults.language,
        ConfigKey::Style => config.commit_style = defaults.commit_style,
        ConfigKey::Model => config.model = defaults.model,
        ConfigKey::MaxTokens => config.max_tokens = defaults.max_tokens,
        ConfigKey::Endpoint => config.endpoint = defaults.endpoint,
    }
}

fn label(key: ConfigKey) -> &'static str {
    match key {
        ConfigKey::ApiKey => "API key",
        ConfigKey::Language => "Language",
        ConfigKey::Style => "Style",
        ConfigKey::Model => "Model",
        ConfigKey::MaxTokens => "Max tokens",
        ConfigKey::Endpoint => "Endpoint",
    }
}

fn display_value(config: &Config, key: ConfigKey) -> String {
    match key {
        ConfigKey::ApiKey => config
            .api_key()
            .map(|k| config::mask_key(&k))
            .unwrap_or_else(|| "(not set)".to_string()),
        ConfigKey::Language => config.language.clone(),
        ConfigKey::Style => config.commit_style.to_string(),
        ConfigKey::Model => config.model.clone(),
        ConfigKey::MaxTokens => config.max_tokens.to_string(),
        ConfigKey::Endpoint => config.endpoint.clone(),
    }
}
