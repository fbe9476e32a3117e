//! Handler functions for `pico config` commands.
//!
//! `path`, `get`, `set` and `init` work on the TOML file resolved by
//! [`PicoConfig::resolve_config_path`]. Keys are dotted paths such as
//! `server.port`.

use std::io::Write;
use std::path::PathBuf;

use crate::cli::ConfigAction;
use crate::config::{PROJECT_NAME, PicoConfig};
use crate::{Error, Result};

/// Dispatch a config subcommand, writing results to `out`.
pub fn handle_config_command(
    config_path: Option<&str>,
    action: ConfigAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path, out),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key, out),
        ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value, out),
        ConfigAction::Init { file, force } => {
            let target = file.as_deref().or(config_path);
            cmd_config_init(target, force, out)
        }
    }
}

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>, out: &mut impl Write) -> Result<()> {
    let path = PicoConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    writeln!(out, "{}", path.display())?;
    if !path.exists() {
        tracing::info!("File does not exist; run `{PROJECT_NAME} config init` to create it");
    }
    Ok(())
}

/// Print a configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str, out: &mut impl Write) -> Result<()> {
    let config = PicoConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    match get_nested_value(&value, key) {
        Some(val) => {
            writeln!(out, "{}", format_toml_value(val))?;
            Ok(())
        }
        None => Err(Error::config(format!(
            "Key '{key}' not found in configuration"
        ))),
    }
}

/// Set a configuration value by dotted key in the config file.
///
/// The edited file must still parse as a [`PicoConfig`]; otherwise it is
/// left untouched.
pub fn cmd_config_set(
    config_path: Option<&str>,
    key: &str,
    value: &str,
    out: &mut impl Write,
) -> Result<()> {
    let path = PicoConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{PROJECT_NAME} config init` first.",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    set_nested_value(&mut doc, key, parse_value(value))?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    toml::from_str::<PicoConfig>(&toml_str)
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    writeln!(out, "Set {key} = {value} in {}", path.display())?;
    Ok(())
}

/// Create a default configuration file.
pub fn cmd_config_init(file: Option<&str>, force: bool, out: &mut impl Write) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => PicoConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = PicoConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    writeln!(out, "Config file created at {}", path.display())?;
    Ok(())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return Err(Error::config("Empty key path"));
    };
    if last.is_empty() {
        return Err(Error::config("Empty key path"));
    }

    let mut current = root;
    for part in parents {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    let table = current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?;
    table.insert(last.to_string(), value);
    Ok(())
}

/// Parse a string value into a TOML value, auto-detecting the type.
///
/// Priority: bool → integer → float → string.
pub fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => return toml::Value::Boolean(true),
        "false" => return toml::Value::Boolean(false),
        _ => {}
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(s.to_string())
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
