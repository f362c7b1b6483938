//! config command - Get or list configuration values

use anyhow::{bail, Result};
use serde_json::json;

use crate::cli::Context;
use crate::core::config::Config;
use crate::ui::output;

/// Keys understood by `config get`.
const KEYS: &[&str] = &[
    "discover.across_filesystems",
    "discover.ceiling_directories",
    "output.json",
];

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let value = match lookup(&ctx.config, key) {
        Some(value) => value,
        None => bail!(
            "Unknown configuration key: {} (known keys: {})",
            key,
            KEYS.join(", ")
        ),
    };

    if ctx.json {
        output::json(&json!({ key: value }))?;
    } else {
        output::result(render(&value));
    }
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    if ctx.json {
        let mut map = serde_json::Map::new();
        for key in KEYS {
            if let Some(value) = lookup(&ctx.config, key) {
                map.insert((*key).to_string(), value);
            }
        }
        output::json(&map)?;
        return Ok(());
    }

    match ctx.config.loaded_from() {
        Some(path) => output::print(format!("# {}", path.display()), ctx.verbosity()),
        None => output::print("# defaults (no config file)", ctx.verbosity()),
    }
    for key in KEYS {
        if let Some(value) = lookup(&ctx.config, key) {
            output::result(format!("{} = {}", key, render(&value)));
        }
    }
    Ok(())
}

fn lookup(config: &Config, key: &str) -> Option<serde_json::Value> {
    let value = match key {
        "discover.across_filesystems" => json!(config.across_filesystems()),
        "discover.ceiling_directories" => json!(config.ceiling_directories()),
        "output.json" => json!(config.json()),
        _ => return None,
    };
    Some(value)
}

fn render(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Array(items) => items
            .iter()
            .map(render)
            .collect::<Vec<_>>()
            .join(":"),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
