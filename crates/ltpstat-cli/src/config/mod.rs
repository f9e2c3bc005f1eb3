//! Configuration loading for ltpstat.
//! Reads an explicit `--config` file, else the path in the LTPSTAT_CONFIG env
//! var, else ltpstat.toml from the current directory, else built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use ltpstat_common::ReportConfig;

pub const CONFIG_ENV: &str = "LTPSTAT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "ltpstat.toml";

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Env(PathBuf),
    WorkingDir(PathBuf),
    Defaults,
}

/// Pick the config file to load. `env_value` is the LTPSTAT_CONFIG value,
/// `working_dir` the directory searched for ltpstat.toml.
pub fn resolve_source(
    explicit: Option<&Path>,
    env_value: Option<&str>,
    working_dir: &Path,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return ConfigSource::Env(PathBuf::from(value));
    }
    let local = working_dir.join(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return ConfigSource::WorkingDir(local);
    }
    ConfigSource::Defaults
}

/// Load the configuration named by `source`.
/// Explicit and env-named files must exist.
pub fn load_from(source: &ConfigSource) -> anyhow::Result<ReportConfig> {
    let path = match source {
        ConfigSource::Defaults => return Ok(ReportConfig::default()),
        ConfigSource::Explicit(p) | ConfigSource::Env(p) | ConfigSource::WorkingDir(p) => p,
    };

    if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
    }
    ReportConfig::load(path).with_context(|| format!("Could not load {}", path.display()))
}

/// Resolve and load using the process environment and working directory.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<(ReportConfig, ConfigSource)> {
    let env_value = std::env::var(CONFIG_ENV).ok();
    let source = resolve_source(explicit, env_value.as_deref(), Path::new("."));
    let config = load_from(&source)?;
    Ok((config, source))
}

#[cfg(test)]
mod tests;
