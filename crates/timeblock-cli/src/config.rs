//! Layout settings resolution: defaults, TOML file, environment, flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use timeblock_engine::time::parse_timezone;
use timeblock_engine::{DstPolicy, LayoutOptions};
use tracing::{debug, info};

pub const CONFIG_ENV_VAR: &str = "TIMEBLOCK_CONFIG";
pub const TIMEZONE_ENV_VAR: &str = "TIMEBLOCK_TIMEZONE";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    timezone: Option<String>,
    include_archived: Option<bool>,
    dst_policy: Option<DstPolicy>,
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub timezone: Option<String>,
    pub include_archived: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub layout: LayoutOptions,
    pub dst_policy: DstPolicy,
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve settings with `env` standing in for the process environment.
    pub fn resolve_with<F>(overrides: &Overrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings {
            layout: LayoutOptions::default(),
            dst_policy: DstPolicy::default(),
        };

        let path = overrides.config.clone().or_else(|| {
            env(CONFIG_ENV_VAR)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
                .map(PathBuf::from)
        });
        if let Some(path) = path {
            let file = load_file(&path)?;
            info!(config = %path.display(), "loaded layout config");
            if let Some(tz) = file.timezone {
                settings.layout.timezone = tz;
            }
            if let Some(include) = file.include_archived {
                settings.layout.include_archived = include;
            }
            if let Some(policy) = file.dst_policy {
                settings.dst_policy = policy;
            }
        }

        if let Some(tz) = env(TIMEZONE_ENV_VAR).filter(|raw| !raw.trim().is_empty()) {
            debug!(timezone = %tz, "timezone from {}", TIMEZONE_ENV_VAR);
            settings.layout.timezone = tz.trim().to_string();
        }
        if let Some(tz) = &overrides.timezone {
            settings.layout.timezone = tz.clone();
        }
        if overrides.include_archived {
            settings.layout.include_archived = true;
        }

        parse_timezone(&settings.layout.timezone)
            .with_context(|| "Unusable timezone in settings".to_string())?;
        Ok(settings)
    }
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
}
