use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// File name of the optional per-tree configuration.
pub const CONFIG_FILE: &str = ".headcheck.toml";

/// The copyright and license lines must both fit in the header window.
pub const MIN_HEADER_LINES: usize = 2;

/// Top-level configuration from `.headcheck.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Where header lines are looked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Number of leading lines scanned for the copyright and license markers.
    #[serde(default = "default_header_lines")]
    pub lines: usize,
}

fn default_header_lines() -> usize {
    5
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            lines: default_header_lines(),
        }
    }
}

/// Extra exclusions on top of the built-in heuristics and `.gitignore`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Glob patterns matched against root-relative paths.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl Config {
    /// Load configuration from a `.headcheck.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse '{}'", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config '{}'", path.display()))?;
        Ok(config)
    }

    /// Check values serde cannot constrain.
    pub fn validate(&self) -> Result<()> {
        if self.header.lines < MIN_HEADER_LINES {
            bail!(
                "header.lines must be at least {MIN_HEADER_LINES}, got {}",
                self.header.lines
            );
        }
        Ok(())
    }

    /// Load `.headcheck.toml` from the scan root, or return defaults.
    pub fn load_or_default(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    "failed to load config: {e:#}. Using defaults."
                );
                Self::default()
            }
        }
    }
}
