use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::{CategoriesConfig, CategoryStore};
use crate::error::{PlantGuideError, Result};

const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the base directory
pub const BASE_DIR_ENV: &str = "PLANT_GUIDE_BASE";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# plant-guide configuration file
# Location: ~/.plant-guide/config.toml

[output]
# Rendering of categorized guides: "text" or "json"
format = "text"

# Colored terminal output (ignored for json)
color = true

# Extra trigger keywords per category.
# Category ids: cultivation, care, harvesting, growth, issues
# Example:
# [categories.care]
# keywords = ["watering", "pruning"]
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default, skip_serializing_if = "CategoriesConfig::is_empty")]
    pub categories: CategoriesConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = PlantGuideError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(PlantGuideError::InvalidConfigValue {
                key: "output.format".to_string(),
                value: s.to_string(),
                reason: "expected text or json".to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| PlantGuideError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Build the category store with configured keywords applied
    pub fn category_store(&self) -> Result<CategoryStore> {
        CategoryStore::builtin().with_config(&self.categories)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "output.format" => Some(self.output.format.to_string()),
            "output.color" => Some(self.output.color.to_string()),
            _ => {
                let id = category_key(key)?;
                CategoryStore::builtin().get(id)?;
                let entry = self.categories.categories.get(id);
                Some(format!(
                    "{:?}",
                    entry.map(|e| e.keywords.clone()).unwrap_or_default()
                ))
            }
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "output.format" => {
                self.output.format = value.parse()?;
                Ok(())
            }
            "output.color" => {
                self.output.color = parse_bool(key, value)?;
                Ok(())
            }
            _ => {
                let id = category_key(key).ok_or_else(|| PlantGuideError::ConfigKeyNotFound {
                    key: key.to_string(),
                })?;
                if CategoryStore::builtin().get(id).is_none() {
                    return Err(PlantGuideError::UnknownCategory { id: id.to_string() });
                }
                let keywords = parse_string_list(value)?;
                self.categories
                    .categories
                    .entry(id.to_string())
                    .or_default()
                    .keywords = keywords;
                Ok(())
            }
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries = vec![
            ("output.format".to_string(), self.output.format.to_string()),
            ("output.color".to_string(), self.output.color.to_string()),
        ];
        for (id, entry) in &self.categories.categories {
            entries.push((
                format!("categories.{}.keywords", id),
                format!("{:?}", entry.keywords),
            ));
        }
        entries
    }
}

/// Resolve the base directory: explicit path, then `$PLANT_GUIDE_BASE`, then `~/.plant-guide`
pub fn resolve_base_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(base) = explicit {
        return base;
    }

    if let Ok(base) = std::env::var(BASE_DIR_ENV) {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".plant-guide"))
        .unwrap_or_else(|| PathBuf::from(".plant-guide"))
}

/// `categories.<id>.keywords` -> `<id>`
fn category_key(key: &str) -> Option<&str> {
    key.strip_prefix("categories.")?
        .strip_suffix(".keywords")
        .filter(|id| !id.is_empty() && !id.contains('.'))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(PlantGuideError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

/// Parse a comma-separated or JSON-like list string
fn parse_string_list(value: &str) -> Result<Vec<String>> {
    let trimmed = value.trim();

    // Try JSON array format first: ["a", "b"]
    let inner = if trimmed.starts_with('[') && trimmed.ends_with(']') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    let items: Vec<String> = inner
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(items)
}
