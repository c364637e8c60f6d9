//! sheetcal configuration.
//!
//! Read once at startup from `sheetcal.toml` (optional) layered with
//! `SHEETCAL__SECTION__KEY` environment variables, then passed explicitly to
//! the source, normalizer and renderer.

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{SheetCalError, SheetCalResult};

pub const DEFAULT_CONFIG_PATH: &str = "sheetcal.toml";
static DEFAULT_OUTPUT_PATH: &str = "docs/calendar.ics";
static DEFAULT_PRODID: &str = "-//sheetcal//EN";
static DEFAULT_TAB: &str = "Sheet1";
static DEFAULT_RANGE: &str = "A:Z";

/// Year assumed for every `MM-DD` date in the sheet.
pub const DEFAULT_SEASON_YEAR: i32 = 2026;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetCalConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub season: SeasonConfig,
}

/// Where the sheet rows come from: a provider binary or a JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Provider name, resolved to `sheetcal-provider-<name>` on PATH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// JSON file holding the sheet's value grid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<String>,

    pub tab: String,

    pub range: String,

    /// Environment variable holding the provider's credentials
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_name: Option<String>,

    pub prodid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonConfig {
    pub year: i32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            provider: None,
            file: None,
            sheet_id: None,
            tab: DEFAULT_TAB.to_string(),
            range: DEFAULT_RANGE.to_string(),
            credentials_env: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            calendar_name: None,
            prodid: DEFAULT_PRODID.to_string(),
        }
    }
}

impl Default for SeasonConfig {
    fn default() -> Self {
        SeasonConfig {
            year: DEFAULT_SEASON_YEAR,
        }
    }
}

impl SheetCalConfig {
    /// Load the config file (if present) and `SHEETCAL__*` overrides.
    pub fn load(path: &Path) -> SheetCalResult<Self> {
        let config: SheetCalConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("SHEETCAL")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| SheetCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SheetCalError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SheetCalResult<()> {
        match (&self.source.provider, &self.source.file) {
            (Some(_), Some(_)) => Err(SheetCalError::Config(
                "Set either source.provider or source.file, not both".into(),
            )),
            (None, None) => Err(SheetCalError::Config(
                "No source configured. Set source.provider or source.file".into(),
            )),
            (Some(provider), None) if self.source.sheet_id.is_none() => {
                Err(SheetCalError::Config(format!(
                    "Provider '{provider}' needs source.sheet_id"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Config written by `sheetcal init`.
    pub fn example() -> Self {
        SheetCalConfig {
            source: SourceConfig {
                provider: Some("gsheets".to_string()),
                sheet_id: Some("your-spreadsheet-id".to_string()),
                credentials_env: Some("SHEETS_SERVICE_ACCOUNT_JSON".to_string()),
                ..SourceConfig::default()
            },
            output: OutputConfig::default(),
            season: SeasonConfig::default(),
        }
    }

    /// Write the example config to `path`. Never overwrites an existing file.
    pub fn write_example(path: &Path) -> SheetCalResult<()> {
        if path.exists() {
            return Err(SheetCalError::Config(format!(
                "Config file already exists at {}",
                path.display()
            )));
        }

        let contents = toml::to_string_pretty(&Self::example())
            .map_err(|e| SheetCalError::Serialization(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SheetCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SheetCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

impl SourceConfig {
    /// `<tab>!<range>`, the A1 notation handed to the provider.
    pub fn a1_range(&self) -> String {
        format!("{}!{}", self.tab, self.range)
    }

    /// Read the provider credentials named by `credentials_env`.
    pub fn credentials(&self) -> SheetCalResult<Option<Credentials>> {
        let Some(var) = &self.credentials_env else {
            return Ok(None);
        };

        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(Some(Credentials(value))),
            _ => Err(SheetCalError::Config(format!("Missing env var: {var}"))),
        }
    }
}

impl OutputConfig {
    /// Output path with `~` expanded.
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path.to_string_lossy()).into_owned())
    }
}

/// Opaque provider credentials. Forwarded as-is, never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    pub fn new(value: impl Into<String>) -> Self {
        Credentials(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(<redacted>)")
    }
}
