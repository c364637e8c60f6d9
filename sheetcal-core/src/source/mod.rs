//! Where sheet rows come from.

mod protocol;
mod provider;

pub use protocol::{Command, ReadRows, Request, Response};
pub use provider::Provider;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{Credentials, SourceConfig};
use crate::error::{SheetCalError, SheetCalResult};
use crate::row::Table;

/// A configured row source, resolved once at startup.
#[derive(Debug, Clone)]
pub enum RowSource {
    /// Provider binary that fetches the live sheet
    Provider {
        provider: Provider,
        sheet_id: String,
        range: String,
        credentials: Option<Credentials>,
    },
    /// JSON export of the sheet's value grid
    File(PathBuf),
}

impl RowSource {
    pub fn from_config(config: &SourceConfig) -> SheetCalResult<Self> {
        if let Some(file) = &config.file {
            return Ok(RowSource::File(file.clone()));
        }

        let name = config.provider.as_deref().ok_or_else(|| {
            SheetCalError::Config("No source configured. Set source.provider or source.file".into())
        })?;
        let sheet_id = config
            .sheet_id
            .clone()
            .ok_or_else(|| SheetCalError::Config(format!("Provider '{name}' needs source.sheet_id")))?;

        Ok(RowSource::Provider {
            provider: Provider::from_name(name),
            sheet_id,
            range: config.a1_range(),
            credentials: config.credentials()?,
        })
    }

    /// Fetch the full value grid. Any failure here is fatal for the run.
    pub async fn fetch(&self) -> SheetCalResult<Table> {
        let table = match self {
            RowSource::Provider {
                provider,
                sheet_id,
                range,
                credentials,
            } => {
                let params = ReadRows {
                    sheet_id: sheet_id.clone(),
                    range: range.clone(),
                    credentials: credentials.as_ref().map(|c| c.expose().to_string()),
                };
                provider.read_rows(params).await?
            }
            RowSource::File(path) => read_table_file(path).await?,
        };

        if table.values.is_empty() {
            return Err(SheetCalError::SourceUnavailable("No data found in sheet".into()));
        }

        info!(source = %self, rows = table.len(), "fetched sheet");
        Ok(table)
    }
}

impl std::fmt::Display for RowSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowSource::Provider {
                provider, range, ..
            } => write!(f, "{} ({})", provider.binary_name(), range),
            RowSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

async fn read_table_file(path: &Path) -> SheetCalResult<Table> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        SheetCalError::SourceUnavailable(format!("Could not read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SheetCalError::SourceUnavailable(format!("Could not parse {}: {}", path.display(), e))
    })
}
