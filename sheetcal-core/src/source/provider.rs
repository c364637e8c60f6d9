//! Provider subprocess protocol.
//!
//! Sheet access lives in external provider binaries (e.g.
//! `sheetcal-provider-gsheets`) that speak JSON over stdin/stdout. sheetcal
//! never interprets credentials; it forwards them to the provider.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{SheetCalError, SheetCalResult};
use crate::row::Table;

use super::protocol::{Command, ReadRows, Request, Response};

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
pub struct Provider(String);

impl Provider {
    pub fn from_name(name: &str) -> Self {
        Provider(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn binary_name(&self) -> String {
        format!("sheetcal-provider-{}", self.0)
    }

    fn binary_path(&self) -> SheetCalResult<PathBuf> {
        let binary_name = self.binary_name();
        which::which(&binary_name).map_err(|_| SheetCalError::ProviderNotInstalled(binary_name))
    }

    /// Fetch the sheet's value grid.
    pub async fn read_rows(&self, params: ReadRows) -> SheetCalResult<Table> {
        let values: Vec<Vec<String>> = self.call(Command::ReadRows, params).await?;
        Ok(Table::new(values))
    }

    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> SheetCalResult<R> {
        timeout(PROVIDER_TIMEOUT, self.call_raw(command, params))
            .await
            .map_err(|_| SheetCalError::ProviderTimeout(PROVIDER_TIMEOUT.as_secs()))?
    }

    /// Low-level call that sends a command with params and deserializes the response.
    async fn call_raw<P: Serialize, R: DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> SheetCalResult<R> {
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| SheetCalError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;
        debug!(provider = %binary_path.display(), ?command, "calling provider");

        let mut child = TokioCommand::new(&binary_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SheetCalError::SourceUnavailable(format!(
                    "Failed to spawn {}: {}",
                    binary_path.display(),
                    e
                ))
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            SheetCalError::SourceUnavailable("Provider stdin was not captured".into())
        })?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(SheetCalError::SourceUnavailable(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(SheetCalError::SourceUnavailable(
                "Provider returned no response".into(),
            ));
        }

        let response: Response<R> = serde_json::from_str(&response_str).map_err(|e| {
            SheetCalError::SourceUnavailable(format!("Failed to parse provider response: {e}"))
        })?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(SheetCalError::SourceUnavailable(error)),
        }
    }
}
