pub mod generate;
pub mod init;
pub mod print;
pub mod status;

use anyhow::Result;
use sheetcal_core::row::Table;
use sheetcal_core::source::RowSource;
use sheetcal_core::SheetCalConfig;

/// Resolve the configured source and fetch the sheet.
async fn fetch_table(config: &SheetCalConfig) -> Result<Table> {
    let source = RowSource::from_config(&config.source)?;
    Ok(source.fetch().await?)
}
