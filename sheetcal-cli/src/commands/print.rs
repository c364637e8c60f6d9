use std::io::Write;

use anyhow::Result;
use sheetcal_core::{Generator, SheetCalConfig};

use super::fetch_table;

pub async fn run(config: SheetCalConfig) -> Result<()> {
    let table = fetch_table(&config).await?;
    let rendered = Generator::new(&config).render(&table)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.ics.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
