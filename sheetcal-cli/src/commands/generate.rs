use anyhow::Result;
use sheetcal_core::{Generator, SheetCalConfig};

use super::fetch_table;

pub async fn run(config: SheetCalConfig, dry_run: bool) -> Result<()> {
    let table = fetch_table(&config).await?;
    let generator = Generator::new(&config);

    let report = generator.run(&table, dry_run)?;

    if dry_run {
        println!("ICS would update: {}", report.needs_write);
    } else {
        println!("ICS updated: {}", report.needs_write);
    }

    Ok(())
}
