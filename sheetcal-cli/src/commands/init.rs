use std::path::Path;

use anyhow::Result;
use sheetcal_core::SheetCalConfig;

pub fn run(path: &Path) -> Result<()> {
    SheetCalConfig::write_example(path)?;

    println!("Wrote {}", path.display());
    println!();
    println!("Point [source] at your sheet, then run `sheetcal status` to preview.");

    Ok(())
}
