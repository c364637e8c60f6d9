use anyhow::Result;
use sheetcal_core::{Generator, SheetCalConfig};

use crate::render::{Render, render_diff};

use super::fetch_table;

pub async fn run(config: SheetCalConfig) -> Result<()> {
    let table = fetch_table(&config).await?;
    let generator = Generator::new(&config);

    let rendered = generator.render(&table)?;
    let diff = generator.diff(&rendered)?;

    println!("{}", generator.output().render());
    println!(
        "   {} events from {} rows ({} skipped)",
        rendered.events.len(),
        rendered.row_count,
        rendered.skipped()
    );

    if diff.is_empty() {
        if generator.output().needs_write(&rendered.ics)? {
            // Same events, different bytes (e.g. calendar name or PRODID changed)
            println!("   Calendar header changed.");
        } else {
            println!("   Everything up to date.");
            return Ok(());
        }
    } else {
        for line in render_diff(&diff) {
            println!("{line}");
        }
    }

    println!("\nRun `sheetcal generate` to write the calendar.");
    Ok(())
}
