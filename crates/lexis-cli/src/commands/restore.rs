//! Restore command - bring back the copy saved before the last rewrite.

use crate::app::App;
use std::io::{self, Write};

/// Run the restore command.
pub fn run(app: &App, skip_confirm: bool) -> anyhow::Result<()> {
    let store = app.dictionary.store();

    if !store.has_backup() {
        println!("No backup found. Nothing to restore.");
        return Ok(());
    }

    if !skip_confirm {
        print!(
            "This will replace {} with its backup. Are you sure? [y/N] ",
            store.path().display()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let records = store.restore_from_backup()?;
    println!("Restored {} records.", records.len());

    Ok(())
}
