//! Lookup command - list the entries of a word.

use crate::app::App;
use crate::commands::entry_lines;
use crate::OutputFormat;

/// Run the lookup command.
pub fn run(app: &App, word: &str, output: OutputFormat) -> anyhow::Result<()> {
    let entries = app.dictionary.lookup(word)?;

    match output {
        OutputFormat::Text => {
            if entries.is_empty() {
                eprintln!("No entries for '{}'.", word.trim());
                return Ok(());
            }

            for entry in &entries {
                for line in entry_lines(entry) {
                    println!("{}", line);
                }
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}
