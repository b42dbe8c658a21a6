//! Show command - load one numbered entry.

use crate::app::App;
use crate::commands::record_lines;
use crate::OutputFormat;

/// Run the show command.
pub fn run(app: &App, word: &str, index: usize, output: OutputFormat) -> anyhow::Result<()> {
    let record = app.dictionary.retrieve(word, index)?;

    match output {
        OutputFormat::Text => {
            for line in record_lines(&record) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}
