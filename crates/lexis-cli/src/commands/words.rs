//! Words command - list distinct words.

use crate::app::App;
use crate::OutputFormat;

/// Run the words command.
pub fn run(app: &App, output: OutputFormat) -> anyhow::Result<()> {
    let words = app.dictionary.words()?;

    match output {
        OutputFormat::Text => {
            for word in &words {
                println!("{}", word);
            }
            eprintln!("{} words", words.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&words)?);
        }
    }

    Ok(())
}
