//! Add command - add a new entry.

use crate::app::App;
use lexis_core::EntryInput;

/// Run the add command.
pub fn run(app: &App, input: EntryInput) -> anyhow::Result<()> {
    let record = app.dictionary.add(&input)?;
    let view = app.dictionary.view(&record.word)?;

    println!("Word added successfully.");
    println!(
        "  {} ({}): {}",
        record.word, record.part_of_speech, record.definition
    );
    println!(
        "  '{}' now has {} entries; {} words in the dictionary.",
        record.word,
        view.entries.len(),
        view.words.len()
    );

    Ok(())
}
