//! Delete command - remove one entry.

use crate::app::App;
use lexis_core::EntryKey;

/// Run the delete command.
pub fn run(app: &App, word: &str, part_of_speech: &str, definition: &str) -> anyhow::Result<()> {
    let key = EntryKey::new(word, part_of_speech, definition);
    let removed = app.dictionary.delete(&key)?;
    let remaining = app.dictionary.lookup(&removed.word)?;

    println!("Record deleted successfully.");
    println!("  '{}' has {} entries left.", removed.word.trim(), remaining.len());

    Ok(())
}
