//! One module per subcommand, plus the text rendering they share.

pub mod add;
pub mod delete;
pub mod edit;
pub mod lookup;
pub mod restore;
pub mod show;
pub mod speak;
pub mod status;
pub mod words;

use lexis_core::{EntryInput, IndexedEntry, Record};

/// Collect form values from command-line arguments.
pub fn entry_input(
    word: String,
    part_of_speech: String,
    definition: String,
    synonyms: String,
    antonyms: String,
) -> EntryInput {
    EntryInput {
        word,
        part_of_speech,
        definition,
        synonyms,
        antonyms,
    }
}

/// A numbered entry as listed by `lookup`.
pub fn entry_lines(entry: &IndexedEntry) -> Vec<String> {
    let record = &entry.record;
    vec![
        format!("{})", entry.index),
        format!("Part-of-speech: {}", record.part_of_speech),
        format!("Definition: {}", record.definition),
        format!("Synonyms: {}", record.synonyms),
        format!("Antonyms: {}", record.antonyms),
    ]
}

/// Every field of a record, one per line.
pub fn record_lines(record: &Record) -> Vec<String> {
    vec![
        format!("Word: {}", record.word),
        format!("Part-of-speech: {}", record.part_of_speech),
        format!("Definition: {}", record.definition),
        format!("Synonyms: {}", record.synonyms),
        format!("Antonyms: {}", record.antonyms),
    ]
}
