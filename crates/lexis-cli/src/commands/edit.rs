//! Edit command - change a numbered entry.

use crate::app::App;
use lexis_core::{EntryInput, Field, Record};

/// Field values given on the command line. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct Changes {
    pub word: Option<String>,
    pub part_of_speech: Option<String>,
    pub definition: Option<String>,
    pub synonyms: Option<String>,
    pub antonyms: Option<String>,
}

impl Changes {
    /// Fill a form from `record`, then overwrite the fields that were given.
    pub fn apply(self, record: Record) -> EntryInput {
        let current = EntryInput::from(record);
        EntryInput {
            word: self.word.unwrap_or(current.word),
            part_of_speech: self.part_of_speech.unwrap_or(current.part_of_speech),
            definition: self.definition.unwrap_or(current.definition),
            synonyms: self.synonyms.unwrap_or(current.synonyms),
            antonyms: self.antonyms.unwrap_or(current.antonyms),
        }
    }

    fn is_empty(&self) -> bool {
        self.word.is_none()
            && self.part_of_speech.is_none()
            && self.definition.is_none()
            && self.synonyms.is_none()
            && self.antonyms.is_none()
    }
}

/// Run the edit command.
pub fn run(app: &App, word: &str, index: usize, changes: Changes) -> anyhow::Result<()> {
    if changes.is_empty() {
        eprintln!("Nothing to change. Pass at least one of --word, -p, -d, -s, -a.");
        return Ok(());
    }

    let current = app.dictionary.retrieve(word, index)?;
    let input = changes.apply(current);
    let outcome = app.dictionary.edit(word, index, &input)?;

    println!("Record {} of '{}' updated.", index, word.trim());

    let before = EntryInput::from(outcome.previous);
    let after = EntryInput::from(outcome.updated);
    for field in [
        Field::Word,
        Field::PartOfSpeech,
        Field::Definition,
        Field::Synonyms,
        Field::Antonyms,
    ] {
        if before.get(field) != after.get(field) {
            println!("  {}: {} -> {}", field, before.get(field), after.get(field));
        }
    }

    Ok(())
}
