//! Core data types for Lexis.
//!
//! A [`Record`] is one dictionary entry as it sits in the store. The other
//! types describe what goes into and comes out of the dictionary operations:
//!
//! - [`EntryInput`]: the form values for Add and Edit
//! - [`EntryKey`]: the (word, part of speech, definition) triple used to
//!   target Add duplicate checks and Delete
//! - [`IndexedEntry`]: a record paired with its 1-based position among the
//!   records of the same word
//! - [`WordView`]: everything the presentation layer redraws after a change

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Number of fields in a stored row.
pub const FIELD_COUNT: usize = 5;

/// The named inputs of an entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Word,
    PartOfSpeech,
    Definition,
    Synonyms,
    Antonyms,
    /// The 1-based record index used by retrieve and edit
    Index,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Word => write!(f, "word"),
            Field::PartOfSpeech => write!(f, "part-of-speech"),
            Field::Definition => write!(f, "definition"),
            Field::Synonyms => write!(f, "synonyms"),
            Field::Antonyms => write!(f, "antonyms"),
            Field::Index => write!(f, "index"),
        }
    }
}

/// One dictionary entry.
///
/// Fields are kept in stored order. No field is unique on its own; the
/// trimmed (word, part of speech, definition) triple is the closest thing to
/// an identity and is what Add and Delete compare on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub word: String,
    pub part_of_speech: String,
    pub definition: String,
    pub synonyms: String,
    pub antonyms: String,
}

impl Record {
    /// Create a new record from its five fields.
    pub fn new(
        word: impl Into<String>,
        part_of_speech: impl Into<String>,
        definition: impl Into<String>,
        synonyms: impl Into<String>,
        antonyms: impl Into<String>,
    ) -> Self {
        Record {
            word: word.into(),
            part_of_speech: part_of_speech.into(),
            definition: definition.into(),
            synonyms: synonyms.into(),
            antonyms: antonyms.into(),
        }
    }

    /// Build a record from a stored row. The caller checks the field count.
    pub fn from_row<'a>(mut fields: impl Iterator<Item = &'a str>) -> Self {
        let mut next = || fields.next().unwrap_or_default().to_string();
        Record {
            word: next(),
            part_of_speech: next(),
            definition: next(),
            synonyms: next(),
            antonyms: next(),
        }
    }

    /// The fields in stored order.
    pub fn as_row(&self) -> [&str; FIELD_COUNT] {
        [
            &self.word,
            &self.part_of_speech,
            &self.definition,
            &self.synonyms,
            &self.antonyms,
        ]
    }

    /// The trimmed (word, part of speech, definition) triple.
    pub fn key(&self) -> EntryKey {
        EntryKey::new(&self.word, &self.part_of_speech, &self.definition)
    }

    /// Check whether this record belongs to `word` (both sides trimmed).
    pub fn is_word(&self, word: &str) -> bool {
        self.word.trim() == word.trim()
    }
}

/// The trimmed (word, part of speech, definition) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryKey {
    pub word: String,
    pub part_of_speech: String,
    pub definition: String,
}

impl EntryKey {
    /// Create a key. Each part is trimmed.
    pub fn new(word: &str, part_of_speech: &str, definition: &str) -> Self {
        EntryKey {
            word: word.trim().to_string(),
            part_of_speech: part_of_speech.trim().to_string(),
            definition: definition.trim().to_string(),
        }
    }

    /// Check whether a stored record has this triple.
    pub fn matches(&self, record: &Record) -> bool {
        record.word.trim() == self.word
            && record.part_of_speech.trim() == self.part_of_speech
            && record.definition.trim() == self.definition
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.word, self.part_of_speech, self.definition)
    }
}

/// Current values of the entry form.
///
/// Values are taken as typed; the dictionary trims and validates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInput {
    pub word: String,
    pub part_of_speech: String,
    pub definition: String,
    pub synonyms: String,
    pub antonyms: String,
}

impl EntryInput {
    /// Create form values with the three required fields.
    pub fn new(
        word: impl Into<String>,
        part_of_speech: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        EntryInput {
            word: word.into(),
            part_of_speech: part_of_speech.into(),
            definition: definition.into(),
            ..Default::default()
        }
    }

    /// Set the synonyms
    pub fn with_synonyms(mut self, synonyms: impl Into<String>) -> Self {
        self.synonyms = synonyms.into();
        self
    }

    /// Set the antonyms
    pub fn with_antonyms(mut self, antonyms: impl Into<String>) -> Self {
        self.antonyms = antonyms.into();
        self
    }

    /// Get the value of a single field. `Field::Index` has no form value.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Word => &self.word,
            Field::PartOfSpeech => &self.part_of_speech,
            Field::Definition => &self.definition,
            Field::Synonyms => &self.synonyms,
            Field::Antonyms => &self.antonyms,
            Field::Index => "",
        }
    }
}

impl From<Record> for EntryInput {
    fn from(record: Record) -> Self {
        EntryInput {
            word: record.word,
            part_of_speech: record.part_of_speech,
            definition: record.definition,
            synonyms: record.synonyms,
            antonyms: record.antonyms,
        }
    }
}

/// A record with its 1-based position among records of the same word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedEntry {
    pub index: usize,
    pub record: Record,
}

/// Result of an edit: the record as it was and as it is now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOutcome {
    pub previous: Record,
    pub updated: Record,
}

/// Distinct words plus the entries of the selected word, read in one pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordView {
    pub words: BTreeSet<String>,
    pub entries: Vec<IndexedEntry>,
}

/// Statistics about the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryStats {
    /// Total number of records
    pub records: usize,

    /// Number of distinct words
    pub words: usize,

    /// Where the store lives
    pub path: PathBuf,

    /// Whether a backup copy exists
    pub has_backup: bool,
}
