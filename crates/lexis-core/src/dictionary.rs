//! Dictionary operations over the record store.
//!
//! Every operation is one synchronous pass over the store: read all rows,
//! scan them in file order, and for mutations write the result back. Nothing
//! is cached between calls, so each call sees what is on disk right now.
//!
//! ## Matching rules
//!
//! All comparisons trim both sides and are case-sensitive. Lookup, retrieve,
//! and edit number the records of a word the same way (1-based, file order),
//! so the index shown by a lookup is the index retrieve and edit accept.
//!
//! Add and Delete target entries by the (word, part of speech, definition)
//! triple. Since the triple is not a real primary key, Delete removes only
//! the first match.

use crate::config::{Config, DictionaryConfig};
use crate::error::{LexisError, Result};
use crate::speech::{Speaker, Voice};
use crate::store::RecordStore;
use crate::types::{
    DictionaryStats, EditOutcome, EntryInput, EntryKey, Field, IndexedEntry, Record, WordView,
};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Entry operations backed by a [`RecordStore`].
///
/// ## Example
///
/// ```rust,no_run
/// use lexis_core::{Dictionary, EntryInput, RecordStore};
///
/// let dictionary = Dictionary::new(RecordStore::new("./dictionary.csv"));
///
/// dictionary.add(&EntryInput::new("cat", "noun", "a feline").with_synonyms("kitty"))?;
///
/// for entry in dictionary.lookup("cat")? {
///     println!("{}) {}", entry.index, entry.record.definition);
/// }
/// # Ok::<(), lexis_core::LexisError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Dictionary {
    store: RecordStore,
    rules: DictionaryConfig,
}

impl Dictionary {
    /// Create a dictionary with the default validation rules.
    pub fn new(store: RecordStore) -> Self {
        Dictionary {
            store,
            rules: DictionaryConfig::default(),
        }
    }

    /// Create a dictionary for the store and rules named in the config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = RecordStore::from_config(config.store_path()?, &config.store)?;
        Ok(Dictionary::new(store).with_rules(config.dictionary.clone()))
    }

    /// Replace the validation rules.
    pub fn with_rules(mut self, rules: DictionaryConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Get the underlying store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Options for the part-of-speech selector.
    pub fn parts_of_speech(&self) -> &[String] {
        &self.rules.parts_of_speech
    }

    /// Add a new entry.
    ///
    /// Word, part of speech, and definition are required. Fails with
    /// `Duplicate` if an entry with the same triple exists; nothing is written
    /// on any failure. Returns the record as stored (trimmed).
    #[instrument(skip(self, input), fields(word = %input.word))]
    pub fn add(&self, input: &EntryInput) -> Result<Record> {
        let record = self.validate(input)?;
        let key = record.key();

        let records = self.store.load()?;
        if records.iter().any(|r| key.matches(r)) {
            return Err(duplicate(key));
        }

        self.store.append(&record)?;
        info!(
            word = %record.word,
            part_of_speech = %record.part_of_speech,
            records = records.len() + 1,
            "Added entry"
        );

        Ok(record)
    }

    /// All entries for `word`, numbered from 1 in file order.
    ///
    /// An unknown or blank word gives an empty list.
    pub fn lookup(&self, word: &str) -> Result<Vec<IndexedEntry>> {
        let records = self.store.load()?;
        let entries = entries_for(records, word);
        debug!(word = %word.trim(), matches = entries.len(), "Looked up word");
        Ok(entries)
    }

    /// The `index`th entry (1-based) for `word`.
    ///
    /// Index 0 is a validation error. A blank word or an index past the last
    /// match is `NoSuchIndex`.
    pub fn retrieve(&self, word: &str, index: usize) -> Result<Record> {
        check_index(index)?;
        let mut records = self.store.load()?;
        let position = locate(&records, word, index)?;
        Ok(records.swap_remove(position))
    }

    /// Remove the first entry matching the triple.
    ///
    /// All three parts are required. Other entries, including later
    /// duplicates of the same triple, are written back unchanged.
    #[instrument(skip(self, key), fields(word = %key.word))]
    pub fn delete(&self, key: &EntryKey) -> Result<Record> {
        let key = EntryKey::new(&key.word, &key.part_of_speech, &key.definition);
        require(Field::Word, &key.word)?;
        require(Field::PartOfSpeech, &key.part_of_speech)?;
        require(Field::Definition, &key.definition)?;

        let mut records = self.store.load()?;
        let position = records
            .iter()
            .position(|r| key.matches(r))
            .ok_or_else(|| LexisError::NoMatchingEntry {
                word: key.word.clone(),
                part_of_speech: key.part_of_speech.clone(),
                definition: key.definition.clone(),
            })?;

        let removed = records.remove(position);
        self.store.rewrite(&records)?;

        info!(
            word = %removed.word,
            part_of_speech = %removed.part_of_speech,
            records = records.len(),
            "Deleted entry"
        );

        Ok(removed)
    }

    /// Overwrite all five fields of the `index`th entry (1-based) for `word`.
    ///
    /// The new values are validated like `add`. If a different entry already
    /// has the new triple the edit fails with `Duplicate`. Every other record
    /// is written back unchanged and in place.
    #[instrument(skip(self, input))]
    pub fn edit(&self, word: &str, index: usize, input: &EntryInput) -> Result<EditOutcome> {
        check_index(index)?;
        let updated = self.validate(input)?;
        let key = updated.key();

        let mut records = self.store.load()?;
        let position = locate(&records, word, index)?;

        let collides = records
            .iter()
            .enumerate()
            .any(|(i, r)| i != position && key.matches(r));
        if collides {
            return Err(duplicate(key));
        }

        let previous = std::mem::replace(&mut records[position], updated.clone());
        self.store.rewrite(&records)?;

        info!(
            word = %previous.word,
            index,
            new_word = %updated.word,
            "Edited entry"
        );

        Ok(EditOutcome { previous, updated })
    }

    /// The distinct words in the store, sorted.
    pub fn words(&self) -> Result<BTreeSet<String>> {
        let records = self.store.load()?;
        Ok(distinct_words(&records))
    }

    /// Distinct words and the entries for `word` from a single read.
    ///
    /// This is what a form redraws after add, edit, or delete.
    pub fn view(&self, word: &str) -> Result<WordView> {
        let records = self.store.load()?;
        let words = distinct_words(&records);
        let entries = entries_for(records, word);
        Ok(WordView { words, entries })
    }

    /// Record and word counts.
    pub fn stats(&self) -> Result<DictionaryStats> {
        let records = self.store.load()?;
        Ok(DictionaryStats {
            records: records.len(),
            words: distinct_words(&records).len(),
            path: self.store.path().to_path_buf(),
            has_backup: self.store.has_backup(),
        })
    }

    /// Say `word` with the chosen voice.
    ///
    /// The word must be in the store. Blocks until the speaker is done.
    pub fn pronounce(&self, speaker: &mut dyn Speaker, word: &str, voice: Voice) -> Result<()> {
        let word = word.trim();
        require(Field::Word, word)?;

        let records = self.store.load()?;
        if !records.iter().any(|r| r.is_word(word)) {
            return Err(LexisError::UnknownWord {
                word: word.to_string(),
            });
        }

        debug!(word, %voice, backend = speaker.name(), "Pronouncing word");
        speaker.set_voice(voice);
        speaker.speak(word)
    }

    /// Trim the form values and check the required fields.
    fn validate(&self, input: &EntryInput) -> Result<Record> {
        let record = Record::new(
            input.word.trim(),
            input.part_of_speech.trim(),
            input.definition.trim(),
            input.synonyms.trim(),
            input.antonyms.trim(),
        );

        require(Field::Word, &record.word)?;
        require(Field::PartOfSpeech, &record.part_of_speech)?;
        require(Field::Definition, &record.definition)?;

        if !self.rules.strict_part_of_speech {
            return Ok(record);
        }

        let canonical = self
            .rules
            .parts_of_speech
            .iter()
            .map(|p| p.trim())
            .find(|p| p.eq_ignore_ascii_case(&record.part_of_speech))
            .ok_or_else(|| {
                LexisError::validation(
                    Field::PartOfSpeech,
                    format!(
                        "'{}' is not one of: {}",
                        record.part_of_speech,
                        self.rules.parts_of_speech.join(", ")
                    ),
                )
            })?;

        Ok(Record {
            part_of_speech: canonical.to_string(),
            ..record
        })
    }
}

fn require(field: Field, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LexisError::validation(field, "is required"));
    }
    Ok(())
}

fn check_index(index: usize) -> Result<()> {
    if index == 0 {
        return Err(LexisError::validation(
            Field::Index,
            "must be a positive number (the first entry is 1)",
        ));
    }
    Ok(())
}

fn duplicate(key: EntryKey) -> LexisError {
    LexisError::Duplicate {
        word: key.word,
        part_of_speech: key.part_of_speech,
        definition: key.definition,
    }
}

fn distinct_words(records: &[Record]) -> BTreeSet<String> {
    records
        .iter()
        .map(|r| r.word.trim())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn entries_for(records: Vec<Record>, word: &str) -> Vec<IndexedEntry> {
    if word.trim().is_empty() {
        return Vec::new();
    }

    records
        .into_iter()
        .filter(|r| r.is_word(word))
        .enumerate()
        .map(|(i, record)| IndexedEntry {
            index: i + 1,
            record,
        })
        .collect()
}

/// Position in `records` of the `index`th (1-based) record of `word`.
fn locate(records: &[Record], word: &str, index: usize) -> Result<usize> {
    let word = word.trim();
    let mut matches = 0;

    if !word.is_empty() {
        for (position, record) in records.iter().enumerate() {
            if record.is_word(word) {
                matches += 1;
                if matches == index {
                    return Ok(position);
                }
            }
        }
    }

    Err(LexisError::NoSuchIndex {
        word: word.to_string(),
        index,
        matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_dictionary(temp_dir: &TempDir) -> Dictionary {
        Dictionary::new(RecordStore::new(temp_dir.path().join("dictionary.csv")))
    }

    fn cat_input() -> EntryInput {
        EntryInput::new("cat", "noun", "a feline")
            .with_synonyms("kitty")
            .with_antonyms("dog")
    }

    /// cat (x3: two share a triple), run, cat-verb
    fn seeded(temp_dir: &TempDir) -> Dictionary {
        let dictionary = make_dictionary(temp_dir);
        let store = dictionary.store();
        store.append(&Record::new("cat", "noun", "a feline", "kitty", "dog")).unwrap();
        store.append(&Record::new("run", "verb", "to move fast", "sprint", "walk")).unwrap();
        store.append(&Record::new("cat", "noun", "a feline", "moggy", "")).unwrap();
        store.append(&Record::new("cat", "verb", "to retrieve", "", "")).unwrap();
        dictionary
    }

    fn store_size(dictionary: &Dictionary) -> usize {
        dictionary.store().load().unwrap().len()
    }

    #[test]
    fn test_add_then_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = make_dictionary(&temp_dir);

        let added = dictionary.add(&cat_input()).unwrap();
        let results = dictionary.lookup("cat").unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 1);
        assert_eq!(results[0].record, added);
        assert_eq!(added, Record::new("cat", "noun", "a feline", "kitty", "dog"));
    }

    #[test]
    fn test_add_trims_and_canonicalizes() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = make_dictionary(&temp_dir);

        let input = EntryInput::new("  cat ", "Noun", " a feline ").with_synonyms(" kitty ");
        let added = dictionary.add(&input).unwrap();

        assert_eq!(added.word, "cat");
        assert_eq!(added.part_of_speech, "noun");
        assert_eq!(added.definition, "a feline");
        assert_eq!(added.synonyms, "kitty");
        assert_eq!(dictionary.store().load().unwrap(), vec![added]);
    }

    #[test]
    fn test_add_missing_information() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = make_dictionary(&temp_dir);

        for input in [
            EntryInput::new("", "noun", "a feline"),
            EntryInput::new("cat", "  ", "a feline"),
            EntryInput::new("cat", "noun", ""),
        ] {
            let err = dictionary.add(&input).unwrap_err();
            assert!(matches!(err, LexisError::Validation { .. }), "{err}");
        }

        assert!(!dictionary.store().exists());
    }

    #[test]
    fn test_add_unknown_part_of_speech() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = make_dictionary(&temp_dir);

        let err = dictionary
            .add(&EntryInput::new("cat", "gerund", "a feline"))
            .unwrap_err();
        assert!(matches!(
            err,
            LexisError::Validation {
                field: Field::PartOfSpeech,
                ..
            }
        ));

        let lenient = make_dictionary(&temp_dir).with_rules(DictionaryConfig {
            strict_part_of_speech: false,
            ..DictionaryConfig::default()
        });
        let added = lenient.add(&EntryInput::new("cat", "gerund", "a feline")).unwrap();
        assert_eq!(added.part_of_speech, "gerund");
    }

    #[test]
    fn test_add_duplicate_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = make_dictionary(&temp_dir);
        dictionary
            .store()
            .append(&Record::new("cat", "noun", "a feline", "kitty", "dog"))
            .unwrap();

        let err = dictionary.add(&cat_input()).unwrap_err();
        assert!(matches!(err, LexisError::Duplicate { .. }));
        assert_eq!(store_size(&dictionary), 1);

        // Differing only in synonyms/antonyms is still the same triple
        let err = dictionary
            .add(&EntryInput::new("cat", "noun", " a feline "))
            .unwrap_err();
        assert!(matches!(err, LexisError::Duplicate { .. }));
        assert_eq!(store_size(&dictionary), 1);

        dictionary
            .add(&EntryInput::new("cat", "verb", "to retrieve"))
            .unwrap();
        assert_eq!(store_size(&dictionary), 2);
    }

    #[test]
    fn test_lookup_numbers_in_file_order() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);

        let results = dictionary.lookup("cat").unwrap();
        let indices: Vec<usize> = results.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(results[1].record.synonyms, "moggy");
        assert_eq!(results[2].record.part_of_speech, "verb");
    }

    #[test]
    fn test_lookup_unknown_word_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);

        assert!(dictionary.lookup("dog").unwrap().is_empty());
        assert!(dictionary.lookup("").unwrap().is_empty());
        assert!(dictionary.lookup("Cat").unwrap().is_empty());
    }

    #[test]
    fn test_lookup_matches_untrimmed_stored_word() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = make_dictionary(&temp_dir);
        fs::write(
            dictionary.store().path(),
            "cat ;noun;a feline;;\ncat;verb;to retrieve;;\n",
        )
        .unwrap();

        let results = dictionary.lookup("cat").unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(dictionary.retrieve("cat", 1).unwrap().word, "cat ");
        assert_eq!(dictionary.words().unwrap().len(), 1);
    }

    #[test]
    fn test_retrieve_every_index() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);

        let looked_up = dictionary.lookup("cat").unwrap();
        for entry in &looked_up {
            assert_eq!(dictionary.retrieve("cat", entry.index).unwrap(), entry.record);
        }

        let err = dictionary.retrieve("cat", looked_up.len() + 1).unwrap_err();
        assert!(matches!(
            err,
            LexisError::NoSuchIndex {
                index: 4,
                matches: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_retrieve_bad_inputs() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);

        let err = dictionary.retrieve("cat", 0).unwrap_err();
        assert!(matches!(
            err,
            LexisError::Validation {
                field: Field::Index,
                ..
            }
        ));

        let err = dictionary.retrieve("  ", 1).unwrap_err();
        assert!(err.is_not_found());

        let err = dictionary.retrieve("dog", 1).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_removes_first_duplicate_only() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);
        let before = dictionary.store().load().unwrap();

        let removed = dictionary
            .delete(&EntryKey::new(" cat", "noun", "a feline "))
            .unwrap();
        assert_eq!(removed.synonyms, "kitty");

        let after = dictionary.store().load().unwrap();
        assert_eq!(after.len(), before.len() - 1);
        assert_eq!(after, before[1..].to_vec());
    }

    #[test]
    fn test_delete_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);
        let before = fs::read(dictionary.store().path()).unwrap();

        let err = dictionary
            .delete(&EntryKey::new("cat", "adjective", "a feline"))
            .unwrap_err();
        assert!(matches!(err, LexisError::NoMatchingEntry { .. }));
        assert_eq!(fs::read(dictionary.store().path()).unwrap(), before);
        assert!(!dictionary.store().has_backup());
    }

    #[test]
    fn test_delete_incomplete_key() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);

        let err = dictionary.delete(&EntryKey::new("cat", "", "a feline")).unwrap_err();
        assert!(matches!(
            err,
            LexisError::Validation {
                field: Field::PartOfSpeech,
                ..
            }
        ));
        assert_eq!(store_size(&dictionary), 4);
    }

    #[test]
    fn test_edit_changes_only_target() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);
        let before = dictionary.store().load().unwrap();

        let input = EntryInput::new("cat", "noun", "a small feline")
            .with_synonyms("moggy, puss")
            .with_antonyms("");
        let outcome = dictionary.edit("cat", 2, &input).unwrap();

        assert_eq!(outcome.previous, before[2]);
        assert_eq!(outcome.updated.definition, "a small feline");

        let after = dictionary.store().load().unwrap();
        assert_eq!(after.len(), before.len());
        for (i, (old, new)) in before.iter().zip(&after).enumerate() {
            if i == 2 {
                assert_eq!(new, &outcome.updated);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_edit_can_rename_word() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);

        dictionary
            .edit("cat", 3, &EntryInput::new("fetch", "verb", "to retrieve"))
            .unwrap();

        assert_eq!(dictionary.lookup("cat").unwrap().len(), 2);
        assert_eq!(dictionary.lookup("fetch").unwrap().len(), 1);
        assert_eq!(store_size(&dictionary), 4);
    }

    #[test]
    fn test_edit_rejects_collision() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);
        let before = dictionary.store().load().unwrap();

        let err = dictionary
            .edit("run", 1, &EntryInput::new("cat", "verb", "to retrieve"))
            .unwrap_err();
        assert!(matches!(err, LexisError::Duplicate { .. }));
        assert_eq!(dictionary.store().load().unwrap(), before);

        // Keeping its own triple is not a collision
        dictionary
            .edit("run", 1, &EntryInput::new("run", "verb", "to move fast").with_synonyms("dash"))
            .unwrap();
        assert_eq!(dictionary.retrieve("run", 1).unwrap().synonyms, "dash");
    }

    #[test]
    fn test_edit_missing_target() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);

        let err = dictionary
            .edit("run", 2, &EntryInput::new("run", "verb", "to flow"))
            .unwrap_err();
        assert!(matches!(err, LexisError::NoSuchIndex { matches: 1, .. }));

        let err = dictionary
            .edit("run", 1, &EntryInput::new("run", "verb", ""))
            .unwrap_err();
        assert!(matches!(err, LexisError::Validation { .. }));
    }

    #[test]
    fn test_words_are_distinct() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);

        let words: Vec<String> = dictionary.words().unwrap().into_iter().collect();
        assert_eq!(words, vec!["cat".to_string(), "run".to_string()]);
    }

    #[test]
    fn test_view_after_mutation() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);

        dictionary.add(&EntryInput::new("dog", "noun", "a canine")).unwrap();
        let view = dictionary.view("dog").unwrap();

        assert!(view.words.contains("dog"));
        assert_eq!(view.words.len(), 3);
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].record.definition, "a canine");
    }

    #[test]
    fn test_stats() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);

        let stats = dictionary.stats().unwrap();
        assert_eq!(stats.records, 4);
        assert_eq!(stats.words, 2);
        assert!(!stats.has_backup);

        dictionary.delete(&EntryKey::new("run", "verb", "to move fast")).unwrap();
        assert!(dictionary.stats().unwrap().has_backup);
    }

    #[test]
    fn test_malformed_store_surfaces_error() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = make_dictionary(&temp_dir);
        fs::write(dictionary.store().path(), "cat;noun\n").unwrap();

        let err = dictionary.add(&cat_input()).unwrap_err();
        assert!(matches!(err, LexisError::MalformedRow { .. }));
        assert_eq!(fs::read_to_string(dictionary.store().path()).unwrap(), "cat;noun\n");
    }

    #[derive(Default)]
    struct RecordingSpeaker {
        voice: Option<Voice>,
        spoken: Vec<(Option<Voice>, String)>,
    }

    impl Speaker for RecordingSpeaker {
        fn set_voice(&mut self, voice: Voice) {
            self.voice = Some(voice);
        }

        fn speak(&mut self, text: &str) -> Result<()> {
            self.spoken.push((self.voice, text.to_string()));
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    #[test]
    fn test_pronounce() {
        let temp_dir = TempDir::new().unwrap();
        let dictionary = seeded(&temp_dir);
        let mut speaker = RecordingSpeaker::default();

        dictionary
            .pronounce(&mut speaker, " run ", Voice::Secondary)
            .unwrap();
        assert_eq!(
            speaker.spoken,
            vec![(Some(Voice::Secondary), "run".to_string())]
        );

        let err = dictionary
            .pronounce(&mut speaker, "dog", Voice::Primary)
            .unwrap_err();
        assert!(matches!(err, LexisError::UnknownWord { .. }));

        let err = dictionary.pronounce(&mut speaker, "", Voice::Primary).unwrap_err();
        assert!(matches!(err, LexisError::Validation { .. }));
        assert_eq!(speaker.spoken.len(), 1);
    }
}
