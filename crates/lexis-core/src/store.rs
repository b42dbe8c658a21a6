//! Persistence layer for dictionary records.
//!
//! Records live in a plain delimited text file, one record per line, five
//! fields per record, no header row:
//!
//! ```text
//! "cat";"noun";"a feline";"kitty";"dog"
//! "run";"verb";"to move fast";"sprint";"walk"
//! ```
//!
//! Fields are quoted on write (configurable), so the delimiter, quotes, and
//! line breaks inside a field survive a round trip. Reading accepts bare
//! fields as well, along with `\n` or `\r\n` line endings.
//!
//! ## Writes
//!
//! - `append` adds one row at the end of the file.
//! - `rewrite` replaces the whole file: the new content goes to a temp file
//!   first, the old file is copied to a backup, then the temp file is renamed
//!   over the store. A failure before the rename leaves the old file intact.

use crate::config::{QuoteStyle, StoreConfig};
use crate::error::{LexisError, Result};
use crate::types::{Record, FIELD_COUNT};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads and writes the record file.
///
/// ## Example
///
/// ```rust,no_run
/// use lexis_core::{Record, RecordStore};
///
/// let store = RecordStore::new("./dictionary.csv");
/// store.append(&Record::new("cat", "noun", "a feline", "kitty", "dog"))?;
///
/// let records = store.load()?;
/// assert_eq!(records.last().unwrap().word, "cat");
/// # Ok::<(), lexis_core::LexisError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// Location of the record file
    path: PathBuf,

    /// Field separator
    delimiter: u8,

    /// Quoting applied on write
    quote_style: QuoteStyle,

    /// Whether `rewrite` keeps a copy of the previous contents
    backup: bool,
}

impl RecordStore {
    /// Create a store for the given file with default settings.
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        RecordStore {
            path: path.as_ref().to_path_buf(),
            delimiter: b';',
            quote_style: QuoteStyle::Always,
            backup: true,
        }
    }

    /// Create a store from configuration.
    ///
    /// The delimiter must already have been validated as ASCII.
    pub fn from_config(path: impl AsRef<Path>, config: &StoreConfig) -> Result<Self> {
        let delimiter = u8::try_from(config.delimiter).map_err(|_| {
            LexisError::config(format!("delimiter {:?} is not ASCII", config.delimiter))
        })?;

        Ok(RecordStore::new(path)
            .with_delimiter(delimiter)
            .with_quote_style(config.quote_style)
            .with_backup(config.backup))
    }

    /// Set the field separator.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quoting used when writing.
    pub fn with_quote_style(mut self, quote_style: QuoteStyle) -> Self {
        self.quote_style = quote_style;
        self
    }

    /// Set whether rewrites keep a backup copy.
    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Get the path to the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the path to the backup copy.
    pub fn backup_path(&self) -> PathBuf {
        sibling(&self.path, "bak")
    }

    fn temp_path(&self) -> PathBuf {
        sibling(&self.path, "tmp")
    }

    /// Check if the record file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Check if a backup copy exists.
    pub fn has_backup(&self) -> bool {
        self.backup_path().exists()
    }

    /// Read every record in file order.
    ///
    /// A missing file is an empty store. A row with the wrong number of
    /// fields fails the whole load with `MalformedRow`.
    pub fn load(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Store file not found, treating as empty");
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let records = self.read_records(BufReader::new(file))?;

        debug!(
            path = %self.path.display(),
            records = records.len(),
            "Loaded records"
        );

        Ok(records)
    }

    fn read_records<R: Read>(&self, reader: R) -> Result<Vec<Record>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            if row.len() != FIELD_COUNT {
                return Err(LexisError::MalformedRow {
                    line: row.position().map(|p| p.line()).unwrap_or_default(),
                    found: row.len(),
                    expected: FIELD_COUNT,
                });
            }
            records.push(Record::from_row(row.iter()));
        }

        Ok(records)
    }

    /// Add one record at the end of the file.
    ///
    /// Creates the file and its directory if needed. No duplicate check is
    /// done here.
    pub fn append(&self, record: &Record) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;

        if needs_line_break(&mut file)? {
            file.write_all(b"\n")?;
        }

        let mut writer = self.writer(file);
        writer.write_record(record.as_row())?;
        writer.flush()?;

        info!(
            path = %self.path.display(),
            word = %record.word,
            "Appended record"
        );

        Ok(())
    }

    /// Replace the whole file with `records`, keeping their order.
    ///
    /// Uses atomic write (write to temp, then rename) so the store is never
    /// left truncated.
    pub fn rewrite(&self, records: &[Record]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.temp_path();
        let replaced = self.write_all_to(&temp_path, records).and_then(|()| {
            if self.backup && self.path.exists() {
                fs::copy(&self.path, self.backup_path())?;
            }
            fs::rename(&temp_path, &self.path)?;
            Ok(())
        });
        if let Err(e) = replaced {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        info!(
            path = %self.path.display(),
            records = records.len(),
            "Rewrote store"
        );

        Ok(())
    }

    fn write_all_to(&self, path: &Path, records: &[Record]) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = self.writer(file);
        for record in records {
            writer.write_record(record.as_row())?;
        }
        writer.flush()?;

        let file = writer
            .into_inner()
            .map_err(|e| LexisError::Io(std::io::Error::new(e.error().kind(), e.to_string())))?;
        file.sync_all()?;
        Ok(())
    }

    /// Put the backup copy back in place of the record file.
    pub fn restore_from_backup(&self) -> Result<Vec<Record>> {
        let backup_path = self.backup_path();

        if !backup_path.exists() {
            return Err(LexisError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no backup at {}", backup_path.display()),
            )));
        }

        // Parse first so a broken backup never replaces a good store
        let records = self.read_records(BufReader::new(File::open(&backup_path)?))?;

        let temp_path = self.temp_path();
        let replaced = fs::copy(&backup_path, &temp_path)
            .and_then(|_| OpenOptions::new().write(true).open(&temp_path)?.sync_all())
            .and_then(|()| fs::rename(&temp_path, &self.path));
        if let Err(e) = replaced {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        info!(
            path = %self.path.display(),
            records = records.len(),
            "Restored store from backup"
        );

        Ok(records)
    }

    fn writer<W: Write>(&self, inner: W) -> csv::Writer<W> {
        let quote_style = match self.quote_style {
            QuoteStyle::Always => csv::QuoteStyle::Always,
            QuoteStyle::Necessary => csv::QuoteStyle::Necessary,
        };

        csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .quote_style(quote_style)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner)
    }
}

/// `dictionary.csv` -> `dictionary.csv.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// True if the file is non-empty and its last byte is not a line break.
fn needs_line_break(file: &mut File) -> Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}
