//! # Lexis Core Library
//!
//! This crate provides the record store and dictionary operations for Lexis,
//! a personal dictionary kept in a delimited text file. It has no UI of its
//! own; a front end calls the operations and renders what they return.
//!
//! ## Architecture
//!
//! - **Types** (`types`): Records, form input, and operation results
//! - **Store** (`store`): Reading, appending, and rewriting the record file
//! - **Dictionary** (`dictionary`): Add, lookup, retrieve, edit, delete
//! - **Speech** (`speech`): Interface to a text-to-speech backend
//! - **Config** (`config`): Configuration management
//!
//! ## Example
//!
//! ```rust,ignore
//! use lexis_core::{Config, Dictionary, EntryInput, EntryKey};
//!
//! let dictionary = Dictionary::from_config(&Config::load()?)?;
//!
//! dictionary.add(&EntryInput::new("cat", "noun", "a feline"))?;
//! let second = dictionary.retrieve("cat", 2)?;
//! dictionary.delete(&EntryKey::new("cat", "noun", "a feline"))?;
//! ```

pub mod config;
pub mod dictionary;
pub mod error;
pub mod speech;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use dictionary::Dictionary;
pub use error::{LexisError, Result};
pub use speech::{Speaker, Voice};
pub use store::RecordStore;
pub use types::{
    DictionaryStats, EditOutcome, EntryInput, EntryKey, Field, IndexedEntry, Record, WordView,
};
