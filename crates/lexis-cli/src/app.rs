//! Application state management.

use lexis_core::{Config, Dictionary, RecordStore};
use lexis_speech::CommandSpeaker;
use std::path::PathBuf;
use tracing::debug;

/// Shared application state.
pub struct App {
    /// Configuration
    pub config: Config,

    /// Entry operations over the store
    pub dictionary: Dictionary,
}

impl App {
    /// Create a new application instance.
    ///
    /// `store` overrides the store path from the configuration.
    pub fn new(config: Config, store: Option<PathBuf>) -> anyhow::Result<Self> {
        let dictionary = match store {
            Some(path) => Dictionary::new(RecordStore::from_config(path, &config.store)?)
                .with_rules(config.dictionary.clone()),
            None => Dictionary::from_config(&config)?,
        };

        debug!(
            store = %dictionary.store().path().display(),
            "Application initialized"
        );

        Ok(App { config, dictionary })
    }

    /// Build the speech backend from configuration.
    pub fn speaker(&self) -> CommandSpeaker {
        CommandSpeaker::from_config(&self.config.speech)
    }
}
