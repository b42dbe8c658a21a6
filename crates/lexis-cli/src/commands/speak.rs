//! Speak command - pronounce a word.

use crate::app::App;
use lexis_core::Voice;

/// Run the speak command.
pub fn run(app: &App, word: &str, voice: Option<Voice>) -> anyhow::Result<()> {
    let mut speaker = app.speaker();
    let voice = voice.unwrap_or(app.config.speech.default_voice);

    app.dictionary.pronounce(&mut speaker, word, voice)?;
    Ok(())
}
