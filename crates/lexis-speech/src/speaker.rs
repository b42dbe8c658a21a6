//! Speaker that runs a system speech program.

use crate::engine::{self, SpeechCommand, Utterance};
use crate::error::SpeechError;
use lexis_core::config::{SpeechConfig, SpeechEngine};
use lexis_core::{Speaker, Voice};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Speaks by running `say`, `espeak-ng`, or PowerShell and waiting for it.
///
/// Voices map onto system voice names from [`SpeechConfig`]; a voice with no
/// configured name uses the program's default voice.
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    engine: SpeechEngine,
    program: String,
    primary_voice: Option<String>,
    secondary_voice: Option<String>,
    rate: Option<u32>,
    voice: Voice,
}

impl CommandSpeaker {
    /// Create a speaker for an engine with its default program and voices.
    pub fn new(engine: SpeechEngine) -> Self {
        let engine = engine::resolve_engine(engine);
        CommandSpeaker {
            engine,
            program: engine::default_program(engine).to_string(),
            primary_voice: None,
            secondary_voice: None,
            rate: None,
            voice: Voice::Primary,
        }
    }

    /// Create a speaker from configuration.
    pub fn from_config(config: &SpeechConfig) -> Self {
        let mut speaker = CommandSpeaker::new(config.engine);
        if let Some(ref program) = config.program {
            speaker.program = program.clone();
        }
        speaker.primary_voice = config.primary_voice.clone();
        speaker.secondary_voice = config.secondary_voice.clone();
        speaker.rate = config.rate;
        speaker.voice = config.default_voice;
        speaker
    }

    /// Set the system voice name used for a voice.
    pub fn with_voice_name(mut self, voice: Voice, name: impl Into<String>) -> Self {
        match voice {
            Voice::Primary => self.primary_voice = Some(name.into()),
            Voice::Secondary => self.secondary_voice = Some(name.into()),
        }
        self
    }

    /// The currently selected voice
    pub fn voice(&self) -> Voice {
        self.voice
    }

    /// The command `speak` would run for `text`.
    pub fn command(&self, text: &str) -> SpeechCommand {
        let voice = match self.voice {
            Voice::Primary => self.primary_voice.as_deref(),
            Voice::Secondary => self.secondary_voice.as_deref(),
        };

        engine::build(
            self.engine,
            &self.program,
            Utterance {
                text,
                voice,
                rate: self.rate,
            },
        )
    }

    fn run(&self, text: &str) -> Result<(), SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let cmd = self.command(text);
        debug!(program = %cmd.program, args = ?cmd.args, "Running speech program");

        let status = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| SpeechError::Spawn {
                program: cmd.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(SpeechError::Failed {
                program: cmd.program,
                code: status.code(),
            });
        }

        info!(text, voice = %self.voice, "Spoke text");
        Ok(())
    }
}

impl Speaker for CommandSpeaker {
    fn set_voice(&mut self, voice: Voice) {
        self.voice = voice;
    }

    fn speak(&mut self, text: &str) -> lexis_core::Result<()> {
        self.run(text)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        match self.engine {
            SpeechEngine::Say => "say",
            SpeechEngine::Sapi => "sapi",
            _ => "espeak",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_core::LexisError;

    #[test]
    fn test_voice_selects_configured_name() {
        let mut speaker = CommandSpeaker::new(SpeechEngine::Espeak)
            .with_voice_name(Voice::Primary, "en-us")
            .with_voice_name(Voice::Secondary, "en-gb");

        assert_eq!(speaker.command("cat").args, vec!["-v", "en-us", "--", "cat"]);

        speaker.set_voice(Voice::Secondary);
        assert_eq!(speaker.voice(), Voice::Secondary);
        assert_eq!(speaker.command("cat").args, vec!["-v", "en-gb", "--", "cat"]);
    }

    #[test]
    fn test_from_config() {
        let config = SpeechConfig {
            engine: SpeechEngine::Say,
            program: Some("/usr/local/bin/say".to_string()),
            secondary_voice: Some("Daniel".to_string()),
            default_voice: Voice::Secondary,
            rate: Some(150),
            ..SpeechConfig::default()
        };
        let speaker = CommandSpeaker::from_config(&config);

        let cmd = speaker.command("run");
        assert_eq!(cmd.program, "/usr/local/bin/say");
        assert_eq!(cmd.args, vec!["-v", "Daniel", "-r", "150", "--", "run"]);
        assert_eq!(speaker.name(), "say");
    }

    #[test]
    fn test_unvoiced_default_has_no_voice_flag() {
        let speaker = CommandSpeaker::new(SpeechEngine::Espeak);
        assert_eq!(speaker.command("cat").args, vec!["--", "cat"]);
    }

    #[test]
    fn test_dashed_word_follows_end_of_options() {
        let speaker = CommandSpeaker::new(SpeechEngine::Espeak).with_voice_name(Voice::Primary, "en");
        let args = speaker.command("-w/tmp/out.wav").args;
        assert_eq!(args, vec!["-v", "en", "--", "-w/tmp/out.wav"]);
    }

    #[test]
    fn test_empty_text() {
        let mut speaker = CommandSpeaker::new(SpeechEngine::Espeak);
        let err = speaker.speak("   ").unwrap_err();
        assert!(matches!(err, LexisError::Speech { .. }));
    }

    #[test]
    fn test_missing_program() {
        let config = SpeechConfig {
            engine: SpeechEngine::Espeak,
            program: Some("lexis-no-such-speech-program".to_string()),
            ..SpeechConfig::default()
        };
        let speaker = CommandSpeaker::from_config(&config);

        let err = speaker.run("cat").unwrap_err();
        assert!(err.is_missing_program());
    }
}
