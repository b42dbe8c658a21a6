//! Error types for the speech backend.

use lexis_core::LexisError;
use thiserror::Error;

/// Errors specific to speech backend operations.
#[derive(Error, Debug)]
pub enum SpeechError {
    /// Nothing to say
    #[error("nothing to speak")]
    EmptyText,

    /// The speech program could not be started
    #[error("failed to start {program}: {source} (is it installed?)")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The speech program ran but reported failure
    #[error("{program} exited with {}", status_text(.code))]
    Failed { program: String, code: Option<i32> },
}

impl SpeechError {
    /// Check if this error indicates the speech program is not installed
    pub fn is_missing_program(&self) -> bool {
        matches!(
            self,
            SpeechError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

fn status_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl From<SpeechError> for LexisError {
    fn from(err: SpeechError) -> Self {
        LexisError::Speech {
            reason: err.to_string(),
        }
    }
}
