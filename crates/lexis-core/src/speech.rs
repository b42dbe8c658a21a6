//! Speech collaborator interface.
//!
//! The dictionary never produces audio itself. It hands a word to a
//! [`Speaker`], which is implemented outside the core (see the
//! `lexis-speech` crate for the system speech program backend).

use crate::error::{LexisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two selectable voices.
///
/// Each backend maps these onto concrete system voices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Voice {
    #[default]
    Primary,
    Secondary,
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Voice::Primary => write!(f, "primary"),
            Voice::Secondary => write!(f, "secondary"),
        }
    }
}

impl FromStr for Voice {
    type Err = LexisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "primary" | "a" | "1" => Ok(Voice::Primary),
            "secondary" | "b" | "2" => Ok(Voice::Secondary),
            _ => Err(LexisError::Speech {
                reason: format!("unknown voice '{}' (expected primary or secondary)", s),
            }),
        }
    }
}

/// Something that can say a word out loud.
///
/// `speak` blocks until playback has finished.
pub trait Speaker {
    /// Select the voice used by subsequent `speak` calls
    fn set_voice(&mut self, voice: Voice);

    /// Speak `text`, returning once it has been spoken
    fn speak(&mut self, text: &str) -> Result<()>;

    /// Get the backend name (e.g., "espeak", "say")
    fn name(&self) -> &'static str;
}
