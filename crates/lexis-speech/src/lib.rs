//! # Lexis Speech Backend
//!
//! This crate provides the `Speaker` implementation used by the Lexis CLI.
//! Rather than linking a speech engine, it drives the speech program that
//! ships with the platform:
//!
//! - **macOS**: `say`
//! - **Windows**: PowerShell with `System.Speech` (SAPI)
//! - **Other**: `espeak-ng`
//!
//! ## Architecture
//!
//! - `engine.rs`: Per-engine command line construction
//! - `speaker.rs`: `CommandSpeaker`, which runs the command and waits for it
//!
//! Every engine's command builder is compiled on every platform; only the
//! choice made by `SpeechEngine::Auto` depends on the target.

mod engine;
mod speaker;

pub use engine::{resolve_engine, SpeechCommand};
pub use speaker::CommandSpeaker;

/// Error types specific to the speech backend
pub mod error;
pub use error::SpeechError;
