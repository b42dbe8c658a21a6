//! Command lines for each supported speech program.

use lexis_core::config::SpeechEngine;

/// A program and its arguments, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Settings that shape a single utterance.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Utterance<'a> {
    pub text: &'a str,
    pub voice: Option<&'a str>,
    pub rate: Option<u32>,
}

/// Pick a concrete engine for `Auto`.
pub fn resolve_engine(engine: SpeechEngine) -> SpeechEngine {
    match engine {
        SpeechEngine::Auto if cfg!(target_os = "macos") => SpeechEngine::Say,
        SpeechEngine::Auto if cfg!(windows) => SpeechEngine::Sapi,
        SpeechEngine::Auto => SpeechEngine::Espeak,
        other => other,
    }
}

/// Default binary for an engine.
pub(crate) fn default_program(engine: SpeechEngine) -> &'static str {
    match resolve_engine(engine) {
        SpeechEngine::Say => "say",
        SpeechEngine::Sapi => "powershell",
        _ => "espeak-ng",
    }
}

/// Build the command line that speaks `utterance` with `program`.
pub(crate) fn build(engine: SpeechEngine, program: &str, utterance: Utterance<'_>) -> SpeechCommand {
    let args = match resolve_engine(engine) {
        SpeechEngine::Say => say_args(utterance),
        SpeechEngine::Sapi => sapi_args(utterance),
        _ => espeak_args(utterance),
    };

    SpeechCommand {
        program: program.to_string(),
        args,
    }
}

fn say_args(utterance: Utterance<'_>) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(voice) = utterance.voice {
        args.push("-v".to_string());
        args.push(voice.to_string());
    }
    if let Some(rate) = utterance.rate {
        args.push("-r".to_string());
        args.push(rate.to_string());
    }
    end_of_options(&mut args, utterance.text);
    args
}

fn espeak_args(utterance: Utterance<'_>) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(voice) = utterance.voice {
        args.push("-v".to_string());
        args.push(voice.to_string());
    }
    if let Some(rate) = utterance.rate {
        args.push("-s".to_string());
        args.push(rate.to_string());
    }
    end_of_options(&mut args, utterance.text);
    args
}

/// Words may start with `-`; `--` keeps them from being read as options.
fn end_of_options(args: &mut Vec<String>, text: &str) {
    args.push("--".to_string());
    args.push(text.to_string());
}

/// SAPI takes a rate from -10 to 10 instead of words per minute; 0 is
/// roughly 180 wpm and each step about 20 wpm.
fn sapi_rate(wpm: u32) -> i64 {
    ((i64::from(wpm) - 180) / 20).clamp(-10, 10)
}

fn sapi_args(utterance: Utterance<'_>) -> Vec<String> {
    let mut script = String::from(
        "Add-Type -AssemblyName System.Speech; \
         $s = New-Object System.Speech.Synthesis.SpeechSynthesizer; ",
    );
    if let Some(voice) = utterance.voice {
        script.push_str(&format!("$s.SelectVoice({}); ", ps_quote(voice)));
    }
    if let Some(rate) = utterance.rate {
        script.push_str(&format!("$s.Rate = {}; ", sapi_rate(rate)));
    }
    script.push_str(&format!("$s.Speak({})", ps_quote(utterance.text)));

    vec![
        "-NoProfile".to_string(),
        "-NonInteractive".to_string(),
        "-Command".to_string(),
        script,
    ]
}

/// Single-quoted PowerShell literal.
fn ps_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
