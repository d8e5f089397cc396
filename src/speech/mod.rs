//! Text-to-speech seam. The core only ever calls [`Speaker::speak`]; new requests
//! interrupt whatever is still playing and are never queued.

mod command;

use tracing::info;

pub use command::{detect_speech_command, CommandSpeaker, SpeechCommand, SpeechEngine};

/// Nominal speech parameters, mirroring the browser speech API ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Capability that vocalizes text. Implementations must never panic or block.
pub trait Speaker {
    /// Cancel any in-flight utterance, then start speaking `text`.
    fn speak(&mut self, text: &str);

    /// Stop the current utterance, if any.
    fn cancel(&mut self);

    /// Whether a real speech engine backs this speaker.
    fn is_available(&self) -> bool {
        true
    }

    /// Short human label for the status line.
    fn label(&self) -> String;
}

/// Used when the platform has no speech engine; every call is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&mut self, _text: &str) {}

    fn cancel(&mut self) {}

    fn is_available(&self) -> bool {
        false
    }

    fn label(&self) -> String {
        "speech off".to_string()
    }
}

/// Records requests instead of speaking them. Handy for tests and embedders.
#[derive(Debug, Default, Clone)]
pub struct MemorySpeaker {
    spoken: Vec<String>,
    cancels: usize,
}

impl MemorySpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }

    pub fn cancels(&self) -> usize {
        self.cancels
    }
}

impl Speaker for MemorySpeaker {
    fn speak(&mut self, text: &str) {
        self.cancel();
        self.spoken.push(text.to_string());
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }

    fn label(&self) -> String {
        "memory".to_string()
    }
}

impl<S: Speaker + ?Sized> Speaker for Box<S> {
    fn speak(&mut self, text: &str) {
        (**self).speak(text);
    }

    fn cancel(&mut self) {
        (**self).cancel();
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

/// Pick the speaker for this run: an explicit command, an auto-detected engine, or silence.
pub fn build_speaker(
    explicit: Option<SpeechCommand>,
    disabled: bool,
    settings: SpeechSettings,
) -> Box<dyn Speaker> {
    if disabled {
        info!("speech disabled by flag");
        return Box::new(NullSpeaker);
    }
    let command = explicit.or_else(detect_speech_command);
    match command {
        Some(command) => {
            info!(engine = %command.describe(), "speech engine selected");
            Box::new(CommandSpeaker::new(command, settings))
        }
        None => {
            info!("no speech engine found; speech calls will be silent");
            Box::new(NullSpeaker)
        }
    }
}
