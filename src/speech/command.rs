use super::{SpeechSettings, Speaker};
use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tracing::{debug, warn};

/// Words per minute that corresponds to a rate of 1.0.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// Known command-line speech engines, tried in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechEngine {
    Say,
    EspeakNg,
    Espeak,
    SpdSay,
    /// User-supplied command; receives the text as its last argument, no tuning flags.
    Custom,
}

const DETECTION_ORDER: [SpeechEngine; 4] = [
    SpeechEngine::Say,
    SpeechEngine::EspeakNg,
    SpeechEngine::Espeak,
    SpeechEngine::SpdSay,
];

impl SpeechEngine {
    fn binary(self) -> Option<&'static str> {
        match self {
            SpeechEngine::Say => Some("say"),
            SpeechEngine::EspeakNg => Some("espeak-ng"),
            SpeechEngine::Espeak => Some("espeak"),
            SpeechEngine::SpdSay => Some("spd-say"),
            SpeechEngine::Custom => None,
        }
    }

    fn from_program(program: &str) -> Self {
        let name = Path::new(program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(program);
        DETECTION_ORDER
            .into_iter()
            .find(|engine| engine.binary() == Some(name))
            .unwrap_or(SpeechEngine::Custom)
    }

    /// Flags that apply rate, pitch and volume for this engine.
    pub(crate) fn tuning_args(self, settings: SpeechSettings) -> Vec<String> {
        let wpm = (BASE_WORDS_PER_MINUTE * settings.rate).round().max(1.0) as u32;
        match self {
            SpeechEngine::Say => vec!["-r".into(), wpm.to_string()],
            SpeechEngine::EspeakNg | SpeechEngine::Espeak => {
                let pitch = (settings.pitch * 50.0).round().clamp(0.0, 99.0) as u32;
                let amplitude = (settings.volume * 100.0).round().clamp(0.0, 200.0) as u32;
                vec![
                    "-s".into(),
                    wpm.to_string(),
                    "-p".into(),
                    pitch.to_string(),
                    "-a".into(),
                    amplitude.to_string(),
                ]
            }
            SpeechEngine::SpdSay => {
                let rate = ((settings.rate - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32;
                let pitch = ((settings.pitch - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32;
                let volume = (settings.volume * 200.0 - 100.0).round().clamp(-100.0, 100.0) as i32;
                vec![
                    "-r".into(),
                    rate.to_string(),
                    "-p".into(),
                    pitch.to_string(),
                    "-i".into(),
                    volume.to_string(),
                ]
            }
            SpeechEngine::Custom => Vec::new(),
        }
    }
}

/// A resolved speech program plus any fixed leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechCommand {
    pub engine: SpeechEngine,
    pub program: String,
    pub args: Vec<String>,
}

impl SpeechCommand {
    /// Split a shell-style command line such as `espeak-ng -v en-us`.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut words = shell_words::split(raw)
            .with_context(|| format!("failed to parse speech command '{raw}'"))?
            .into_iter();
        let Some(program) = words.next() else {
            bail!("speech command cannot be empty");
        };
        let engine = SpeechEngine::from_program(&program);
        Ok(Self {
            engine,
            program,
            args: words.collect(),
        })
    }

    pub fn describe(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, shell_words::join(&self.args))
        }
    }

    /// Full argv (without the program) for speaking `text`.
    pub(crate) fn argv(&self, settings: SpeechSettings, text: &str) -> Vec<String> {
        let mut argv = self.args.clone();
        argv.extend(self.engine.tuning_args(settings));
        if self.engine != SpeechEngine::Custom {
            argv.push("--".to_string());
        }
        argv.push(text.to_string());
        argv
    }
}

/// Probe `PATH` for a known speech engine.
pub fn detect_speech_command() -> Option<SpeechCommand> {
    let path = env::var_os("PATH")?;
    let dirs: Vec<PathBuf> = env::split_paths(&path).collect();
    DETECTION_ORDER.into_iter().find_map(|engine| {
        let binary = engine.binary()?;
        let found = dirs
            .iter()
            .map(|dir| dir.join(binary))
            .find(|candidate| candidate.is_file())?;
        Some(SpeechCommand {
            engine,
            program: found.to_string_lossy().to_string(),
            args: Vec::new(),
        })
    })
}

/// Speaks by running a TTS program per utterance. Starting a new utterance kills the
/// previous process, so at most one voice plays at a time.
pub struct CommandSpeaker {
    command: SpeechCommand,
    settings: SpeechSettings,
    child: Option<Child>,
}

impl CommandSpeaker {
    pub fn new(command: SpeechCommand, settings: SpeechSettings) -> Self {
        Self {
            command,
            settings,
            child: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn has_child(&self) -> bool {
        self.child.is_some()
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str) {
        self.cancel();
        let mut cmd = Command::new(&self.command.program);
        cmd.args(self.command.argv(self.settings, text));
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());
        match cmd.spawn() {
            Ok(child) => {
                debug!(pid = child.id(), "speech process started");
                self.child = Some(child);
            }
            Err(err) => {
                warn!(program = %self.command.program, error = %err, "failed to start speech process");
            }
        }
    }

    fn cancel(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        match child.try_wait() {
            Ok(Some(_)) => {}
            _ => {
                let _ = child.kill();
                let _ = child.wait();
                debug!("interrupted speech process");
            }
        }
    }

    fn label(&self) -> String {
        self.command.describe()
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}
