use super::defaults::{
    default_data_dir, MAX_SPEECH_CMD_BYTES, MAX_SPEECH_PITCH, MAX_SPEECH_RATE,
    MAX_SPEECH_VOLUME, MIN_SPEECH_RATE,
};
use super::AppConfig;
use crate::board::{load_catalog_file, BoardCatalog};
use crate::speech::{SpeechCommand, SpeechSettings};
use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

impl AppConfig {
    /// Parse CLI arguments and validate them right away.
    pub fn parse_args() -> Result<Self> {
        let mut config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check CLI values and normalize optional strings.
    pub fn validate(&mut self) -> Result<()> {
        if !self.speech_rate.is_finite()
            || !(MIN_SPEECH_RATE..=MAX_SPEECH_RATE).contains(&self.speech_rate)
        {
            bail!(
                "--speech-rate must be between {MIN_SPEECH_RATE} and {MAX_SPEECH_RATE}, got {}",
                self.speech_rate
            );
        }
        if !self.speech_pitch.is_finite() || !(0.0..=MAX_SPEECH_PITCH).contains(&self.speech_pitch)
        {
            bail!(
                "--speech-pitch must be between 0 and {MAX_SPEECH_PITCH}, got {}",
                self.speech_pitch
            );
        }
        if !self.speech_volume.is_finite()
            || !(0.0..=MAX_SPEECH_VOLUME).contains(&self.speech_volume)
        {
            bail!(
                "--speech-volume must be between 0 and {MAX_SPEECH_VOLUME}, got {}",
                self.speech_volume
            );
        }

        if let Some(raw) = &self.speech_cmd {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                bail!("--speech-cmd cannot be empty");
            }
            if trimmed.len() > MAX_SPEECH_CMD_BYTES {
                bail!("--speech-cmd must be at most {MAX_SPEECH_CMD_BYTES} bytes");
            }
            // Surface quoting mistakes now rather than on the first tile tap.
            SpeechCommand::parse(trimmed)?;
            self.speech_cmd = Some(trimmed.to_string());
        }

        if let Some(path) = &self.catalog_file {
            if !path.is_file() {
                bail!("--catalog-file '{}' does not exist", path.display());
            }
        }

        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                bail!("--data-dir cannot be empty");
            }
            if dir.exists() && !dir.is_dir() {
                bail!("--data-dir '{}' is not a directory", dir.display());
            }
        }

        Ok(())
    }

    /// Directory for persisted data, falling back to the platform default.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn speech_settings(&self) -> SpeechSettings {
        SpeechSettings {
            rate: self.speech_rate,
            pitch: self.speech_pitch,
            volume: self.speech_volume,
        }
    }

    /// Explicit speech command, if one was configured. Call after `validate`.
    pub fn speech_command(&self) -> Result<Option<SpeechCommand>> {
        self.speech_cmd
            .as_deref()
            .map(SpeechCommand::parse)
            .transpose()
    }

    /// The catalog file when given, otherwise the selected built-in set.
    pub fn load_catalog(&self) -> Result<BoardCatalog> {
        match &self.catalog_file {
            Some(path) => load_catalog_file(path),
            None => Ok(self.catalog.build()),
        }
    }

    pub(crate) fn logging_enabled(&self) -> bool {
        self.logs && !self.no_logs
    }
}
