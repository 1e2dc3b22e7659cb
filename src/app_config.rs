/*!
 * Application configuration.
 *
 * Loading, validating and saving the JSON configuration file.
 */

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;
use crate::language_utils;
use crate::selection::{ExcludedTrackPolicy, SelectionRules};
use crate::tracks::TargetLanguages;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Target audio language (ISO 639 code)
    #[serde(default = "default_audio_lang")]
    pub audio_lang: String,

    /// Target subtitle language (ISO 639 code)
    #[serde(default = "default_subs_lang")]
    pub subs_lang: String,

    /// Container file extensions to process
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Descend into subdirectories
    #[serde(default)]
    pub recursive: bool,

    /// Handling of excluded (commentary/song) tracks
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Per-type policy for tracks whose language matches but whose name is excluded
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionConfig {
    #[serde(default = "default_audio_excluded")]
    pub audio_excluded: ExcludedTrackPolicy,

    #[serde(default = "default_subtitle_excluded")]
    pub subtitle_excluded: ExcludedTrackPolicy,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            audio_excluded: default_audio_excluded(),
            subtitle_excluded: default_subtitle_excluded(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_audio_lang() -> String {
    "jpn".to_string()
}

fn default_subs_lang() -> String {
    "eng".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["mkv".to_string()]
}

fn default_audio_excluded() -> ExcludedTrackPolicy {
    SelectionRules::audio().excluded
}

fn default_subtitle_excluded() -> ExcludedTrackPolicy {
    SelectionRules::subtitles().excluded
}

impl Config {
    /// Load the configuration from a JSON file, writing a default one if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path).context(format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration and normalize language codes to the
    /// ISO 639-2/B form reported in Matroska track headers
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.audio_lang = language_utils::normalize_to_part2b(&self.audio_lang).map_err(|_| {
            ConfigError::InvalidLanguage {
                option: "audioLang",
                code: self.audio_lang.clone(),
            }
        })?;

        self.subs_lang = language_utils::normalize_to_part2b(&self.subs_lang).map_err(|_| {
            ConfigError::InvalidLanguage {
                option: "subsLang",
                code: self.subs_lang.clone(),
            }
        })?;

        self.extensions.retain(|ext| !ext.trim().trim_start_matches('.').is_empty());
        if self.extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }

        Ok(())
    }

    pub fn target_languages(&self) -> TargetLanguages {
        TargetLanguages::new(self.audio_lang.clone(), self.subs_lang.clone())
    }

    pub fn audio_rules(&self) -> SelectionRules {
        SelectionRules { excluded: self.selection.audio_excluded }
    }

    pub fn subtitle_rules(&self) -> SelectionRules {
        SelectionRules { excluded: self.selection.subtitle_excluded }
    }

    /// Human-readable targets for the startup log, e.g. "audio Japanese (jpn), subtitles English (eng)"
    pub fn describe_targets(&self) -> String {
        let describe = |code: &str| match language_utils::get_language_name(code) {
            Ok(name) => format!("{} ({})", name, code),
            Err(_) => code.to_string(),
        };
        format!(
            "audio {}, subtitles {}",
            describe(&self.audio_lang),
            describe(&self.subs_lang)
        )
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            audio_lang: default_audio_lang(),
            subs_lang: default_subs_lang(),
            extensions: default_extensions(),
            recursive: false,
            selection: SelectionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
