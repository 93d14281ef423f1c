use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

use crate::recognition::{AudioEncoding, RecognitionConfig};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub auth: AuthConfig,
    pub recognition: RecognitionSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
    /// Browser origin allowed to reach the relay; unset allows no
    /// cross-origin access.
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// RS256 public key in PEM form, `\n`-escaped when supplied through the
    /// environment. Unset refuses every connection.
    pub public_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RecognitionSettings {
    /// NATS URL of the engine bridge.
    pub engine_url: String,
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
    pub language_code: String,
    pub enable_automatic_punctuation: bool,
    pub enable_word_time_offsets: bool,
    pub interim_results: bool,
    /// Close sessions with no traffic for this many seconds. Unset
    /// disables the idle check.
    pub idle_timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "speech-relay".to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3001,
            allowed_origin: None,
        }
    }
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            engine_url: "nats://localhost:4222".to_string(),
            encoding: AudioEncoding::WebmOpus,
            sample_rate_hertz: 16000,
            language_code: "en-US".to_string(),
            enable_automatic_punctuation: true,
            enable_word_time_offsets: true,
            interim_results: true,
            idle_timeout_secs: None,
        }
    }
}

impl RecognitionSettings {
    /// The per-stream configuration template sent to the engine.
    pub fn stream_template(&self) -> RecognitionConfig {
        RecognitionConfig {
            encoding: self.encoding,
            sample_rate_hertz: self.sample_rate_hertz,
            language_code: self.language_code.clone(),
            enable_automatic_punctuation: self.enable_automatic_punctuation,
            enable_word_time_offsets: self.enable_word_time_offsets,
            interim_results: self.interim_results,
        }
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from a TOML file layered with
    /// `SPEECH_RELAY__`-prefixed environment variables (for example
    /// `SPEECH_RELAY__AUTH__PUBLIC_KEY`). The file is optional; every
    /// field has a default.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("SPEECH_RELAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
