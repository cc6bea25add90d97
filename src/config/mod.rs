//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `JOBMATCH_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::{DEFAULT_EMBEDDING_CACHE_CAPACITY, DEFAULT_TOP_K};
use crate::embedding::EncoderConfig;
use crate::phrases::PhraseConfig;

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `JOBMATCH_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Sentence-encoder model directory. Required unless `encoder_stub` is set.
    pub encoder_path: Option<PathBuf>,

    /// Run the hashed bag-of-words encoder instead of a model. Default: `false`.
    pub encoder_stub: bool,

    /// Part-of-speech tagger directory. Unset runs the lexicon phrase pipeline.
    pub tagger_path: Option<PathBuf>,

    /// Postings returned per request unless the request asks otherwise. Default: `10`.
    pub top_k: usize,

    /// Largest accepted request body in bytes. Default: 10 MiB.
    pub max_upload_bytes: usize,

    /// Entries in the embedding cache (`0` disables it). Default: `1024`.
    pub embedding_cache: u64,
}

/// Default request body limit.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            encoder_path: None,
            encoder_stub: false,
            tagger_path: None,
            top_k: DEFAULT_TOP_K,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            embedding_cache: DEFAULT_EMBEDDING_CACHE_CAPACITY,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "JOBMATCH_PORT";
    const ENV_BIND_ADDR: &'static str = "JOBMATCH_BIND_ADDR";
    const ENV_ENCODER_PATH: &'static str = EncoderConfig::ENV_MODEL_PATH;
    const ENV_ENCODER_STUB: &'static str = EncoderConfig::ENV_STUB;
    const ENV_TAGGER_PATH: &'static str = PhraseConfig::ENV_TAGGER_PATH;
    const ENV_TOP_K: &'static str = "JOBMATCH_TOP_K";
    const ENV_MAX_UPLOAD_BYTES: &'static str = "JOBMATCH_MAX_UPLOAD_BYTES";
    const ENV_EMBEDDING_CACHE: &'static str = "JOBMATCH_EMBEDDING_CACHE";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let encoder_path = Self::parse_optional_path_from_env(Self::ENV_ENCODER_PATH);
        let encoder_stub =
            Self::parse_flag_from_env(Self::ENV_ENCODER_STUB, defaults.encoder_stub)?;
        let tagger_path = Self::parse_optional_path_from_env(Self::ENV_TAGGER_PATH);
        let top_k = Self::parse_number_from_env(Self::ENV_TOP_K, defaults.top_k)?;
        let max_upload_bytes =
            Self::parse_number_from_env(Self::ENV_MAX_UPLOAD_BYTES, defaults.max_upload_bytes)?;
        let embedding_cache =
            Self::parse_number_from_env(Self::ENV_EMBEDDING_CACHE, defaults.embedding_cache)?;

        Ok(Self {
            port,
            bind_addr,
            encoder_path,
            encoder_stub,
            tagger_path,
            top_k,
            max_upload_bytes,
            embedding_cache,
        })
    }

    /// Validates paths and basic invariants.
    ///
    /// An encoder path is required unless the stub encoder was requested. A
    /// tagger path only has to be a directory; missing model files inside it
    /// degrade to the lexicon pipeline at load time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.encoder_path.is_none() && !self.encoder_stub {
            return Err(ConfigError::MissingEncoder {
                path_var: Self::ENV_ENCODER_PATH,
                stub_var: Self::ENV_ENCODER_STUB,
            });
        }

        if let Some(ref path) = self.encoder_path
            && !self.encoder_stub
        {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref path) = self.tagger_path
            && path.exists()
            && !path.is_dir()
        {
            return Err(ConfigError::NotADirectory { path: path.clone() });
        }

        if self.top_k == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_TOP_K,
                value: "0".to_string(),
                reason: "must be at least 1",
            });
        }

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MAX_UPLOAD_BYTES,
                value: "0".to_string(),
                reason: "must be at least 1",
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Encoder settings. Stub only when requested; with neither a stub nor a
    /// path the returned config fails to load.
    pub fn encoder_config(&self) -> EncoderConfig {
        let config = match (&self.encoder_path, self.encoder_stub) {
            (_, true) => EncoderConfig::stub(),
            (Some(path), false) => EncoderConfig::new(path),
            (None, false) => EncoderConfig::default(),
        };
        config.with_cache_capacity(self.embedding_cache)
    }

    pub fn phrase_config(&self) -> PhraseConfig {
        match &self.tagger_path {
            Some(path) => PhraseConfig::tagged(path),
            None => PhraseConfig::lexicon(),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_flag_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => parse_flag(&value).ok_or(ConfigError::InvalidValue {
                name: var_name,
                value,
                reason: "expected true/false, 1/0 or yes/no",
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr<Err = std::num::ParseIntError>,
    {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::NumberParseError {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }
}

/// Parses a boolean switch. Empty counts as unset (`false`).
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
