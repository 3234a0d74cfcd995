use crate::domain::rerank::DEFAULT_TOP_N;
use std::env;
use std::fmt;
use std::net::SocketAddr;

#[derive(Debug)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value, reason } => {
                write!(f, "Invalid {key} '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    /// Used when a rank request does not say how many results it wants.
    pub default_top_n: usize,
    /// Upper bound on candidates per rank request.
    pub max_candidates: usize,
    pub max_body_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            default_top_n: DEFAULT_TOP_N,
            max_candidates: 100,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads every setting through `lookup`; unset or blank keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match optional("RERANK_BIND_ADDR") {
            Some(raw) => raw.trim().parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
                key: "RERANK_BIND_ADDR",
                value: raw.clone(),
                reason: format!("{e}"),
            })?,
            None => defaults.bind_addr,
        };

        Ok(Self {
            bind_addr,
            max_workers: positive(
                "RERANK_MAX_WORKERS",
                optional("RERANK_MAX_WORKERS"),
                defaults.max_workers,
            )?,
            default_top_n: positive(
                "RERANK_DEFAULT_TOP_N",
                optional("RERANK_DEFAULT_TOP_N"),
                defaults.default_top_n,
            )?,
            max_candidates: positive(
                "RERANK_MAX_CANDIDATES",
                optional("RERANK_MAX_CANDIDATES"),
                defaults.max_candidates,
            )?,
            max_body_bytes: positive(
                "RERANK_MAX_BODY_BYTES",
                optional("RERANK_MAX_BODY_BYTES"),
                defaults.max_body_bytes,
            )?,
        })
    }
}

fn positive(key: &'static str, raw: Option<String>, default: usize) -> Result<usize, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(v) => Ok(v),
        Err(e) => Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: e.to_string(),
        }),
    }
}
