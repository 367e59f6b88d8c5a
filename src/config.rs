//! Process configuration from environment variables

use crate::persona::Persona;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SUGGESTION_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set (or set LLM_GATEWAY to route through a gateway)")]
    MissingApiKey,
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// `None` in gateway mode
    pub api_key: Option<String>,
    pub model: String,
    /// Gateway base URL (e.g., `http://169.254.169.254/gateway/llm`)
    pub gateway: Option<String>,
    pub bind: IpAddr,
    pub port: u16,
    pub default_persona: Persona,
    pub request_timeout: Duration,
    pub suggestion_timeout: Duration,
}

impl ChatConfig {
    /// Read configuration from the process environment.
    ///
    /// - `GEMINI_API_KEY` - required unless `LLM_GATEWAY` is set
    /// - `GEMINI_MODEL` - model name (default: gemini-2.0-flash)
    /// - `LLM_GATEWAY` - gateway base URL; the key is then not sent
    /// - `CHAT_BIND` / `CHAT_PORT` - listen address (default: 127.0.0.1:8000)
    /// - `DEFAULT_PERSONA` - default, sarcastic or pirate
    /// - `REQUEST_TIMEOUT_SECS` / `SUGGESTION_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let gateway = var("LLM_GATEWAY");
        let api_key = if gateway.is_some() {
            None
        } else {
            Some(var("GEMINI_API_KEY").ok_or(ConfigError::MissingApiKey)?)
        };

        let default_persona = match var("DEFAULT_PERSONA") {
            Some(value) => value.parse().map_err(|e: crate::persona::UnknownPersona| {
                ConfigError::Invalid {
                    var: "DEFAULT_PERSONA",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => Persona::default(),
        };

        Ok(Self {
            api_key,
            model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gateway,
            bind: parse_var(var("CHAT_BIND"), "CHAT_BIND", IpAddr::V4(Ipv4Addr::LOCALHOST))?,
            port: parse_var(var("CHAT_PORT"), "CHAT_PORT", DEFAULT_PORT)?,
            default_persona,
            request_timeout: Duration::from_secs(parse_var(
                var("REQUEST_TIMEOUT_SECS"),
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            suggestion_timeout: Duration::from_secs(parse_var(
                var("SUGGESTION_TIMEOUT_SECS"),
                "SUGGESTION_TIMEOUT_SECS",
                DEFAULT_SUGGESTION_TIMEOUT_SECS,
            )?),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

fn parse_var<T>(value: Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
