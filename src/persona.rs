//! Personas: named system instructions that change the bot's tone

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Persona selected for answer requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    #[default]
    Default,
    Sarcastic,
    Pirate,
}

impl Persona {
    /// All personas, in display order
    pub const ALL: [Persona; 3] = [Persona::Default, Persona::Sarcastic, Persona::Pirate];

    /// System instruction sent with every answer request
    pub fn instruction(self) -> &'static str {
        match self {
            Persona::Default => "You are a helpful and friendly assistant.",
            Persona::Sarcastic => {
                "You are a sarcastic teenager who reluctantly answers questions with wit and a bit of attitude."
            }
            Persona::Pirate => {
                "You are a wise old pirate who answers questions with nautical metaphors and a swashbuckling spirit."
            }
        }
    }

    /// Label shown in the persona picker
    pub fn display_name(self) -> &'static str {
        match self {
            Persona::Default => "Friendly Assistant",
            Persona::Sarcastic => "Sarcastic Teen",
            Persona::Pirate => "Wise Pirate",
        }
    }

    /// Wire identifier (matches the serde representation)
    pub fn id(self) -> &'static str {
        match self {
            Persona::Default => "default",
            Persona::Sarcastic => "sarcastic",
            Persona::Pirate => "pirate",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown persona: {0}")]
pub struct UnknownPersona(pub String);

impl FromStr for Persona {
    type Err = UnknownPersona;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Persona::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPersona(s.to_string()))
    }
}
