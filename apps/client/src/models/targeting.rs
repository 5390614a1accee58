//! Persona and platform selectors shared by the job-description form and the
//! variant workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Job-posting site whose ATS conventions a variant is compiled for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Linkedin,
    Indeed,
    Dice,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Linkedin, Platform::Indeed, Platform::Dice];

    /// Wire value, also used in export file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::Indeed => "indeed",
            Platform::Dice => "dice",
        }
    }

    /// Human label shown in selectors.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Linkedin => "LinkedIn",
            Platform::Indeed => "Indeed",
            Platform::Dice => "Dice",
        }
    }
}

/// Professional framing applied during compilation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    #[default]
    Ic,
    Architect,
    Hybrid,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::Ic, Persona::Architect, Persona::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Ic => "ic",
            Persona::Architect => "architect",
            Persona::Hybrid => "hybrid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Persona::Ic => "Individual Contributor",
            Persona::Architect => "Architect",
            Persona::Hybrid => "Hybrid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownOption {
    kind: &'static str,
    value: String,
    expected: String,
}

fn parse_option<T: Copy>(
    kind: &'static str,
    raw: &str,
    all: &[T],
    as_str: fn(&T) -> &'static str,
) -> Result<T, UnknownOption> {
    let needle = raw.trim().to_lowercase();
    all.iter()
        .copied()
        .find(|opt| as_str(opt) == needle)
        .ok_or_else(|| UnknownOption {
            kind,
            value: raw.to_string(),
            expected: all.iter().map(as_str).collect::<Vec<_>>().join(", "),
        })
}

impl FromStr for Platform {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("platform", s, &Platform::ALL, Platform::as_str)
    }
}

impl FromStr for Persona {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("persona", s, &Persona::ALL, Persona::as_str)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
