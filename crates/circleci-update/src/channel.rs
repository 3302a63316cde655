//! Distribution channels

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the running binary was installed
///
/// Unrecognized names are kept as [`Channel::Unknown`] rather than rejected:
/// a check on an unknown channel simply discovers nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Channel {
    /// Built from source
    Source,

    /// Downloaded as a release artifact
    Release,

    /// Installed with Homebrew
    Homebrew,

    /// Anything else
    Unknown(String),
}

impl Channel {
    /// Canonical identifier
    pub fn as_str(&self) -> &str {
        match self {
            Self::Source => "source",
            Self::Release => "release",
            Self::Homebrew => "homebrew",
            Self::Unknown(name) => name,
        }
    }

    /// Whether the CLI can replace its own binary on this channel
    pub fn supports_self_install(&self) -> bool {
        matches!(self, Self::Source | Self::Release)
    }
}

impl From<&str> for Channel {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "source" => Self::Source,
            "release" => Self::Release,
            "homebrew" => Self::Homebrew,
            _ => Self::Unknown(name.to_string()),
        }
    }
}

impl From<String> for Channel {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Channel> for String {
    fn from(channel: Channel) -> Self {
        channel.as_str().to_string()
    }
}

impl FromStr for Channel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
