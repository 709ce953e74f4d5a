use crate::utils::{Logger, PipeplanError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEVELOPMENT: &str = "development";
pub const PRODUCTION: &str = "production";

/// Build mode every other pipeline value is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    pub fn is_development(self) -> bool {
        self == BuildMode::Development
    }

    pub fn is_production(self) -> bool {
        self == BuildMode::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Development => DEVELOPMENT,
            BuildMode::Production => PRODUCTION,
        }
    }

    /// Resolve a raw mode flag.
    ///
    /// `None` means the flag was not set at all, which is not development
    /// and therefore production under the lenient policy.
    pub fn resolve(raw: Option<&str>, resolution: ModeResolution) -> Result<Self> {
        match (raw, resolution) {
            (Some(DEVELOPMENT), _) => Ok(BuildMode::Development),
            (Some(PRODUCTION), _) => Ok(BuildMode::Production),
            (None, ModeResolution::Lenient) => Ok(BuildMode::Production),
            (Some(other), ModeResolution::Lenient) => {
                Logger::mode_fallback(other);
                Ok(BuildMode::Production)
            }
            (None, ModeResolution::Strict) => Err(PipeplanError::InvalidMode(String::new())),
            (Some(other), ModeResolution::Strict) => {
                Err(PipeplanError::InvalidMode(other.to_string()))
            }
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How unrecognized mode flags are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeResolution {
    /// Only the exact string `development` selects development; all else is production
    #[default]
    Lenient,
    /// Anything other than `development` or `production` is an error
    Strict,
}
