// Output filename templates with an optional cache-busting hash segment

use crate::core::mode::BuildMode;
use crate::utils::{PipeplanError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NAME_PLACEHOLDER: &str = "[name]";
pub const HASH_PLACEHOLDER: &str = "[buildHash]";

/// Number of hex characters kept from a content digest
pub const HASH_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilenameTemplate(String);

impl FilenameTemplate {
    /// `[name].{ext}` in development, `[name].[buildHash].{ext}` in production
    pub fn for_mode(mode: BuildMode, extension: &str) -> Self {
        let template = match mode {
            BuildMode::Development => format!("{}.{}", NAME_PLACEHOLDER, extension),
            BuildMode::Production => {
                format!("{}.{}.{}", NAME_PLACEHOLDER, HASH_PLACEHOLDER, extension)
            }
        };
        Self(template)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_hash_segment(&self) -> bool {
        self.0.contains(HASH_PLACEHOLDER)
    }

    /// Substitute the placeholders. The hash must be alphanumeric even when the
    /// template has no hash segment, and names may not contain placeholder brackets.
    pub fn render(&self, name: &str, hash: &str) -> Result<String> {
        if name.is_empty() {
            return Err(PipeplanError::InvalidTemplateInput(
                "logical name is empty".to_string(),
            ));
        }
        if name.contains(['/', '\\', '\0']) {
            return Err(PipeplanError::InvalidTemplateInput(format!(
                "logical name {:?} is not a single path component",
                name
            )));
        }
        if name.contains(['[', ']']) {
            return Err(PipeplanError::InvalidTemplateInput(format!(
                "logical name {:?} may not contain placeholder brackets",
                name
            )));
        }
        if !hash.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PipeplanError::InvalidTemplateInput(format!(
                "hash {:?} must be alphanumeric",
                hash
            )));
        }

        Ok(self
            .0
            .replace(NAME_PLACEHOLDER, name)
            .replace(HASH_PLACEHOLDER, hash))
    }

    /// Render using a digest of `content` as the hash segment
    pub fn render_for_content(&self, name: &str, content: &[u8]) -> Result<String> {
        self.render(name, &content_hash(content))
    }
}

impl fmt::Display for FilenameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn content_hash(content: &[u8]) -> String {
    let mut hex = blake3::hash(content).to_hex().to_string();
    hex.truncate(HASH_LENGTH);
    hex
}
