use std::path::PathBuf;
use thiserror::Error;

/// Where a configuration problem was found
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub file_path: Option<PathBuf>,
    pub key: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: PathBuf) -> Self {
        self.file_path = Some(path);
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

#[derive(Error, Debug)]
pub enum PipeplanError {
    #[error("Invalid build mode: {0:?} (expected \"development\" or \"production\")")]
    InvalidMode(String),

    #[error("Invalid filename template input: {0}")]
    InvalidTemplateInput(String),

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<ErrorContext>,
    },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PipeplanError {
    /// Create a configuration error without context
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    pub fn config_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context),
        }
    }

    /// Format error with the file and key it came from, if known
    pub fn format_detailed(&self) -> String {
        match self {
            PipeplanError::Config {
                message,
                context: Some(ctx),
            } => {
                let mut output = format!("❌ Configuration Error: {}", message);
                if let Some(ref file_path) = ctx.file_path {
                    output.push_str(&format!("\n📁 File: {}", file_path.display()));
                }
                if let Some(ref key) = ctx.key {
                    output.push_str(&format!("\n🔑 Key: {}", key));
                }
                output
            }
            _ => format!("❌ {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipeplanError>;
