use crate::core::layout::ProjectLayout;
use crate::core::models::{ModeResolution, DEV_SERVER_PORT};
use crate::utils::{ErrorContext, Logger, PipeplanError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "pipeplan.config.json";

/// HTML template locations, relative to the context directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TemplatesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    /// Output filename of the secondary page (default: "reg.html")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_filename: Option<String>,
}

/// Configuration file format (pipeplan.config.json)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PipeplanConfig {
    /// Source directory (default: "src")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Output directory (default: "dist")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outdir: Option<String>,

    /// Entry script relative to the context (default: "./index.js")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    /// Module imported ahead of the entry (default: "@babel/polyfill")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polyfill: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<TemplatesConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Where copied assets land inside the output directory (default: "assets")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<String>,

    /// Dev server port (default: 8080)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server_port: Option<u16>,

    /// Reject unrecognized mode flags instead of treating them as production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_mode: Option<bool>,
}

/// Overrides given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub outdir: Option<String>,
    pub strict_mode: Option<bool>,
}

/// Everything the assembler needs once file and CLI settings are merged
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub layout: ProjectLayout,
    pub resolution: ModeResolution,
    pub port: u16,
}

/// Config loader that supports config files with CLI override
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file if it exists.
    /// Searches for pipeplan.config.json in the project root.
    pub fn load_from_file(root: &Path) -> Result<Option<PipeplanConfig>> {
        let config_path = root.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            Logger::debug("No pipeplan.config.json found, using defaults");
            return Ok(None);
        }

        Logger::debug(&format!("Loading config from {}", config_path.display()));

        let content = std::fs::read_to_string(&config_path)?;
        let config: PipeplanConfig = serde_json::from_str(&content).map_err(|e| {
            PipeplanError::config_with_context(
                format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e),
                ErrorContext::new().with_file(config_path.clone()),
            )
        })?;

        Self::validate(&config, &config_path)?;

        Logger::debug("✅ Config file loaded successfully");
        Ok(Some(config))
    }

    fn validate(config: &PipeplanConfig, path: &Path) -> Result<()> {
        if config.dev_server_port == Some(0) {
            return Err(PipeplanError::config_with_context(
                "devServerPort must be non-zero",
                ErrorContext::new()
                    .with_file(path.to_path_buf())
                    .with_key("devServerPort"),
            ));
        }

        let secondary_filename = config
            .templates
            .as_ref()
            .and_then(|t| t.secondary_filename.as_deref());
        if let Some(name) = secondary_filename {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(PipeplanError::config_with_context(
                    format!("secondaryFilename {:?} must be a plain file name", name),
                    ErrorContext::new()
                        .with_file(path.to_path_buf())
                        .with_key("templates.secondaryFilename"),
                ));
            }
        }

        Ok(())
    }

    /// Merge file config with CLI arguments (CLI > config file > default)
    pub fn merge_with_cli(
        file_config: Option<PipeplanConfig>,
        root: PathBuf,
        cli: &CliOverrides,
    ) -> ResolvedSettings {
        let base = file_config.unwrap_or_default();
        let defaults = ProjectLayout::for_root(root);
        let templates = base.templates.unwrap_or_default();

        let outdir = cli
            .outdir
            .clone()
            .or(base.outdir)
            .map(PathBuf::from)
            .unwrap_or(defaults.outdir.clone());

        let layout = ProjectLayout {
            context: base.context.map(PathBuf::from).unwrap_or(defaults.context.clone()),
            outdir,
            entry_script: base.entry.unwrap_or(defaults.entry_script.clone()),
            polyfill: base.polyfill.unwrap_or(defaults.polyfill.clone()),
            index_template: templates.index.unwrap_or(defaults.index_template.clone()),
            secondary_template: templates
                .secondary
                .unwrap_or(defaults.secondary_template.clone()),
            secondary_filename: templates
                .secondary_filename
                .unwrap_or(defaults.secondary_filename.clone()),
            favicon: base.favicon.map(PathBuf::from).unwrap_or(defaults.favicon.clone()),
            icon: base.icon.map(PathBuf::from).unwrap_or(defaults.icon.clone()),
            assets_dir: base
                .assets_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir.clone()),
            ..defaults
        };

        let strict = cli.strict_mode.or(base.strict_mode).unwrap_or(false);
        let resolution = if strict {
            ModeResolution::Strict
        } else {
            ModeResolution::Lenient
        };

        ResolvedSettings {
            layout,
            resolution,
            port: base.dev_server_port.unwrap_or(DEV_SERVER_PORT),
        }
    }

    /// Generate example config file with every default spelled out
    pub fn generate_example() -> Result<String> {
        let defaults = ProjectLayout::default();
        let example = PipeplanConfig {
            context: Some(defaults.context.display().to_string()),
            outdir: Some(defaults.outdir.display().to_string()),
            entry: Some(defaults.entry_script),
            polyfill: Some(defaults.polyfill),
            templates: Some(TemplatesConfig {
                index: Some(defaults.index_template),
                secondary: Some(defaults.secondary_template),
                secondary_filename: Some(defaults.secondary_filename),
            }),
            favicon: Some(defaults.favicon.display().to_string()),
            icon: Some(defaults.icon.display().to_string()),
            assets_dir: Some(defaults.assets_dir.display().to_string()),
            dev_server_port: Some(DEV_SERVER_PORT),
            strict_mode: Some(false),
        };
        Ok(serde_json::to_string_pretty(&example)?)
    }
}
