use crate::core::filename::FilenameTemplate;
use crate::core::matchers::ExtensionGroup;
use crate::utils::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub use crate::core::mode::{BuildMode, ModeResolution};

pub const STYLE_EXTRACT_LOADER: &str = "mini-css-extract-plugin/loader";
pub const CSS_LOADER: &str = "css-loader";
pub const SASS_LOADER: &str = "sass-loader";
pub const FILE_LOADER: &str = "file-loader";
pub const XML_LOADER: &str = "xml-loader";
pub const CSV_LOADER: &str = "csv-loader";
pub const BABEL_LOADER: &str = "babel-loader";

pub const BASELINE_PRESET: &str = "@babel/preset-env";
pub const CLASS_FIELDS_PLUGIN: &str = "@babel/plugin-proposal-class-properties";

pub const DEV_SERVER_PORT: u16 = 8080;

/// One named transform step in a loader chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderDescriptor {
    pub loader: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<LoaderOptions>,
}

impl LoaderDescriptor {
    pub fn named(loader: &str) -> Self {
        Self {
            loader: loader.to_string(),
            options: None,
        }
    }

    pub fn with_options(loader: &str, options: LoaderOptions) -> Self {
        Self {
            loader: loader.to_string(),
            options: Some(options),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoaderOptions {
    StyleExtract {
        hmr: bool,
        #[serde(rename = "reloadAll")]
        reload_all: bool,
    },
    Transpile {
        presets: Vec<String>,
        plugins: Vec<String>,
    },
}

/// Ordered loader steps; order is registration order and must be kept as-is
pub type LoaderChain = Vec<LoaderDescriptor>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderRule {
    pub group: ExtensionGroup,
    pub test: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    #[serde(rename = "use")]
    pub chain: LoaderChain,
}

impl LoaderRule {
    /// `test` is informational for the bundler; matching uses the group's compiled pattern
    pub fn matches(&self, path: &str) -> Result<bool> {
        if !self.group.matcher().is_match(path) {
            return Ok(false);
        }

        match &self.exclude {
            Some(pattern) => Ok(!Regex::new(pattern)?.is_match(path)),
            None => Ok(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkSelection {
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitChunks {
    pub chunks: ChunkSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MinimizerDescriptor {
    StyleMinifier,
    ScriptMinifier,
}

impl MinimizerDescriptor {
    pub fn plugin_name(self) -> &'static str {
        match self {
            MinimizerDescriptor::StyleMinifier => "optimize-css-assets-webpack-plugin",
            MinimizerDescriptor::ScriptMinifier => "terser-webpack-plugin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationPolicy {
    pub split_chunks: SplitChunks,
    pub minimizers: Vec<MinimizerDescriptor>,
}

impl OptimizationPolicy {
    pub fn split_chunks_enabled(&self) -> bool {
        self.split_chunks.chunks == ChunkSelection::All
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyRule {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Whole-build step registered with the bundler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "camelCase")]
pub enum PluginDescriptor {
    HtmlGenerate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
        template: String,
    },
    CleanOutputDir,
    CopyAssets {
        patterns: Vec<CopyRule>,
    },
    CssExtract {
        filename: FilenameTemplate,
    },
    BundleAnalysis,
}

impl PluginDescriptor {
    pub fn kind(&self) -> &'static str {
        match self {
            PluginDescriptor::HtmlGenerate { .. } => "html-generate",
            PluginDescriptor::CleanOutputDir => "clean-output-dir",
            PluginDescriptor::CopyAssets { .. } => "copy-assets",
            PluginDescriptor::CssExtract { .. } => "css-extract",
            PluginDescriptor::BundleAnalysis => "bundle-analysis",
        }
    }
}

pub type PluginList = Vec<PluginDescriptor>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevServerConfig {
    pub port: u16,
    pub hot: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Devtool {
    #[serde(rename = "source-map")]
    SourceMap,
    #[serde(rename = "")]
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub filename: FilenameTemplate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRules {
    pub rules: Vec<LoaderRule>,
}

/// Complete description of a build, handed to the bundler as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfiguration {
    pub mode: BuildMode,
    pub context: PathBuf,
    /// Entry name to its ordered imports
    pub entry: BTreeMap<String, Vec<String>>,
    pub output: OutputConfig,
    pub optimization: OptimizationPolicy,
    pub dev_server: DevServerConfig,
    pub devtool: Devtool,
    pub plugins: PluginList,
    pub module: ModuleRules,
}

impl BuildConfiguration {
    /// First rule that would process `path`, honoring excludes
    pub fn rule_for(&self, path: &str) -> Result<Option<&LoaderRule>> {
        for rule in &self.module.rules {
            if rule.matches(path)? {
                return Ok(Some(rule));
            }
        }
        Ok(None)
    }

    /// Every filename template the configuration emits with
    pub fn filename_templates(&self) -> Vec<&FilenameTemplate> {
        std::iter::once(&self.output.filename)
            .chain(self.plugins.iter().filter_map(|plugin| match plugin {
                PluginDescriptor::CssExtract { filename } => Some(filename),
                _ => None,
            }))
            .collect()
    }

    /// Template a source file's emitted output is named with. Style sources
    /// are extracted to `.css`; everything else keeps its own extension.
    pub fn output_template_for(&self, file_name: &str) -> Option<FilenameTemplate> {
        let lowered = file_name.to_ascii_lowercase();
        let (_, extension) = lowered.rsplit_once('.')?;
        if extension.is_empty() {
            return None;
        }

        match ExtensionGroup::classify(&lowered) {
            Some(ExtensionGroup::Css | ExtensionGroup::Scss) => Some(
                self.plugins
                    .iter()
                    .find_map(|plugin| match plugin {
                        PluginDescriptor::CssExtract { filename } => Some(filename.clone()),
                        _ => None,
                    })
                    .unwrap_or_else(|| FilenameTemplate::for_mode(self.mode, "css")),
            ),
            _ => Some(FilenameTemplate::for_mode(self.mode, extension)),
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
