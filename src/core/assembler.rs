// Pipeline assembly: maps a build mode and project layout to a build description.
//
// Every resolver is a pure function of its arguments. Nothing here reads
// the environment or keeps state between calls.

use crate::core::filename::FilenameTemplate;
use crate::core::layout::ProjectLayout;
use crate::core::matchers::{vendor_exclude_pattern, ExtensionGroup};
use crate::core::models::*;
use crate::utils::{Logger, Result, Timer};
use std::collections::BTreeMap;

pub fn resolve_optimization_policy(mode: BuildMode) -> OptimizationPolicy {
    let minimizers = match mode {
        BuildMode::Development => Vec::new(),
        BuildMode::Production => vec![
            MinimizerDescriptor::StyleMinifier,
            MinimizerDescriptor::ScriptMinifier,
        ],
    };

    OptimizationPolicy {
        split_chunks: SplitChunks {
            chunks: ChunkSelection::All,
        },
        minimizers,
    }
}

pub fn resolve_filename_template(mode: BuildMode, extension: &str) -> FilenameTemplate {
    FilenameTemplate::for_mode(mode, extension)
}

fn style_loaders(mode: BuildMode, preprocessor: Option<&str>) -> LoaderChain {
    let extract = LoaderDescriptor::with_options(
        STYLE_EXTRACT_LOADER,
        LoaderOptions::StyleExtract {
            hmr: mode.is_development(),
            reload_all: true,
        },
    );

    [extract, LoaderDescriptor::named(CSS_LOADER)]
        .into_iter()
        .chain(preprocessor.map(LoaderDescriptor::named))
        .collect()
}

fn transpile_loader() -> LoaderDescriptor {
    LoaderDescriptor::with_options(
        BABEL_LOADER,
        LoaderOptions::Transpile {
            presets: vec![BASELINE_PRESET.to_string()],
            plugins: vec![CLASS_FIELDS_PLUGIN.to_string()],
        },
    )
}

pub fn resolve_loader_chain(group: ExtensionGroup, mode: BuildMode) -> LoaderChain {
    match group {
        ExtensionGroup::Css => style_loaders(mode, None),
        ExtensionGroup::Scss => style_loaders(mode, Some(SASS_LOADER)),
        ExtensionGroup::Image | ExtensionGroup::Font => vec![LoaderDescriptor::named(FILE_LOADER)],
        ExtensionGroup::Xml => vec![LoaderDescriptor::named(XML_LOADER)],
        ExtensionGroup::Csv => vec![LoaderDescriptor::named(CSV_LOADER)],
        ExtensionGroup::Script => vec![transpile_loader()],
    }
}

/// One rule per extension group, in registration order. Only scripts skip the vendor directory.
pub fn resolve_loader_rules(mode: BuildMode, layout: &ProjectLayout) -> Vec<LoaderRule> {
    ExtensionGroup::ALL
        .into_iter()
        .map(|group| LoaderRule {
            group,
            test: group.pattern().to_string(),
            exclude: (group == ExtensionGroup::Script)
                .then(|| vendor_exclude_pattern(&layout.vendor_dir)),
            chain: resolve_loader_chain(group, mode),
        })
        .collect()
}

fn base_plugins(mode: BuildMode, layout: &ProjectLayout) -> PluginList {
    let assets = layout.assets_output_path();

    vec![
        PluginDescriptor::HtmlGenerate {
            filename: None,
            template: layout.index_template.clone(),
        },
        PluginDescriptor::HtmlGenerate {
            filename: Some(layout.secondary_filename.clone()),
            template: layout.secondary_template.clone(),
        },
        PluginDescriptor::CleanOutputDir,
        PluginDescriptor::CopyAssets {
            patterns: vec![
                CopyRule {
                    from: layout.resolve(&layout.favicon),
                    to: assets.clone(),
                },
                CopyRule {
                    from: layout.resolve(&layout.icon),
                    to: assets,
                },
            ],
        },
        PluginDescriptor::CssExtract {
            filename: resolve_filename_template(mode, "css"),
        },
    ]
}

pub fn resolve_plugin_list(mode: BuildMode, layout: &ProjectLayout) -> PluginList {
    base_plugins(mode, layout)
        .into_iter()
        .chain(mode.is_production().then_some(PluginDescriptor::BundleAnalysis))
        .collect()
}

pub fn resolve_dev_server(mode: BuildMode, port: u16) -> DevServerConfig {
    DevServerConfig {
        port,
        hot: mode.is_development(),
    }
}

pub fn resolve_devtool(mode: BuildMode) -> Devtool {
    match mode {
        BuildMode::Development => Devtool::SourceMap,
        BuildMode::Production => Devtool::None,
    }
}

/// Polyfill first so it runs before the application entry
pub fn resolve_entry(layout: &ProjectLayout) -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([(
        layout.entry_name.clone(),
        vec![layout.polyfill.clone(), layout.entry_script.clone()],
    )])
}

pub fn resolve_output(mode: BuildMode, layout: &ProjectLayout) -> OutputConfig {
    OutputConfig {
        path: layout.output_path(),
        filename: resolve_filename_template(mode, "js"),
    }
}

/// Compose every resolver into one configuration, using the standard dev-server port
pub fn assemble(mode: BuildMode, layout: &ProjectLayout) -> BuildConfiguration {
    assemble_with_port(mode, layout, DEV_SERVER_PORT)
}

pub fn assemble_with_port(mode: BuildMode, layout: &ProjectLayout, port: u16) -> BuildConfiguration {
    BuildConfiguration {
        mode,
        context: layout.context_path(),
        entry: resolve_entry(layout),
        output: resolve_output(mode, layout),
        optimization: resolve_optimization_policy(mode),
        dev_server: resolve_dev_server(mode, port),
        devtool: resolve_devtool(mode),
        plugins: resolve_plugin_list(mode, layout),
        module: ModuleRules {
            rules: resolve_loader_rules(mode, layout),
        },
    }
}

/// Assembler bound to one project, resolving raw mode flags under a fixed policy
#[derive(Debug, Clone)]
pub struct PipelineAssembler {
    layout: ProjectLayout,
    resolution: ModeResolution,
    port: u16,
}

impl PipelineAssembler {
    pub fn new(layout: ProjectLayout) -> Self {
        Self {
            layout,
            resolution: ModeResolution::default(),
            port: DEV_SERVER_PORT,
        }
    }

    pub fn with_resolution(mut self, resolution: ModeResolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn resolve_mode(&self, flag: Option<&str>) -> Result<BuildMode> {
        BuildMode::resolve(flag, self.resolution)
    }

    pub fn assemble(&self, mode: BuildMode) -> BuildConfiguration {
        let _timer = Timer::start("pipeline assembly");
        Logger::assembly_start(mode, &self.layout.root.display().to_string());

        let config = assemble_with_port(mode, &self.layout, self.port);

        Logger::assembly_complete(
            config.module.rules.len(),
            config.plugins.len(),
            config.optimization.minimizers.len(),
        );
        config
    }

    /// Resolve the raw flag, then assemble. Fails only under strict resolution.
    pub fn assemble_from_flag(&self, flag: Option<&str>) -> Result<BuildConfiguration> {
        let mode = self.resolve_mode(flag)?;
        Ok(self.assemble(mode))
    }
}
