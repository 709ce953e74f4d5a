use crate::core::{interfaces::*, BuildConfiguration, ExtensionGroup, PipelineAssembler};
use crate::infrastructure::{FileSink, StdoutSink, TokioFileSystemService};
use crate::utils::{
    CliOverrides, ConfigLoader, Logger, PipeplanError, ResolvedSettings, Result, SummaryUI,
    CONFIG_FILE_NAME,
};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pipeplan")]
#[command(about = "Pipeplan - assemble front-end build pipelines for development or production")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that assembles a pipeline
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root directory
    #[arg(short, long, default_value = ".")]
    pub root: String,
    /// Build mode; anything other than "development" means production unless --strict
    #[arg(short, long, env = "NODE_ENV")]
    pub mode: Option<String>,
    /// Reject mode values other than "development" and "production"
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble the pipeline and emit it as JSON
    Assemble {
        #[command(flatten)]
        project: ProjectArgs,
        /// Output directory of the described build
        #[arg(long)]
        outdir: Option<String>,
        /// Write the configuration to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Show which loader rule a source path goes through
    Explain {
        /// Source path, e.g. src/styles/main.scss
        path: String,
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Print the output filename a file would get
    Hash {
        /// File whose content determines the hash segment
        file: PathBuf,
        /// Logical name (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Write an example pipeplan.config.json
    Init {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: String,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        // Initialize logging
        Logger::init();

        let cli = Cli::parse();

        match cli.command {
            Commands::Assemble {
                project,
                outdir,
                out,
                compact,
            } => self.handle_assemble_command(&project, outdir, out, !compact).await,
            Commands::Explain { path, project } => self.handle_explain_command(&path, &project),
            Commands::Hash {
                file,
                name,
                project,
            } => self.handle_hash_command(&file, name, &project).await,
            Commands::Init { root, force } => self.handle_init_command(&root, force).await,
        }
    }

    fn load_settings(project: &ProjectArgs, outdir: Option<String>) -> Result<ResolvedSettings> {
        let root = PathBuf::from(&project.root);
        let file_config = ConfigLoader::load_from_file(&root)?;
        let overrides = CliOverrides {
            outdir,
            strict_mode: project.strict.then_some(true),
        };
        Ok(ConfigLoader::merge_with_cli(file_config, root, &overrides))
    }

    fn assemble(project: &ProjectArgs, outdir: Option<String>) -> Result<BuildConfiguration> {
        let settings = Self::load_settings(project, outdir)?;
        PipelineAssembler::new(settings.layout)
            .with_resolution(settings.resolution)
            .with_port(settings.port)
            .assemble_from_flag(project.mode.as_deref())
    }

    async fn handle_assemble_command(
        &self,
        project: &ProjectArgs,
        outdir: Option<String>,
        out: Option<PathBuf>,
        pretty: bool,
    ) -> Result<()> {
        let config = Self::assemble(project, outdir)?;

        let sink: Box<dyn ConfigSink> = match out {
            Some(path) => Box::new(FileSink::new(Arc::new(TokioFileSystemService), path)),
            None => Box::new(StdoutSink),
        };
        sink.emit(&config, pretty).await?;

        SummaryUI::show_banner();
        SummaryUI::show_configuration(&config);
        Ok(())
    }

    fn handle_explain_command(&self, path: &str, project: &ProjectArgs) -> Result<()> {
        let config = Self::assemble(project, None)?;

        for line in Self::explain_lines(&config, path)? {
            println!("{}", line);
        }
        Ok(())
    }

    fn explain_lines(config: &BuildConfiguration, path: &str) -> Result<Vec<String>> {
        let Some(rule) = config.rule_for(path)? else {
            let line = match ExtensionGroup::classify(path) {
                Some(group) => format!(
                    "{} is a {:?} file but is excluded from processing",
                    path, group
                ),
                None => format!("No loader rule matches {}", path),
            };
            return Ok(vec![line]);
        };

        let mut lines = vec![
            format!("{} ({} mode)", path, config.mode),
            format!("  rule: {} ({:?})", rule.test, rule.group),
        ];
        lines.extend(rule.chain.iter().enumerate().map(|(index, loader)| {
            match &loader.options {
                Some(options) => format!("  {}. {} {:?}", index + 1, loader.loader, options),
                None => format!("  {}. {}", index + 1, loader.loader),
            }
        }));
        Ok(lines)
    }

    async fn handle_hash_command(
        &self,
        file: &Path,
        name: Option<String>,
        project: &ProjectArgs,
    ) -> Result<()> {
        let config = Self::assemble(project, None)?;

        let content = TokioFileSystemService.read_bytes(file).await?;
        let rendered = Self::hashed_name(&config, file, name.as_deref(), &content)?;

        println!("{}", rendered);
        Ok(())
    }

    fn hashed_name(
        config: &BuildConfiguration,
        file: &Path,
        name: Option<&str>,
        content: &[u8],
    ) -> Result<String> {
        let file_name = file.file_name().and_then(|s| s.to_str()).unwrap_or_default();
        let template = config.output_template_for(file_name).ok_or_else(|| {
            PipeplanError::InvalidTemplateInput(format!("{} has no file extension", file.display()))
        })?;
        let name = match name {
            Some(name) => name,
            None => file.file_stem().and_then(|s| s.to_str()).unwrap_or_default(),
        };

        template.render_for_content(name, content)
    }

    async fn handle_init_command(&self, root: &str, force: bool) -> Result<()> {
        let fs_service = TokioFileSystemService;
        let path = Path::new(root).join(CONFIG_FILE_NAME);

        if fs_service.file_exists(&path) && !force {
            return Err(PipeplanError::config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        let example = ConfigLoader::generate_example()?;
        fs_service.write_file(&path, &example).await?;
        Logger::info(&format!("✅ Created {}", path.display()));
        Ok(())
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}
