use crate::core::models::{BuildConfiguration, BuildMode};
use colored::*;

/// Short human-readable summary. Printed to stderr so piped JSON stays intact.
pub struct SummaryUI;

impl SummaryUI {
    pub fn show_banner() {
        eprintln!(
            "\n  {} {}",
            "PIPEPLAN".bright_cyan().bold(),
            concat!("v", env!("CARGO_PKG_VERSION")).bright_white()
        );
        eprintln!();
    }

    pub fn show_configuration(config: &BuildConfiguration) {
        let mode = match config.mode {
            BuildMode::Development => config.mode.to_string().bright_green(),
            BuildMode::Production => config.mode.to_string().bright_yellow(),
        };

        eprintln!("  {} {}", "mode".bright_black(), mode.bold());
        eprintln!(
            "  {} {}",
            "output".bright_black(),
            config.output.filename.as_str().bright_cyan()
        );
        eprintln!(
            "  {} {}",
            "rules".bright_black(),
            config.module.rules.len().to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "plugins".bright_black(),
            config
                .plugins
                .iter()
                .map(|p| p.kind())
                .collect::<Vec<_>>()
                .join(", ")
                .bright_white()
        );
        eprintln!(
            "  {} {}",
            "minimizers".bright_black(),
            config.optimization.minimizers.len().to_string().bright_white()
        );
        eprintln!(
            "  {} :{} {}",
            "dev server".bright_black(),
            config.dev_server.port.to_string().bright_white(),
            if config.dev_server.hot {
                "(hot)".bright_green()
            } else {
                "(no hot reload)".bright_black()
            }
        );
        eprintln!();
        eprintln!("  {} pipeline assembled", "✓".bright_green());
    }
}
