use crate::core::models::BuildMode;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// Install the global subscriber. `RUST_LOG` overrides the default filter.
    pub fn init() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("pipeplan=info"));

        // Logs go to stderr so stdout stays clean for the emitted JSON
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn assembly_start(mode: BuildMode, root: &str) {
        info!("🔧 Assembling {} pipeline", mode);
        debug!("📁 Project root: {}", root);
    }

    pub fn mode_fallback(raw: &str) {
        warn!(
            "⚠️  Unrecognized build mode {:?}, treating it as production",
            raw
        );
    }

    pub fn assembly_complete(rules: usize, plugins: usize, minimizers: usize) {
        info!(
            "✅ Pipeline ready: {} loader rules, {} plugins, {} minimizers",
            rules, plugins, minimizers
        );
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

    pub fn info(msg: &str) {
        info!("{}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
