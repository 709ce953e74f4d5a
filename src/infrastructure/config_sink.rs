use crate::core::interfaces::{ConfigSink, FileSystemService};
use crate::core::models::BuildConfiguration;
use crate::utils::{Logger, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

/// Writes the configuration JSON to stdout
pub struct StdoutSink;

#[async_trait]
impl ConfigSink for StdoutSink {
    async fn emit(&self, config: &BuildConfiguration, pretty: bool) -> Result<()> {
        let mut json = config.to_json(pretty)?;
        json.push('\n');

        let mut stdout = tokio::io::stdout();
        stdout.write_all(json.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}

/// Writes the configuration JSON to a file, creating parent directories
pub struct FileSink {
    fs_service: Arc<dyn FileSystemService>,
    path: PathBuf,
}

impl FileSink {
    pub fn new(fs_service: Arc<dyn FileSystemService>, path: PathBuf) -> Self {
        Self { fs_service, path }
    }
}

#[async_trait]
impl ConfigSink for FileSink {
    async fn emit(&self, config: &BuildConfiguration, pretty: bool) -> Result<()> {
        let json = config.to_json(pretty)?;
        self.fs_service.write_file(&self.path, &json).await?;
        Logger::info(&format!("📦 Wrote {}", self.path.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assembler::assemble;
    use crate::core::layout::ProjectLayout;
    use crate::core::models::BuildMode;
    use crate::infrastructure::TokioFileSystemService;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_sink_round_trips() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("out/pipeline.json");
        let config = assemble(BuildMode::Production, &ProjectLayout::default());

        let sink = FileSink::new(Arc::new(TokioFileSystemService), path.clone());
        sink.emit(&config, true).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: BuildConfiguration = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, config);
    }
}
