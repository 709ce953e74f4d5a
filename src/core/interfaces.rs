use crate::core::models::BuildConfiguration;
use crate::utils::Result;
use async_trait::async_trait;
use std::path::Path;

/// File system operations interface
#[async_trait]
pub trait FileSystemService: Send + Sync {
    async fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;
    async fn write_file(&self, path: &Path, content: &str) -> Result<()>;
    async fn create_directory(&self, path: &Path) -> Result<()>;
    fn file_exists(&self, path: &Path) -> bool;
}

/// Destination for an assembled configuration
#[async_trait]
pub trait ConfigSink: Send + Sync {
    async fn emit(&self, config: &BuildConfiguration, pretty: bool) -> Result<()>;
}
