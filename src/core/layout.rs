use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Known source locations of the project being described.
///
/// Paths under `templates`, `entry_script` and the copy sources are kept
/// exactly as the bundler expects them: templates and the entry are relative
/// to `context`, copy sources are relative to `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLayout {
    pub root: PathBuf,
    /// Source directory entries and templates are resolved against
    pub context: PathBuf,
    pub outdir: PathBuf,
    pub entry_name: String,
    pub entry_script: String,
    pub polyfill: String,
    pub index_template: String,
    pub secondary_template: String,
    pub secondary_filename: String,
    pub favicon: PathBuf,
    pub icon: PathBuf,
    /// Subdirectory of `outdir` copied assets land in
    pub assets_dir: PathBuf,
    pub vendor_dir: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            context: PathBuf::from("src"),
            outdir: PathBuf::from("dist"),
            entry_name: "main".to_string(),
            entry_script: "./index.js".to_string(),
            polyfill: "@babel/polyfill".to_string(),
            index_template: "./views/index.html".to_string(),
            secondary_template: "./views/reg.html".to_string(),
            secondary_filename: "reg.html".to_string(),
            favicon: PathBuf::from("src/favicon.ico"),
            icon: PathBuf::from("src/assets/images/user-icon.svg"),
            assets_dir: PathBuf::from("assets"),
            vendor_dir: "node_modules".to_string(),
        }
    }
}

impl ProjectLayout {
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn resolve(&self, relative: &Path) -> PathBuf {
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            self.root.join(relative)
        }
    }

    pub fn context_path(&self) -> PathBuf {
        self.resolve(&self.context)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.outdir)
    }

    pub fn assets_output_path(&self) -> PathBuf {
        self.output_path().join(&self.assets_dir)
    }
}
