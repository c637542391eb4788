//! File export ("save as") collaborator

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::error::{PlaygroundError, Result};

/// Hands text content to the user as a named file.
///
/// Fire-and-forget: implementations log their own failures.
#[cfg_attr(test, mockall::automock)]
pub trait FileExporter {
    fn download(&self, filename: &str, content: &str);
}

/// Exporter that writes files into a directory
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
}

impl DirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `content` as `filename` inside the export directory
    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf> {
        let path = self.target_path(filename)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Only the final path component is used, so a filename can never
    /// escape the export directory.
    fn target_path(&self, filename: &str) -> Result<PathBuf> {
        let name = Path::new(filename)
            .file_name()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| PlaygroundError::Other(format!("Invalid export filename: {:?}", filename)))?;
        Ok(self.dir.join(name))
    }
}

impl FileExporter for DirectoryExporter {
    fn download(&self, filename: &str, content: &str) {
        match self.write(filename, content) {
            Ok(path) => info!("File \"{}\" downloaded to {}", filename, path.display()),
            Err(e) => error!("Failed to export \"{}\": {}", filename, e),
        }
    }
}
