use std::fs;
use std::path::{Path, PathBuf};

/// The two emitted text artifacts of one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Declaration surface (`properties.rs`).
    pub declaration: String,
    /// Implementation surface (`properties_impl.rs`).
    pub implementation: String,
}

impl Artifacts {
    /// Writes both artifacts into `dir`, returning the written paths.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(dir)?;
        let decl_path = dir.join("properties.rs");
        let impl_path = dir.join("properties_impl.rs");
        fs::write(&decl_path, &self.declaration)?;
        fs::write(&impl_path, &self.implementation)?;
        tracing::info!(dir = %dir.display(), "wrote accessor artifacts");
        Ok((decl_path, impl_path))
    }
}
