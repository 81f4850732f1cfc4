use crate::aur::client::AurClient;
use crate::aur::package::tarball_file_name;
use crate::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Create the tarball staging directory if it does not exist yet
pub fn ensure_download_directory(build_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(build_dir)?;
    Ok(())
}

/// Download a package tarball into `build_dir/<name>.tar.gz`
pub async fn download_tarball(
    client: &AurClient,
    package_name: &str,
    build_dir: &Path,
) -> Result<PathBuf> {
    let bytes = client.download_tarball(package_name).await?;
    let path = build_dir.join(tarball_file_name(package_name));

    write_file(&path, &bytes)?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());

    Ok(path)
}

/// Write through a temporary file in the same directory and rename it into
/// place, so `path` is either the complete body or left untouched.
fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
