use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

/// Writes `contents` to `dir/file_name` as plain text.
///
/// The text goes to a temporary file in the same directory first and is then
/// persisted under its final name, so a half-written export never appears.
/// The temporary handle is released before returning.
pub fn save_text(dir: &Path, file_name: &str, contents: &str) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;

    let target = dir.join(file_name);
    tmp.persist(&target).map_err(|e| e.error)?;

    info!("Saved {} bytes to {}", contents.len(), target.display());
    Ok(target)
}
