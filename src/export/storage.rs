use super::record::ExportRecord;
use crate::locale::Locale;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write the record as a CSV file inside `dir`, returning its path.
///
/// Creates `dir` if it doesn't exist. The file is written atomically so an
/// interrupted export never leaves a truncated CSV behind.
pub fn write_export(dir: &Path, record: &ExportRecord, locale: Locale) -> Result<PathBuf> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    }

    let path = dir.join(record.file_name());

    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(&record.to_bytes(locale))
        .context("Failed to write CSV export")?;
    file.commit()
        .with_context(|| format!("Failed to save export to {}", path.display()))?;

    tracing::info!(path = %path.display(), "exported results");
    Ok(path)
}
