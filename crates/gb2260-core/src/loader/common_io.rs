// crates/gb2260-core/src/loader/common_io.rs
use crate::error::{GbError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Opens a revision source for line reading.
///
/// Files ending in `.gz` are decompressed on the fly when the `compact`
/// feature is enabled.
pub fn open_stream(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| {
        GbError::NotFound(format!("Revision not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    {
        if path.extension().is_some_and(|ext| ext == "gz") {
            use flate2::read::GzDecoder;
            return Ok(Box::new(BufReader::new(GzDecoder::new(reader))));
        }
    }

    Ok(Box::new(reader))
}

/// `<dir>/<file name>.<suffix>` next to the given source.
pub fn get_cache_path(source: &Path, suffix: &str) -> PathBuf {
    let filename = source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "gb2260".to_owned());
    source.with_file_name(format!("{filename}.{suffix}"))
}
