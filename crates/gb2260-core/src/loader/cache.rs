// crates/gb2260-core/src/loader/cache.rs
#![cfg(feature = "builder")]

use super::common_io;
use crate::dataset::Dataset;
use crate::error::{GbError, Result};
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

/// The file extension used for the binary cache of a merged dataset.
#[cfg(not(feature = "compact"))]
pub const CACHE_SUFFIX: &str = "bin";
#[cfg(feature = "compact")]
pub const CACHE_SUFFIX: &str = "comp.bin";

/// Upper bound for a cache payload; the full GB/T 2260 history is a few
/// hundred kilobytes.
const CACHE_SIZE_LIMIT: u64 = 64 * 1024 * 1024;

/// What `load_cached` writes: the merged table plus the ordered list of
/// sources it was built from.
#[derive(Serialize)]
struct CacheRecord<'a> {
    sources: &'a [String],
    dataset: &'a Dataset,
}

#[derive(Deserialize)]
struct CacheContents {
    sources: Vec<String>,
    dataset: Dataset,
}

impl Dataset {
    /// **Smart Load:** reuses the binary cache next to the first source when
    /// it was built from exactly these sources, in this order, and is newer
    /// than every one of them. Otherwise parses the sources and rewrites the
    /// cache (best effort).
    pub fn load_cached<P: AsRef<Path>>(sources: &[P]) -> Result<Self> {
        let first = sources
            .first()
            .ok_or_else(|| GbError::NotFound("no revision sources given".into()))?;
        let cache_path = common_io::get_cache_path(first.as_ref(), CACHE_SUFFIX);
        let key = source_key(sources);

        if is_cache_fresh(sources, &cache_path) {
            match read_compressed::<CacheContents>(&cache_path) {
                Ok(cached) if cached.sources == key => {
                    tracing::debug!(cache = %cache_path.display(), "using binary cache");
                    return Ok(cached.dataset);
                }
                Ok(_) => {
                    tracing::debug!(cache = %cache_path.display(), "cache built from other sources")
                }
                Err(e) => tracing::warn!(cache = %cache_path.display(), error = %e, "ignoring unreadable cache"),
            }
        }

        let ds = Self::from_sources(sources)?;
        if let Err(e) = write_cache(&cache_path, &key, &ds) {
            tracing::warn!(cache = %cache_path.display(), error = %e, "could not write cache");
        }
        Ok(ds)
    }

    /// Writes the dataset as bincode (gzip-compressed with `compact`).
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        write_compressed(path.as_ref(), self)
    }

    /// Reads a dataset written by [`Dataset::save_as`].
    pub fn load_binary_file(path: impl AsRef<Path>) -> Result<Self> {
        read_compressed(path.as_ref())
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        decode(data)
    }
}

/// Canonical, ordered identity of a source list.
fn source_key<P: AsRef<Path>>(sources: &[P]) -> Vec<String> {
    sources
        .iter()
        .map(|source| {
            let path = source.as_ref();
            fs::canonicalize(path)
                .unwrap_or_else(|_| path.to_path_buf())
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

fn write_cache(path: &Path, sources: &[String], dataset: &Dataset) -> Result<()> {
    write_compressed(path, &CacheRecord { sources, dataset })
}

fn write_compressed<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    #[cfg(feature = "compact")]
    let mut writer = {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        bincode::serialize_into(&mut encoder, value)?;
        // writes the gzip trailer; `flush` alone does not
        encoder.finish()?
    };
    #[cfg(not(feature = "compact"))]
    let mut writer = {
        let mut writer = writer;
        bincode::serialize_into(&mut writer, value)?;
        writer
    };

    writer.flush()?;
    Ok(())
}

fn read_compressed<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        GbError::NotFound(format!("Cache not found at {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    let mut stream: Box<dyn Read> = Box::new(GzDecoder::new(reader));
    #[cfg(not(feature = "compact"))]
    let mut stream: Box<dyn Read> = Box::new(reader);

    let mut data = Vec::new();
    stream.read_to_end(&mut data)?;
    decode(&data)
}

fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    let value = bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(CACHE_SIZE_LIMIT)
        .allow_trailing_bytes()
        .deserialize(data)?;
    Ok(value)
}

fn is_cache_fresh<P: AsRef<Path>>(sources: &[P], cache_path: &Path) -> bool {
    let cache_time = match fs::metadata(cache_path).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    sources.iter().all(|source| {
        fs::metadata(source.as_ref())
            .and_then(|m| m.modified())
            .map(|t| t <= cache_time)
            .unwrap_or(false)
    })
}
