// crates/gb2260-core/src/loader/mod.rs

//! # Data Loader
//!
//! Builds the merged [`Dataset`] from GB/T 2260 revision files. Each source
//! holds one `<code> <name>` record per line; when several sources are
//! given, later sources override earlier duplicate codes, so pass them from
//! oldest to newest.
//!
//! This is the only part of the crate that touches the filesystem; the
//! resolver works purely on the finished table.

use crate::dataset::Dataset;
use crate::error::{GbError, Result};
use std::io::BufRead;
use std::path::{Path, PathBuf};

pub mod common_io;

#[cfg(feature = "builder")]
mod cache;

#[cfg(feature = "builder")]
pub use cache::CACHE_SUFFIX;

/// Sample excerpts of two revisions compiled into the crate, oldest first.
const BUNDLED_REVISIONS: &[(&str, &str)] = &[
    ("sample-2002", include_str!("../../data/sample-2002.txt")),
    ("sample-201512", include_str!("../../data/sample-201512.txt")),
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Malformed {
    Fail,
    Skip,
}

/// Parses one revision source.
///
/// Blank lines are ignored; any other line must be exactly a numeric code
/// and a name separated by whitespace.
///
/// # Errors
///
/// [`GbError::Parse`] with the 1-based line number of the first bad line,
/// [`GbError::Io`] if reading fails.
pub fn parse_revision<R: BufRead>(reader: R) -> Result<Dataset> {
    parse_with(reader, Malformed::Fail)
}

fn parse_with<R: BufRead>(reader: R, malformed: Malformed) -> Result<Dataset> {
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_line(trimmed) {
            Some(entry) => entries.push(entry),
            None if malformed == Malformed::Skip => {
                tracing::warn!(line = idx + 1, content = trimmed, "skipping malformed record");
            }
            None => {
                return Err(GbError::Parse {
                    line: idx + 1,
                    content: trimmed.to_owned(),
                })
            }
        }
    }
    Ok(entries.into_iter().collect())
}

fn parse_line(line: &str) -> Option<(u32, String)> {
    let mut fields = line.split_whitespace();
    let code = fields.next()?.parse::<u32>().ok()?;
    let name = fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    Some((code, name.to_owned()))
}

impl Dataset {
    /// Merges revision files in order; later files win on duplicate codes.
    pub fn from_sources<P: AsRef<Path>>(sources: &[P]) -> Result<Self> {
        if sources.is_empty() {
            return Err(GbError::NotFound("no revision sources given".into()));
        }
        let mut merged = Dataset::default();
        for source in sources {
            let path = source.as_ref();
            let revision = parse_revision(common_io::open_stream(path)?)?;
            tracing::debug!(source = %path.display(), records = revision.len(), "parsed revision");
            merged.merge(revision);
        }
        tracing::info!("{} records loaded", merged.len());
        Ok(merged)
    }

    /// The sample dataset compiled into the crate.
    ///
    /// It holds excerpts of the 2002 and 2015-12 revisions only (parts of
    /// Beijing, Tianjin, Hebei, Liaoning and Jilin); most real codes are not
    /// in it. Load complete revision files with [`Dataset::from_sources`].
    ///
    /// Needs no filesystem access. The embedded files are known-good; a bad
    /// line would be skipped with a warning rather than fail the call.
    pub fn bundled() -> Self {
        let mut merged = Dataset::default();
        for (_, text) in BUNDLED_REVISIONS {
            // Reading from a byte slice cannot produce an I/O error, and
            // `Skip` never returns a parse error.
            if let Ok(revision) = parse_with(text.as_bytes(), Malformed::Skip) {
                merged.merge(revision);
            }
        }
        tracing::debug!(records = merged.len(), "bundled dataset ready");
        merged
    }

    /// Names of the bundled revisions, oldest first.
    pub fn bundled_revisions() -> impl Iterator<Item = &'static str> {
        BUNDLED_REVISIONS.iter().map(|(name, _)| *name)
    }

    /// The directory holding the bundled sample files.
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DivisionCode;
    use std::io::Write;

    #[test]
    fn parses_tab_and_space_separated_lines() {
        let text = "110000\t北京市\n\n110100 市辖区\r\n  110105   朝阳区  \n";
        let ds = parse_revision(text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.name_of(DivisionCode::new(110105)), Some("朝阳区"));
    }

    #[test]
    fn malformed_line_reports_position() {
        let text = "110000 北京市\n110100\n";
        match parse_revision(text.as_bytes()) {
            Err(GbError::Parse { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "110100");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(parse_revision("abc 北京市".as_bytes()).is_err());
        assert!(parse_revision("110000 北京 市".as_bytes()).is_err());
    }

    #[test]
    fn later_sources_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("GB2260-2002.txt");
        let new = dir.path().join("GB2260-201512.txt");
        std::fs::File::create(&old)
            .unwrap()
            .write_all("130600 保定市\n130602 新市区\n130603 北市区\n".as_bytes())
            .unwrap();
        std::fs::File::create(&new)
            .unwrap()
            .write_all("130600 保定市\n130602 竞秀区\n".as_bytes())
            .unwrap();

        let ds = Dataset::from_sources(&[&old, &new]).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.name_of(DivisionCode::new(130602)), Some("竞秀区"));
        assert_eq!(ds.name_of(DivisionCode::new(130603)), Some("北市区"));
    }

    #[test]
    fn empty_source_list_is_rejected() {
        let none: [&Path; 0] = [];
        assert!(matches!(Dataset::from_sources(&none), Err(GbError::NotFound(_))));
    }

    #[test]
    fn bundled_merges_all_revisions() {
        let ds = Dataset::bundled();
        assert!(!ds.is_empty());
        // only in the 2002 excerpt
        assert_eq!(ds.name_of(DivisionCode::new(110103)), Some("崇文区"));
        // renamed in 2015
        assert_eq!(ds.name_of(DivisionCode::new(130602)), Some("竞秀区"));
        // a sample, not the full standard
        assert!(!ds.contains(DivisionCode::new(440305)));
        assert_eq!(
            Dataset::bundled_revisions().collect::<Vec<_>>(),
            ["sample-2002", "sample-201512"]
        );
    }

    #[test]
    fn bundled_matches_files_on_disk() {
        let dir = Dataset::default_data_dir();
        let from_disk = Dataset::from_sources(&[
            dir.join("sample-2002.txt"),
            dir.join("sample-201512.txt"),
        ])
        .unwrap();
        assert_eq!(from_disk, Dataset::bundled());
    }
}
