//! The reference melody catalog and the builder that fills it from a directory of MIDI files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::CatalogConfig;
use crate::contour::{encode_exact, Contour};
use crate::error::{HumError, Result};
use crate::midi::read_note_on_keys;

/// A reference melody: its identifier and its contour.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: String,
    pub contour: Contour,
}

/// Reference melodies by identifier. Iterates in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Adds an entry, failing with `DuplicateId` if `id` is already present.
    pub fn insert(&mut self, id: impl Into<String>, contour: Contour) -> Result<()> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(HumError::DuplicateId(id));
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push(CatalogEntry { id, contour });
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Contour> {
        self.index.get(id).map(|i| &self.entries[*i].contour)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Reference files that could not be added to the catalog.
#[derive(Debug, Default)]
pub struct CatalogReport {
    pub failures: Vec<(PathBuf, HumError)>,
}

impl CatalogReport {
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds a [Catalog] from the reference melodies in a directory.
pub struct CatalogBuilder {
    config: CatalogConfig,
}

impl CatalogBuilder {
    pub fn new(config: CatalogConfig) -> Result<Self> {
        config.validate()?;
        Ok(CatalogBuilder { config })
    }

    /// Encodes every reference file directly inside `dir`.
    ///
    /// Files are identified by their file name and added in file name order.
    /// A file that cannot be read or parsed is logged, listed in the returned
    /// report and skipped. Failing to list `dir` itself is an error.
    pub fn build(&self, dir: &Path) -> Result<(Catalog, CatalogReport)> {
        let mut report = CatalogReport::default();
        let candidates = self.list_reference_files(dir, &mut report)?;
        log::debug!("found {} reference files in {}", candidates.len(), dir.display());

        let encoded: Vec<(PathBuf, Result<Contour>)> = candidates
            .into_par_iter()
            .map(|path| {
                let contour = read_note_on_keys(&path).map(|keys| encode_exact(&keys));
                (path, contour)
            })
            .collect();

        let catalog = assemble(encoded, &mut report);
        log::debug!(
            "catalogued {} melodies, skipped {}",
            catalog.len(),
            report.failures.len()
        );
        Ok((catalog, report))
    }

    /// Returns the matching regular files directly inside `dir`, sorted by file name.
    fn list_reference_files(&self, dir: &Path, report: &mut CatalogReport) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(HumError::source_read(dir, "not a readable directory"));
        }

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()));

        let mut files = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.has_reference_extension(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf);
                    if e.depth() == 0 || path.as_deref() == Some(dir) {
                        return Err(HumError::source_read(dir, e));
                    }
                    log::warn!("skipping directory entry: {}", e);
                    let path = path.unwrap_or_else(|| dir.to_path_buf());
                    let error = HumError::source_read(&path, e);
                    report.failures.push((path, error));
                }
            }
        }
        Ok(files)
    }

    fn has_reference_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&self.config.extension))
            .unwrap_or(false)
    }
}

/// Inserts encoded files in order. Unreadable files and identifier clashes
/// go to `report` instead of the catalog.
fn assemble(encoded: Vec<(PathBuf, Result<Contour>)>, report: &mut CatalogReport) -> Catalog {
    let mut catalog = Catalog::new();
    for (path, contour) in encoded {
        let inserted = contour.and_then(|contour| {
            if contour.is_empty() {
                log::debug!("{} has fewer than two notes", path.display());
            }
            catalog.insert(file_id(&path), contour)
        });
        if let Err(e) = inserted {
            log::warn!("skipping {}: {}", path.display(), e);
            report.failures.push((path, e));
        }
    }
    catalog
}

/// The file name, lossily converted to UTF-8. Distinct non UTF-8 names may
/// map to the same identifier.
fn file_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contour(s: &str) -> Contour {
        s.parse().unwrap()
    }

    #[test]
    fn test_insertion_order() {
        let mut catalog = Catalog::new();
        catalog.insert("zebra.mid", contour("UU")).unwrap();
        catalog.insert("alpha.mid", contour("DD")).unwrap();
        let ids: Vec<&str> = catalog.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, vec!["zebra.mid", "alpha.mid"]);
        assert_eq!(catalog.get("alpha.mid"), Some(&contour("DD")));
        assert_eq!(catalog.get("missing.mid"), None);
    }

    #[test]
    fn test_duplicate_id() {
        let mut catalog = Catalog::new();
        catalog.insert("song.mid", contour("U")).unwrap();
        match catalog.insert("song.mid", contour("D")) {
            Err(HumError::DuplicateId(id)) => assert_eq!(id, "song.mid"),
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("song.mid"), Some(&contour("U")));
    }

    #[test]
    fn test_extension_matching() {
        let builder = CatalogBuilder::new(CatalogConfig::default()).unwrap();
        assert!(builder.has_reference_extension(Path::new("db/song.mid")));
        assert!(builder.has_reference_extension(Path::new("db/SONG.MID")));
        assert!(!builder.has_reference_extension(Path::new("db/song.midi")));
        assert!(!builder.has_reference_extension(Path::new("db/mid")));
    }

    #[test]
    fn test_identifier_clash_is_reported() {
        let encoded = vec![
            (PathBuf::from("db/\u{FFFD}.mid"), Ok(contour("UD"))),
            (PathBuf::from("db/song.mid"), Ok(contour("SS"))),
            (PathBuf::from("other/\u{FFFD}.mid"), Ok(contour("DU"))),
            (
                PathBuf::from("db/broken.mid"),
                Err(HumError::source_read(Path::new("db/broken.mid"), "truncated")),
            ),
        ];
        let mut report = CatalogReport::default();
        let catalog = assemble(encoded, &mut report);

        let ids: Vec<&str> = catalog.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, vec!["\u{FFFD}.mid", "song.mid"]);
        assert_eq!(catalog.get("\u{FFFD}.mid"), Some(&contour("UD")));

        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].0, PathBuf::from("other/\u{FFFD}.mid"));
        assert!(matches!(report.failures[0].1, HumError::DuplicateId(_)));
        assert!(matches!(report.failures[1].1, HumError::SourceReadError { .. }));
    }

    #[test]
    fn test_missing_directory() {
        let builder = CatalogBuilder::new(CatalogConfig::default()).unwrap();
        assert!(matches!(
            builder.build(Path::new("/nonexistent/melodies")),
            Err(HumError::SourceReadError { .. })
        ));
    }
}
