//! The process-wide lexicon store: the phonetic lexicon (`pho.tab2`) and
//! zero or more lazily-loaded GTAB tables. Loaded once, shared read-only by
//! every context for the lifetime of the process.

mod gtab;
mod pho_tab;
mod registry;

pub use gtab::{GtabItem, GtabTable};
pub use pho_tab::{PhoItem, PhoLexicon};
pub use registry::{find_by_filename, find_by_id, GtabTableInfo, BUILTIN_GTAB_TABLES};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, RwLock};

use crate::error::{GtabError, LexiconError};

const PHO_TAB_FILENAME: &str = "pho.tab2";

struct Store {
    data_dir: PathBuf,
    pho: Option<PhoLexicon>,
    gtabs: Vec<(String, GtabTable)>,
}

static STORE: OnceLock<RwLock<Store>> = OnceLock::new();

fn store() -> &'static RwLock<Store> {
    STORE.get_or_init(|| {
        RwLock::new(Store {
            data_dir: PathBuf::new(),
            pho: None,
            gtabs: Vec::new(),
        })
    })
}

/// Search-path candidates for a filename, tried in order: `<data_dir>`,
/// `<data_dir>/data`, then the platform data directory's `hime/data` as
/// the host-independent stand-in for the original `<dll_dir>/../data`
/// fallback (this crate has no notion of the loading binary's directory).
fn candidate_paths(data_dir: Option<&Path>, filename: &str) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = data_dir {
        dirs.push(dir.to_path_buf());
        dirs.push(dir.join("data"));
    }
    if let Some(dir) = dirs_next::data_dir() {
        dirs.push(dir.join("hime").join("data"));
    }
    dirs.into_iter().map(|dir| dir.join(filename)).collect()
}

/// Resolves the effective data directory and loads `pho.tab2` from it.
/// Idempotent: calling this again re-resolves the search path and
/// replaces whatever lexicon was previously loaded.
pub fn init(data_dir: Option<&Path>) -> Result<(), LexiconError> {
    let mut last_err = None;
    for path in candidate_paths(data_dir, PHO_TAB_FILENAME) {
        tracing::debug!(path = %path.display(), "trying phonetic lexicon path");
        match fs::read(&path) {
            Ok(bytes) => match PhoLexicon::parse(&bytes, &path) {
                Ok(pho) => {
                    tracing::info!(path = %path.display(), "loaded phonetic lexicon");
                    let mut guard = store().write().expect("lexicon store lock poisoned");
                    guard.data_dir = path
                        .parent()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(PathBuf::new);
                    guard.pho = Some(pho);
                    return Ok(());
                }
                Err(e) => last_err = Some(e),
            },
            Err(e) => last_err = Some(LexiconError::Io { path, source: e }),
        }
    }
    tracing::warn!("no phonetic lexicon found in any candidate directory");
    Err(last_err.unwrap_or(LexiconError::NotFound))
}

/// Releases the loaded phonetic lexicon and every loaded GTAB table,
/// clearing the store back to its pre-`init` state. Idempotent.
pub fn cleanup() {
    let mut guard = store().write().expect("lexicon store lock poisoned");
    guard.pho = None;
    guard.gtabs.clear();
    guard.data_dir = PathBuf::new();
}

/// Reads the currently loaded phonetic lexicon, if any.
pub fn with_pho_lexicon<T>(f: impl FnOnce(Option<&PhoLexicon>) -> T) -> T {
    match STORE.get() {
        Some(store) => {
            let guard = store.read().expect("lexicon store lock poisoned");
            f(guard.pho.as_ref())
        }
        None => f(None),
    }
}

fn data_dir() -> PathBuf {
    store().read().expect("lexicon store lock poisoned").data_dir.clone()
}

/// Loads a GTAB table by filename, searching the same path the phonetic
/// lexicon uses. A table already loaded under this filename is a no-op.
pub fn load_table(filename: &str) -> Result<(), GtabError> {
    if with_gtab_table(filename, |t| t.is_some()) {
        return Ok(());
    }
    let mut last_err = None;
    for path in candidate_paths(Some(&data_dir()), filename) {
        tracing::debug!(path = %path.display(), "trying GTAB table path");
        match fs::read(&path) {
            Ok(bytes) => match GtabTable::parse(&bytes, &path) {
                Ok(table) => {
                    tracing::info!(path = %path.display(), name = %table.cname, "loaded GTAB table");
                    let mut guard = store().write().expect("lexicon store lock poisoned");
                    guard.gtabs.push((filename.to_string(), table));
                    return Ok(());
                }
                Err(e) => last_err = Some(e),
            },
            Err(e) => last_err = Some(GtabError::Io { path, source: e }),
        }
    }
    tracing::warn!(filename, "GTAB table not found in any candidate directory");
    Err(last_err.unwrap_or_else(|| GtabError::UnknownFilename(filename.to_string())))
}

/// Loads a built-in GTAB table by its registry id.
pub fn load_table_by_id(id: u32) -> Result<(), GtabError> {
    let entry = find_by_id(id).ok_or(GtabError::UnknownId(id))?;
    load_table(entry.filename)
}

/// Reads a loaded GTAB table by the filename it was loaded under.
pub fn with_gtab_table<T>(filename: &str, f: impl FnOnce(Option<&GtabTable>) -> T) -> T {
    match STORE.get() {
        Some(store) => {
            let guard = store.read().expect("lexicon store lock poisoned");
            f(guard.gtabs.iter().find(|(name, _)| name == filename).map(|(_, t)| t))
        }
        None => f(None),
    }
}

pub fn loaded_table_count() -> usize {
    match STORE.get() {
        Some(store) => store.read().expect("lexicon store lock poisoned").gtabs.len(),
        None => 0,
    }
}

pub fn loaded_table_filename_at(index: usize) -> Option<String> {
    match STORE.get() {
        Some(store) => store
            .read()
            .expect("lexicon store lock poisoned")
            .gtabs
            .get(index)
            .map(|(name, _)| name.clone()),
        None => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn init_reports_not_found_without_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = init(Some(dir.path()));
        assert!(err.is_err());
        with_pho_lexicon(|pho| assert!(pho.is_none() || pho.is_some()));
    }

    #[test]
    fn init_loads_a_minimal_pho_tab() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PHO_TAB_FILENAME);
        let mut file = fs::File::create(&path).unwrap();
        // idxnum=0 (written twice), total_items=0, phrase_area_size=0.
        file.write_all(&0u16.to_le_bytes()).unwrap();
        file.write_all(&0u16.to_le_bytes()).unwrap();
        file.write_all(&0i32.to_le_bytes()).unwrap();
        file.write_all(&0i32.to_le_bytes()).unwrap();
        drop(file);

        init(Some(dir.path())).unwrap();
        with_pho_lexicon(|pho| {
            let pho = pho.expect("lexicon should be loaded");
            assert!(pho.lookup(0).is_empty());
        });
    }

    #[test]
    fn cleanup_clears_the_loaded_lexicon() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PHO_TAB_FILENAME);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(&0u16.to_le_bytes()).unwrap();
        file.write_all(&0u16.to_le_bytes()).unwrap();
        file.write_all(&0i32.to_le_bytes()).unwrap();
        file.write_all(&0i32.to_le_bytes()).unwrap();
        drop(file);

        init(Some(dir.path())).unwrap();
        with_pho_lexicon(|pho| assert!(pho.is_some()));
        cleanup();
        with_pho_lexicon(|pho| assert!(pho.is_none()));
    }
}
