//! On-disk cache for pruning tables: one raw byte file per table, named by
//! the table, under a versioned cache directory.

use crate::pruning::{PruneTable, MAX_PRUNE_DEPTH};
use std::io;
use std::path::{Path, PathBuf};
use std::fs;
use thiserror::Error;

/// Bumped whenever the coordinate definitions or the byte layout change,
/// so stale caches are never read back.
pub const TABLE_FORMAT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("no cache directory available on this platform")]
    NoCacheDir,
    #[error("could not access table `{name}`: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("table `{name}` is corrupt: {reason}")]
    Corrupt { name: String, reason: String },
}

/// The directory tables live in: the override if given, otherwise the
/// platform cache directory. `None` only when the platform has neither.
#[must_use]
pub fn resolve_dir(override_dir: Option<&Path>) -> Option<PathBuf> {
    match override_dir {
        Some(dir) => Some(dir.to_path_buf()),
        None => dirs::cache_dir().map(|dir| {
            dir.join("scramblegen")
                .join(format!("tables-v{TABLE_FORMAT_VERSION}"))
        }),
    }
}

/// Read one pruning table back, validating its size and entry bounds.
///
/// # Errors
///
/// [`TableError::Io`] if the file cannot be read, [`TableError::Corrupt`]
/// if its contents cannot be a pruning table for this coordinate.
pub fn load(dir: &Path, name: &str, expected_len: usize) -> Result<PruneTable, TableError> {
    let bytes = fs::read(dir.join(name)).map_err(|source| TableError::Io {
        name: name.to_owned(),
        source,
    })?;
    let corrupt = |reason: String| TableError::Corrupt {
        name: name.to_owned(),
        reason,
    };
    if bytes.len() != expected_len {
        return Err(corrupt(format!(
            "expected {expected_len} entries, found {}",
            bytes.len()
        )));
    }
    if bytes[0] != 0 {
        return Err(corrupt("goal entry has non-zero distance".to_owned()));
    }
    if let Some(position) = bytes.iter().position(|&b| b > MAX_PRUNE_DEPTH) {
        return Err(corrupt(format!(
            "entry {position} exceeds the distance bound"
        )));
    }
    Ok(PruneTable::from_bytes(bytes))
}

/// Write one pruning table, creating the cache directory if needed.
///
/// # Errors
///
/// [`TableError::Io`] if the directory or file cannot be written.
pub fn store(dir: &Path, name: &str, table: &PruneTable) -> Result<(), TableError> {
    let io_err = |source| TableError::Io {
        name: name.to_owned(),
        source,
    };
    fs::create_dir_all(dir).map_err(io_err)?;
    fs::write(dir.join(name), table.as_bytes()).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Coordinate, ESlicePerm};
    use crate::pruning::PruneTable;
    use crate::tables::{MoveTable, PHASE2_MOVES};

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("scramblegen-test")
            .join(format!("{label}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = scratch_dir("round-trip");
        let moves = MoveTable::generate::<ESlicePerm>();
        let prune = PruneTable::generate(&moves, &PHASE2_MOVES);

        store(&dir, ESlicePerm::NAME, &prune).unwrap();
        let loaded = load(&dir, ESlicePerm::NAME, ESlicePerm::SIZE).unwrap();
        assert_eq!(loaded.as_bytes(), prune.as_bytes());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_table_is_an_io_error() {
        let dir = scratch_dir("missing");
        assert!(matches!(
            load(&dir, "flip", 2048),
            Err(TableError::Io { .. })
        ));
    }

    #[test]
    fn wrong_length_is_corrupt() {
        let dir = scratch_dir("truncated");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("flip"), [0u8; 16]).unwrap();
        assert!(matches!(
            load(&dir, "flip", 2048),
            Err(TableError::Corrupt { .. })
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn out_of_range_entry_is_corrupt() {
        let dir = scratch_dir("out-of-range");
        fs::create_dir_all(&dir).unwrap();
        let mut bytes = vec![0u8; 24];
        bytes[5] = 200;
        fs::write(dir.join("slice_perm"), &bytes).unwrap();
        assert!(matches!(
            load(&dir, "slice_perm", 24),
            Err(TableError::Corrupt { .. })
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
