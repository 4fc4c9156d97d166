//! Transposition table with alpha-beta bound flags.
//!
//! Entries are keyed by the Zobrist hash of a draft state. A value computed
//! under a pruning window is only a bound on the true value, so every entry
//! records which kind of bound it is.
//!
//! The table is only meaningful together with the keys it was filled under.
//! Files therefore hold both, and loading returns both.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DraftError, ValidationError};

use super::zobrist::{ZobristHash, ZobristKeys};

/// Version tag written at the start of every table file.
pub const TABLE_FORMAT_VERSION: u32 = 1;

/// How a stored value relates to the true minimax value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bound {
    Exact,
    /// True value is at least the stored value.
    Lower,
    /// True value is at most the stored value.
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub value: i32,
    pub bound: Bound,
}

impl TableEntry {
    #[must_use]
    pub const fn new(value: i32, bound: Bound) -> Self {
        Self { value, bound }
    }

    /// Classify a fail-soft result searched under `(alpha, beta)`.
    #[must_use]
    pub fn classify(value: i32, alpha: i32, beta: i32) -> Self {
        let bound = if value <= alpha {
            Bound::Upper
        } else if value >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        Self { value, bound }
    }
}

/// Memoized search values.
#[derive(Clone, Debug, Default)]
pub struct TranspositionTable {
    entries: FxHashMap<u64, TableEntry>,
}

#[derive(Serialize)]
struct TableFileRef<'a> {
    version: u32,
    keys: &'a ZobristKeys,
    entries: Vec<(u64, TableEntry)>,
}

#[derive(Deserialize)]
struct TableFile {
    version: u32,
    keys: ZobristKeys,
    entries: Vec<(u64, TableEntry)>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    #[must_use]
    pub fn probe(&self, hash: ZobristHash) -> Option<TableEntry> {
        self.entries.get(&hash.value()).copied()
    }

    /// Store an entry, replacing whatever was there.
    #[inline]
    pub fn store(&mut self, hash: ZobristHash, entry: TableEntry) {
        self.entries.insert(hash.value(), entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the table and the keys it was built under.
    ///
    /// Entries are written in hash order so equal tables give equal files.
    pub fn save(&self, path: impl AsRef<Path>, keys: &ZobristKeys) -> Result<(), DraftError> {
        let mut entries: Vec<(u64, TableEntry)> = self.entries.iter().map(|(&k, &v)| (k, v)).collect();
        entries.sort_unstable_by_key(|&(hash, _)| hash);

        let file = TableFileRef {
            version: TABLE_FORMAT_VERSION,
            keys,
            entries,
        };
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        bincode::serialize_into(&mut writer, &file)?;
        writer.flush()?;

        debug!(path = %path.as_ref().display(), entries = self.len(), "saved transposition table");
        Ok(())
    }

    /// Read a table and its keys.
    ///
    /// Only the shape of the keys is checked: they must cover `id_count`
    /// ids. Whether they were generated for the same rewards is up to the
    /// caller.
    pub fn load(path: impl AsRef<Path>, id_count: usize) -> Result<(Self, ZobristKeys), DraftError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let file: TableFile = bincode::deserialize_from(reader)?;

        if file.version != TABLE_FORMAT_VERSION {
            return Err(ValidationError::TableVersion {
                expected: TABLE_FORMAT_VERSION,
                found: file.version,
            }
            .into());
        }
        if file.keys.id_count() != id_count {
            return Err(ValidationError::KeyShapeMismatch {
                expected: id_count,
                found: file.keys.id_count(),
            }
            .into());
        }

        let table = Self {
            entries: file.entries.into_iter().collect(),
        };
        debug!(path = %path.as_ref().display(), entries = table.len(), "loaded transposition table");
        Ok((table, file.keys))
    }
}
