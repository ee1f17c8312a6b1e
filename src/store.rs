//! The Store: loads a set of plot files' headers and indices into memory,
//! and answers nearest-neighbor lookups by Hamming distance, retrieving the
//! winning private key on demand from its plot file.
//!
//! A [`PlotCollection`] is immutable once built by [`load_plots`]: there is
//! no supported mutation after loading (spec §3, §5).

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use fips204::ml_dsa_87::PrivateKey;
use tracing::{debug, info_span};
use walkdir::WalkDir;

use crate::codec::{Header, KeyEntry};
use crate::config;
use crate::error::Result;
use crate::keys;

/// The header and index of a single loaded plot file. The private key
/// region is never resident; it is read from disk on demand.
#[derive(Debug, Clone)]
pub struct PlotInfo {
    pub header: Header,
    pub entries: Vec<KeyEntry>,
}

/// An immutable, in-memory view over a set of loaded plot files.
#[derive(Debug, Clone, Default)]
pub struct PlotCollection {
    /// Keyed by plot file path in a `BTreeMap` so that iteration order —
    /// and therefore which plot's entry wins a Hamming-distance tie — is
    /// deterministic for a given set of input paths. The spec only
    /// guarantees *a* first-hit winner, never which one; a `BTreeMap`
    /// gives callers that reproducibility for free.
    pub plots: BTreeMap<PathBuf, PlotInfo>,
}

/// The result of a [`PlotCollection::look_up`] call.
///
/// An empty collection yields `hash: None, distance: -1, private_key: None`
/// with no error (spec §4.3) — this is the one documented exception to the
/// "errors propagate" policy (spec §7).
pub struct LookupResult {
    pub hash: Option<[u8; 32]>,
    pub distance: i32,
    pub private_key: Option<PrivateKey>,
}

/// Hand-written rather than derived: deriving `Debug` would require
/// `fips204::ml_dsa_87::PrivateKey: Debug`, a capability post-quantum
/// signing crates conventionally withhold from secret-key types precisely
/// to stop key material from being formatted into logs or error messages.
/// Redact it explicitly instead of relying on that trait bound existing.
impl fmt::Debug for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupResult")
            .field("hash", &self.hash)
            .field("distance", &self.distance)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl PlotCollection {
    /// Total number of key entries resident across all loaded plots.
    pub fn total_keys(&self) -> usize {
        self.plots.values().map(|p| p.entries.len()).sum()
    }

    /// Find the entry whose hash is closest to `challenge` under Hamming
    /// distance, then read its private key from the owning plot file.
    ///
    /// Linear scan over every plot and every entry (spec §4.3); the first
    /// entry to achieve the running minimum wins ties, in the collection's
    /// (deterministic) iteration order. Safe to call concurrently from
    /// multiple threads against a shared, immutable collection: each call
    /// opens its own file handle for the private-key read.
    pub fn look_up(&self, challenge: &[u8; 32]) -> Result<LookupResult> {
        let mut best_distance: i32 = -1;
        let mut best_hash: Option<[u8; 32]> = None;
        let mut best_path: Option<&Path> = None;
        let mut best_entry: Option<KeyEntry> = None;

        for (path, info) in &self.plots {
            for entry in &info.entries {
                let distance = hamming_distance(challenge, &entry.hash) as i32;
                if best_distance == -1 || distance < best_distance {
                    best_distance = distance;
                    best_hash = Some(entry.hash);
                    best_path = Some(path.as_path());
                    best_entry = Some(*entry);
                }
            }
        }

        let (Some(path), Some(entry)) = (best_path, best_entry) else {
            return Ok(LookupResult {
                hash: None,
                distance: -1,
                private_key: None,
            });
        };

        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(entry.offset))?;
        let mut sk_bytes = vec![0u8; config::PRIVATE_KEY_SIZE];
        file.read_exact(&mut sk_bytes)?;
        let private_key = keys::deserialize_private_key(&sk_bytes)?;

        Ok(LookupResult {
            hash: best_hash,
            distance: best_distance,
            private_key: Some(private_key),
        })
    }
}

/// Number of differing bits between two 32-byte hashes (Hamming distance
/// over XOR popcount). Reference algorithm: Kernighan's `while x { x &=
/// x - 1; d += 1 }` per byte (spec §9) — correct and simple to audit; an
/// implementation may substitute a table or native popcount as long as it
/// returns the identical value for every input.
pub fn hamming_distance(a: &[u8; 32], b: &[u8; 32]) -> u32 {
    let mut distance = 0u32;
    for i in 0..32 {
        let mut xor = a[i] ^ b[i];
        while xor > 0 {
            distance += 1;
            xor &= xor - 1;
        }
    }
    distance
}

/// Load the headers and indices of every plot file reachable from `paths`.
///
/// Each path may be a regular file or a directory, walked recursively. A
/// candidate file is included iff its basename starts with `sp` and ends
/// with `.plot` (directories matching that pattern are not mistaken for
/// plot files — the walk only considers regular files). Any I/O failure
/// or parse error aborts the whole call (spec §4.3): a partially-loaded
/// collection is never returned.
pub fn load_plots(paths: &[impl AsRef<Path>], verbose: bool) -> Result<PlotCollection> {
    let _span = info_span!("load_plots").entered();

    let mut collection = PlotCollection::default();

    for root in paths {
        let root = root.as_ref();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !file_name.starts_with(config::PLOT_FILENAME_PREFIX)
                || !file_name.ends_with(config::PLOT_FILENAME_SUFFIX)
            {
                continue;
            }

            let path = entry.path().to_path_buf();
            if verbose {
                debug!(path = %path.display(), "loading plot file");
            }

            let info = load_plot_info(&path)?;
            collection.plots.insert(path, info);
        }
    }

    Ok(collection)
}

fn load_plot_info(path: &Path) -> Result<PlotInfo> {
    let mut file = File::open(path)?;

    let mut header_bytes = [0u8; config::HEADER_SIZE];
    file.read_exact(&mut header_bytes)?;
    let header = Header::from_bytes(&header_bytes)?;

    let mut entries = Vec::with_capacity(header.num_keys as usize);
    let mut entry_bytes = [0u8; config::KEY_ENTRY_SIZE];
    for _ in 0..header.num_keys {
        file.read_exact(&mut entry_bytes)?;
        entries.push(KeyEntry::from_bytes(&entry_bytes)?);
    }

    Ok(PlotInfo { header, entries })
}
