//! The Plotter: generates a fresh plot file of `k * 1000` ML-DSA-87
//! keypairs, indexed by a domain-separated hash of each public key.
//!
//! The Plotter is not crash-safe (spec §4.2): a process failure mid-plot
//! can leave an unusable file. Such files are detectable (the header
//! claims `N` keys the file is too short to hold, or the index disagrees
//! with the key region) and are rejected by [`crate::verifier::verify_plot`];
//! this module makes no attempt to repair them.

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, info_span};
use uuid::Uuid;

use crate::codec::{self, Header, KeyEntry};
use crate::config;
use crate::error::{Result, StorageProofError};
use crate::keys;

/// Generate a new plot file of `k * 1000` keypairs in `dest_dir`.
///
/// Returns the path of the plot file written. Protocol (spec §4.2):
///
/// 1. Reserve the header and index region with zero bytes.
/// 2. For each key: generate an ML-DSA-87 keypair, record the current
///    offset, append the serialized private key, hash the public key.
/// 3. Seek back to the start and rewrite the definitive header and index.
pub fn plot(dest_dir: &Path, k: u32, verbose: bool) -> Result<PathBuf> {
    if k == 0 {
        return Err(StorageProofError::BadInput(
            "k must be greater than 0".to_string(),
        ));
    }

    let _span = info_span!("plot", k).entered();

    let num_keys = k * config::KEYS_PER_K;
    let file_name = format!(
        "{}{}{}{}",
        config::PLOT_FILENAME_PREFIX,
        config::FORMAT_VERSION,
        Uuid::new_v4(),
        config::PLOT_FILENAME_SUFFIX
    );
    let file_path = dest_dir.join(file_name);

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&file_path)?;

    let header = Header::new(num_keys);
    let header_bytes = header.to_bytes();
    file.write_all(&header_bytes)?;

    let index_placeholder = vec![0u8; config::KEY_ENTRY_SIZE * num_keys as usize];
    file.write_all(&index_placeholder)?;

    let mut entries = Vec::with_capacity(num_keys as usize);
    let start = Instant::now();

    for i in 0..num_keys {
        if verbose && i % config::PLOT_PROGRESS_INTERVAL == 0 {
            debug!(
                progress = i,
                total = num_keys,
                elapsed_secs = start.elapsed().as_secs_f64(),
                "plotting key"
            );
        }

        let (pk, sk) = keys::generate_keypair()?;

        let offset = file.stream_position()?;

        let sk_bytes = keys::serialize_private_key(sk);
        file.write_all(&sk_bytes)?;

        let pk_bytes = keys::serialize_public_key(pk);
        let hash = codec::hash_public_key(&pk_bytes)?;

        entries.push(KeyEntry { offset, hash });
    }

    file.seek(SeekFrom::Start(0))?;
    file.write_all(&header_bytes)?;
    for entry in &entries {
        file.write_all(&entry.to_bytes())?;
    }
    file.sync_all()?;

    if verbose {
        info!(
            num_keys,
            elapsed_secs = start.elapsed().as_secs_f64(),
            path = %file_path.display(),
            "plot complete"
        );
    }

    Ok(file_path)
}

/// Read back the freshly-written header of `path` without loading the
/// full index. Primarily useful for tests and diagnostics.
pub(crate) fn read_header(path: &Path) -> Result<Header> {
    use std::io::Read;

    let mut file = File::open(path)?;
    let mut buf = [0u8; config::HEADER_SIZE];
    file.read_exact(&mut buf)?;
    Header::from_bytes(&buf)
}
