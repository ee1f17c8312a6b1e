//! The Plot Verifier: an offline audit tool that scans an entire plot file
//! end-to-end, recomputing each public-key hash from the stored private key
//! and comparing it to the on-disk index entry.
//!
//! This is operationally distinct from [`crate::solution::Solution::verify`],
//! which verifies a signed challenge response without touching any plot.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, info_span};

use crate::codec::{self, Header, KeyEntry};
use crate::config;
use crate::error::{Result, StorageProofError};
use crate::keys;

/// Verify every key entry in the plot file at `file_path`.
///
/// For each entry: seek to its offset, read `PrivKeySize` bytes, deserialize
/// the private key, derive and serialize the public key, recompute its
/// domain-separated hash, and byte-compare against the entry's stored hash.
/// The first mismatch aborts the whole verification with
/// [`StorageProofError::IntegrityMismatch`].
pub fn verify_plot(file_path: &Path, verbose: bool) -> Result<()> {
    let _span = info_span!("verify_plot", path = %file_path.display()).entered();

    let mut file = File::open(file_path)?;

    let mut header_bytes = [0u8; config::HEADER_SIZE];
    file.read_exact(&mut header_bytes)?;
    let header = Header::from_bytes(&header_bytes)?;

    let mut entries = Vec::with_capacity(header.num_keys as usize);
    let mut entry_bytes = [0u8; config::KEY_ENTRY_SIZE];
    for _ in 0..header.num_keys {
        file.read_exact(&mut entry_bytes)?;
        entries.push(KeyEntry::from_bytes(&entry_bytes)?);
    }

    let start = Instant::now();

    for (i, entry) in entries.iter().enumerate() {
        if verbose && (i as u32) % config::PLOT_PROGRESS_INTERVAL == 0 {
            debug!(
                progress = i,
                total = header.num_keys,
                elapsed_secs = start.elapsed().as_secs_f64(),
                "verifying key"
            );
        }

        file.seek(SeekFrom::Start(entry.offset))?;
        let mut sk_bytes = vec![0u8; config::PRIVATE_KEY_SIZE];
        file.read_exact(&mut sk_bytes)?;

        let sk = keys::deserialize_private_key(&sk_bytes)?;
        let pk = keys::derive_public_key(&sk);
        let pk_bytes = keys::serialize_public_key(pk);
        let actual = codec::hash_public_key(&pk_bytes)?;

        if actual != entry.hash {
            return Err(StorageProofError::IntegrityMismatch {
                index: i as u32,
                expected: entry.hash,
                actual,
            });
        }
    }

    if verbose {
        info!(
            num_keys = header.num_keys,
            elapsed_secs = start.elapsed().as_secs_f64(),
            "verification successful"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotter::plot;
    use tempfile::tempdir;

    #[test]
    fn freshly_plotted_file_verifies() {
        let dir = tempdir().unwrap();
        let path = plot(dir.path(), 1, false).unwrap();
        verify_plot(&path, false).unwrap();
    }

    #[test]
    fn corrupted_hash_is_detected() {
        use std::io::{Seek, SeekFrom, Write};

        let dir = tempdir().unwrap();
        let path = plot(dir.path(), 1, false).unwrap();

        // Flip a byte inside the first index entry's hash field.
        let mut file = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        let corrupt_offset = config::HEADER_SIZE as u64 + 8; // first byte of entry 0's hash
        file.seek(SeekFrom::Start(corrupt_offset)).unwrap();
        file.write_all(&[0xFF]).unwrap();
        drop(file);

        let err = verify_plot(&path, false).unwrap_err();
        match err {
            StorageProofError::IntegrityMismatch { index, .. } => assert_eq!(index, 0),
            other => panic!("expected IntegrityMismatch, got {other:?}"),
        }
    }
}
