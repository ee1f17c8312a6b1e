//! Bit-exact serialization of the plot file's fixed-size records, and the
//! domain-separated public-key hash used to index them.
//!
//! All integers are little-endian. The layouts here are normative: an
//! implementation that diverges from them cannot interoperate with plots
//! written by this one (spec §4.1).

use argon2::{Algorithm, Argon2, Params, Version};

use crate::config;
use crate::error::{Result, StorageProofError};

/// Fixed-size plot file header: `u32 version | u32 num_keys | 32B lib_version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
    pub num_keys: u32,
    pub lib_version: [u8; config::LIB_VERSION_SIZE],
}

impl Header {
    /// Build a header for a fresh plot of `num_keys` entries, stamping the
    /// current library version (ASCII, zero-padded to 32 bytes).
    pub fn new(num_keys: u32) -> Self {
        let mut lib_version = [0u8; config::LIB_VERSION_SIZE];
        let bytes = config::LIB_VERSION.as_bytes();
        let take = bytes.len().min(config::LIB_VERSION_SIZE);
        lib_version[..take].copy_from_slice(&bytes[..take]);

        Self {
            version: config::FORMAT_VERSION,
            num_keys,
            lib_version,
        }
    }

    /// Serialize to the fixed 40-byte on-disk representation.
    pub fn to_bytes(&self) -> [u8; config::HEADER_SIZE] {
        let mut buf = [0u8; config::HEADER_SIZE];
        buf[0..4].copy_from_slice(&self.version.to_le_bytes());
        buf[4..8].copy_from_slice(&self.num_keys.to_le_bytes());
        buf[8..40].copy_from_slice(&self.lib_version);
        buf
    }

    /// Parse a header from its 40-byte on-disk representation.
    ///
    /// Fails with [`StorageProofError::Malformed`] if `data` is shorter
    /// than [`config::HEADER_SIZE`].
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < config::HEADER_SIZE {
            return Err(StorageProofError::Malformed(format!(
                "header truncated: got {} bytes, need {}",
                data.len(),
                config::HEADER_SIZE
            )));
        }

        let version = u32::from_le_bytes(data[0..4].try_into().unwrap());
        let num_keys = u32::from_le_bytes(data[4..8].try_into().unwrap());
        let mut lib_version = [0u8; config::LIB_VERSION_SIZE];
        lib_version.copy_from_slice(&data[8..40]);

        Ok(Self {
            version,
            num_keys,
            lib_version,
        })
    }
}

/// A single index entry: the absolute file offset of a private key, and the
/// domain-separated hash of its corresponding public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    pub offset: u64,
    pub hash: [u8; 32],
}

impl KeyEntry {
    /// Serialize to the fixed 40-byte on-disk representation.
    pub fn to_bytes(&self) -> [u8; config::KEY_ENTRY_SIZE] {
        let mut buf = [0u8; config::KEY_ENTRY_SIZE];
        buf[0..8].copy_from_slice(&self.offset.to_le_bytes());
        buf[8..40].copy_from_slice(&self.hash);
        buf
    }

    /// Parse a key entry from its 40-byte on-disk representation.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < config::KEY_ENTRY_SIZE {
            return Err(StorageProofError::Malformed(format!(
                "key entry truncated: got {} bytes, need {}",
                data.len(),
                config::KEY_ENTRY_SIZE
            )));
        }

        let offset = u64::from_le_bytes(data[0..8].try_into().unwrap());
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&data[8..40]);

        Ok(Self { offset, hash })
    }
}

/// Compute the domain-separated public-key hash used to index a plot entry.
///
/// `H(pk) := Argon2id(password = pk_bytes, salt = "storageproof", time = 1,
/// memory = 65536 KiB, parallelism = 4, output_len = 32)`. These parameters
/// are normative (spec §4.1): changing any of them yields incompatible
/// plots, which is why they are pulled from [`config`] rather than inlined.
pub fn hash_public_key(pk_bytes: &[u8]) -> Result<[u8; 32]> {
    let params = Params::new(
        config::HASH_MEMORY_COST_KIB,
        config::HASH_TIME_COST,
        config::HASH_PARALLELISM,
        Some(config::HASH_OUTPUT_LEN),
    )
    .map_err(|e| StorageProofError::Crypto(format!("invalid argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut out = [0u8; 32];
    argon2
        .hash_password_into(pk_bytes, config::HASH_SALT, &mut out)
        .map_err(|e| StorageProofError::Crypto(format!("argon2 hashing failed: {e}")))?;

    Ok(out)
}
