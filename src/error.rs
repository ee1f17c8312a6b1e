//! Error types for the storage-proof plotting and lookup engine.

/// Error types for the storage-proof library.
///
/// Every fallible core operation returns `Result<T, StorageProofError>`.
/// The variants mirror the error kinds named in the protocol design: I/O
/// failures, malformed on-disk data, integrity mismatches found by the
/// Verifier, bad caller input, and cryptographic failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageProofError {
    /// Open/read/seek/write failure, surfaced verbatim.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Truncated header/index/key region, unexpected EOF, or a
    /// deserialization failure.
    #[error("malformed data: {0}")]
    Malformed(String),

    /// The Verifier found `hash != H(derivedPublicKey)` for an index entry.
    #[error("key {index}: hash mismatch")]
    IntegrityMismatch {
        index: u32,
        expected: [u8; 32],
        actual: [u8; 32],
    },

    /// Bad caller input: challenge length != 32, `k == 0`, a decoded public
    /// key or signature of the wrong size, and similar.
    #[error("bad input: {0}")]
    BadInput(String),

    /// Keypair generation, signing, or signature verification failed.
    #[error("cryptographic error: {0}")]
    Crypto(String),
}

/// Convenience `Result` alias for storage-proof operations.
pub type Result<T> = std::result::Result<T, StorageProofError>;
