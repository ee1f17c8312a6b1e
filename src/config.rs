//! Centralized configuration for the storage-proof plotting and lookup engine.
//!
//! This module contains the normative constants referenced throughout the
//! codebase. Keeping them in one place means the Plotter and the Verifier
//! can never silently drift apart on, say, the Argon2id parameters.

use fips204::ml_dsa_87;

/// Current plot file format version. Only version 1 is supported; there is
/// no migration path across versions (see spec Non-goals).
pub const FORMAT_VERSION: u32 = 1;

/// Size in bytes of the on-disk [`crate::codec::Header`].
pub const HEADER_SIZE: usize = 40;

/// Size in bytes of a single on-disk [`crate::codec::KeyEntry`].
pub const KEY_ENTRY_SIZE: usize = 40;

/// Size of the `libVersion` field inside the header, in bytes.
pub const LIB_VERSION_SIZE: usize = 32;

/// Informational library version string baked into every plot's header.
pub const LIB_VERSION: &str = "0.1.0";

/// Number of keys generated per unit of the `k` parameter (`N = k * 1000`).
pub const KEYS_PER_K: u32 = 1000;

/// Filename prefix for plot files: `sp<version><uuid>.plot`.
pub const PLOT_FILENAME_PREFIX: &str = "sp";

/// Filename suffix for plot files.
pub const PLOT_FILENAME_SUFFIX: &str = ".plot";

/// Size in bytes of a serialized ML-DSA-87 public key.
pub const PUBLIC_KEY_SIZE: usize = ml_dsa_87::PK_LEN;

/// Size in bytes of a serialized ML-DSA-87 private key.
pub const PRIVATE_KEY_SIZE: usize = ml_dsa_87::SK_LEN;

/// Size in bytes of an ML-DSA-87 signature.
pub const SIGNATURE_SIZE: usize = ml_dsa_87::SIG_LEN;

/// Size in bytes of a challenge / public-key hash.
pub const CHALLENGE_SIZE: usize = 32;

/// Domain-separation salt for the public-key hash (§4.1). Literal ASCII
/// string, no terminator, no padding beyond its own 12 bytes.
pub const HASH_SALT: &[u8] = b"storageproof";

/// Argon2id time cost (number of passes) for the public-key hash.
pub const HASH_TIME_COST: u32 = 1;

/// Argon2id memory cost in KiB (64 MiB) for the public-key hash.
pub const HASH_MEMORY_COST_KIB: u32 = 65536;

/// Argon2id parallelism (lanes) for the public-key hash.
pub const HASH_PARALLELISM: u32 = 4;

/// Argon2id output length in bytes for the public-key hash.
pub const HASH_OUTPUT_LEN: usize = 32;

/// Empty signing/verification context, per spec §6 ("Signature context for
/// `Sign`/`Verify` is the empty byte string").
pub const EMPTY_CONTEXT: &[u8] = &[];

/// How often (in generated keys) the Plotter emits a progress event, to
/// avoid flooding logs on multi-million-key plots.
pub const PLOT_PROGRESS_INTERVAL: u32 = 1000;

/// Number of random hashes used by the `benchmark-lookup` CLI operation.
pub const BENCHMARK_LOOKUP_COUNT: usize = 1024;
