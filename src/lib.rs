//! `storageproof`: a proof-of-storage plotting and nearest-neighbor lookup
//! engine.
//!
//! A participant pre-computes ("plots") a large on-disk table of
//! post-quantum (ML-DSA-87) keypairs indexed by a domain-separated hash of
//! the public key. When later presented with a random 32-byte challenge,
//! the participant finds the stored key whose public-key hash is closest
//! to the challenge under Hamming distance, then signs the challenge with
//! the corresponding private key to prove both knowledge of the key and
//! retention of the storage.
//!
//! ## Main Components
//!
//! - [`codec`]: bit-exact plot file record serialization and the
//!   domain-separated public-key hash.
//! - [`plotter`]: generates a plot file of `k * 1000` keypairs.
//! - [`store`]: loads plot headers/indices and answers nearest-neighbor
//!   lookups, reading the winning private key from disk on demand.
//! - [`solution`]: builds and verifies signed challenge-response artifacts.
//! - [`verifier`]: an offline audit tool that recomputes every key's hash
//!   from its stored private key and compares it against the index.
//! - [`keys`]: thin wrapper around the ML-DSA-87 primitive.
//! - [`config`]: centralized, normative constants.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use storageproof::{plotter, store, solution, verifier};
//! use std::path::Path;
//!
//! // 1. Plot a small file (1000 keys) into a directory.
//! let plot_path = plotter::plot(Path::new("."), 1, false)?;
//!
//! // 2. Audit it end-to-end.
//! verifier::verify_plot(&plot_path, false)?;
//!
//! // 3. Load it and answer a lookup.
//! let collection = store::load_plots(&[plot_path], false)?;
//! let challenge = [0u8; 32];
//! let result = collection.look_up(&challenge)?;
//!
//! // 4. Package a solution, if a private key came back.
//! if let Some(sk) = result.private_key {
//!     let sol = solution::Solution::new(&challenge, result.distance as i64, &sk)?;
//!     assert!(sol.verify()?);
//! }
//! # Ok::<(), storageproof::StorageProofError>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod keys;
pub mod plotter;
pub mod solution;
pub mod store;
pub mod verifier;

pub use codec::{hash_public_key, Header, KeyEntry};
pub use error::{Result, StorageProofError};
pub use plotter::plot;
pub use solution::{best_match, Solution};
pub use store::{hamming_distance, load_plots, LookupResult, PlotCollection, PlotInfo};
pub use verifier::verify_plot;
