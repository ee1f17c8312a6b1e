//! The challenge–response solution protocol: package a signed proof that
//! the holder controls a key whose public-key hash is `distance` bits from
//! a challenge, and verify such a package without access to any plot.

use fips204::ml_dsa_87::PrivateKey;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{Result, StorageProofError};
use crate::keys;

/// A self-contained, textually-encoded proof: a challenge hash, the
/// claimed distance, a public key, and a signature over the challenge.
/// All binary fields are ASCII-85 (Adobe variant) encoded for stability in
/// JSON and plaintext transport (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub hash: String,
    pub distance: i64,
    pub public_key: String,
    pub signature: String,
}

impl Solution {
    /// Build a new solution: derive the public key from `sk`, sign
    /// `challenge` with the empty context using an OS-backed RNG (ML-DSA-87
    /// signing is randomized — two calls with identical inputs will not
    /// produce identical signatures), and ASCII-85 encode every binary
    /// field as UTF-8.
    pub fn new(challenge: &[u8; 32], distance: i64, sk: &PrivateKey) -> Result<Self> {
        let pk = keys::derive_public_key(sk);
        let pk_bytes = keys::serialize_public_key(pk);
        let signature = keys::sign(sk, challenge)?;

        Ok(Self {
            hash: ascii85::encode(challenge),
            distance,
            public_key: ascii85::encode(&pk_bytes),
            signature: ascii85::encode(&signature),
        })
    }

    /// Verify the signature against the carried hash and public key.
    ///
    /// `distance` is advisory metadata for consensus policy above this
    /// core; it is never re-checked against any plot here (spec §4.4) —
    /// callers that need a distance threshold enforce it themselves.
    pub fn verify(&self) -> Result<bool> {
        let hash = decode_ascii85(&self.hash)?;
        if hash.len() != config::CHALLENGE_SIZE {
            return Err(StorageProofError::BadInput(format!(
                "decoded hash must be {} bytes, got {}",
                config::CHALLENGE_SIZE,
                hash.len()
            )));
        }

        let pk_bytes = decode_ascii85(&self.public_key)?;
        let signature = decode_ascii85(&self.signature)?;

        let pk = keys::deserialize_public_key(&pk_bytes)?;
        keys::verify(&pk, &hash, &signature)
    }
}

/// Decode an ASCII-85 (Adobe variant, no `<~ ~>` framing) string, tolerating
/// trailing whitespace/newlines (spec §9).
fn decode_ascii85(s: &str) -> Result<Vec<u8>> {
    ascii85::decode(s.trim_end())
        .map_err(|e| StorageProofError::Malformed(format!("invalid ascii85 data: {e}")))
}

/// Return the solution with the minimum `distance`; the first occurrence
/// in `solutions` wins ties. `None` for an empty slice.
pub fn best_match(solutions: &[Solution]) -> Option<&Solution> {
    solutions
        .iter()
        .fold(None::<&Solution>, |best, candidate| match best {
            None => Some(candidate),
            Some(current) if candidate.distance < current.distance => Some(candidate),
            Some(current) => Some(current),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_keypair;

    #[test]
    fn new_solution_verifies() {
        let (_, sk) = generate_keypair().unwrap();
        let challenge = [9u8; 32];
        let solution = Solution::new(&challenge, 0, &sk).unwrap();
        assert!(solution.verify().unwrap());
    }

    #[test]
    fn cross_key_signature_forgery_fails_verification() {
        let (_, sk_a) = generate_keypair().unwrap();
        let (_, sk_b) = generate_keypair().unwrap();
        let challenge = [3u8; 32];

        let solution_a = Solution::new(&challenge, 0, &sk_a).unwrap();
        let solution_b = Solution::new(&challenge, 0, &sk_b).unwrap();

        let mut forged = solution_a.clone();
        forged.signature = solution_b.signature.clone();

        assert!(!forged.verify().unwrap());
    }

    #[test]
    fn solutions_are_serializable_as_json() {
        let (_, sk) = generate_keypair().unwrap();
        let solution = Solution::new(&[1u8; 32], 5, &sk).unwrap();
        let json = serde_json::to_string(&solution).unwrap();
        let parsed: Solution = serde_json::from_str(&json).unwrap();
        assert!(parsed.verify().unwrap());
    }

    #[test]
    fn best_match_picks_minimum_distance_first_tie_wins() {
        let (_, sk) = generate_keypair().unwrap();
        let challenge = [0u8; 32];

        let a = Solution::new(&challenge, 5, &sk).unwrap();
        let b = Solution::new(&challenge, 2, &sk).unwrap();
        let c = Solution::new(&challenge, 2, &sk).unwrap();

        let solutions = vec![a, b.clone(), c];
        let winner = best_match(&solutions).unwrap();
        assert_eq!(winner.distance, 2);
        assert_eq!(winner.signature, b.signature);
    }

    #[test]
    fn best_match_of_empty_slice_is_none() {
        assert!(best_match(&[]).is_none());
    }
}
