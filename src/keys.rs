//! Thin wrapper around the ML-DSA-87 (FIPS 204, Dilithium Level 5) primitive
//! used for every keypair in a plot and every signed [`crate::solution::Solution`].
//!
//! This module exists so the rest of the crate never touches `fips204`
//! directly: one seam to update if the underlying post-quantum crate ever
//! changes, and one place documenting which `fips204` calls are load-bearing.

use fips204::ml_dsa_87::{self, PrivateKey, PublicKey};
use fips204::traits::{SerDes, Signer, Verifier};

use crate::config;
use crate::error::{Result, StorageProofError};

/// Generate a fresh ML-DSA-87 keypair from an OS-backed cryptographic RNG.
pub fn generate_keypair() -> Result<(PublicKey, PrivateKey)> {
    ml_dsa_87::try_keygen()
        .map_err(|e| StorageProofError::Crypto(format!("keypair generation failed: {e}")))
}

/// Serialize a public key to its fixed-size on-disk/transport representation.
///
/// Takes `pk` by value rather than by reference: `fips204`'s `SerDes::into_bytes`
/// consumes `self`, and calling sites here never need the key again afterward,
/// so there is no need to lean on `PublicKey: Clone`.
pub fn serialize_public_key(pk: PublicKey) -> Vec<u8> {
    pk.into_bytes().to_vec()
}

/// Serialize a private key to its fixed-size on-disk representation.
///
/// Takes `sk` by value for the same reason as [`serialize_public_key`] — and,
/// for a secret key specifically, this also avoids requiring `PrivateKey:
/// Clone`, a capability post-quantum signing crates conventionally withhold
/// to keep key material from being duplicated unnecessarily.
pub fn serialize_private_key(sk: PrivateKey) -> Vec<u8> {
    sk.into_bytes().to_vec()
}

/// Parse a public key from bytes, requiring an exact [`config::PUBLIC_KEY_SIZE`] length.
pub fn deserialize_public_key(bytes: &[u8]) -> Result<PublicKey> {
    let arr: [u8; config::PUBLIC_KEY_SIZE] = bytes.try_into().map_err(|_| {
        StorageProofError::BadInput(format!(
            "public key must be {} bytes, got {}",
            config::PUBLIC_KEY_SIZE,
            bytes.len()
        ))
    })?;
    PublicKey::try_from_bytes(arr)
        .map_err(|e| StorageProofError::Malformed(format!("invalid public key: {e}")))
}

/// Parse a private key from bytes, requiring an exact [`config::PRIVATE_KEY_SIZE`] length.
pub fn deserialize_private_key(bytes: &[u8]) -> Result<PrivateKey> {
    let arr: [u8; config::PRIVATE_KEY_SIZE] = bytes.try_into().map_err(|_| {
        StorageProofError::Malformed(format!(
            "private key must be {} bytes, got {}",
            config::PRIVATE_KEY_SIZE,
            bytes.len()
        ))
    })?;
    PrivateKey::try_from_bytes(arr)
        .map_err(|e| StorageProofError::Malformed(format!("invalid private key: {e}")))
}

/// Derive the public key belonging to a private key (spec §4.4: `pk := sk.public()`).
pub fn derive_public_key(sk: &PrivateKey) -> PublicKey {
    sk.get_public_key()
}

/// Sign `message` under `sk` with the empty context (spec §6). ML-DSA-87
/// signing consumes randomness, so two calls over identical inputs produce
/// different signatures (spec §9) — callers must never compare signatures
/// for equality across invocations.
pub fn sign(sk: &PrivateKey, message: &[u8]) -> Result<Vec<u8>> {
    sk.try_sign(message, config::EMPTY_CONTEXT)
        .map(|sig| sig.to_vec())
        .map_err(|e| StorageProofError::Crypto(format!("signing failed: {e}")))
}

/// Verify `signature` over `message` under `pk` with the empty context.
pub fn verify(pk: &PublicKey, message: &[u8], signature: &[u8]) -> Result<bool> {
    let sig: [u8; config::SIGNATURE_SIZE] = signature.try_into().map_err(|_| {
        StorageProofError::BadInput(format!(
            "signature must be {} bytes, got {}",
            config::SIGNATURE_SIZE,
            signature.len()
        ))
    })?;

    Ok(pk.try_verify(message, &sig, config::EMPTY_CONTEXT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypair_round_trips_through_bytes() {
        let (pk, sk) = generate_keypair().unwrap();

        let pk_bytes = serialize_public_key(pk);
        let sk_bytes = serialize_private_key(sk);
        assert_eq!(pk_bytes.len(), config::PUBLIC_KEY_SIZE);
        assert_eq!(sk_bytes.len(), config::PRIVATE_KEY_SIZE);

        let pk2 = deserialize_public_key(&pk_bytes).unwrap();
        let sk2 = deserialize_private_key(&sk_bytes).unwrap();

        assert_eq!(serialize_public_key(pk2), pk_bytes);
        assert_eq!(serialize_private_key(sk2), sk_bytes);
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let (pk, sk) = generate_keypair().unwrap();
        let message = b"a 32-byte challenge goes here...";
        let sig = sign(&sk, message).unwrap();
        assert!(verify(&pk, message, &sig).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_message() {
        let (pk, sk) = generate_keypair().unwrap();
        let sig = sign(&sk, b"original message").unwrap();
        assert!(!verify(&pk, b"tampered message", &sig).unwrap());
    }

    #[test]
    fn derive_public_key_matches_generated_public_key() {
        let (pk, sk) = generate_keypair().unwrap();
        let derived = derive_public_key(&sk);
        assert_eq!(serialize_public_key(derived), serialize_public_key(pk));
    }
}
