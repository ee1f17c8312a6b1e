//! S6 — cross-key forgery: swapping in another key's signature over the
//! same challenge must fail verification.

use storageproof::keys::generate_keypair;
use storageproof::Solution;

#[test]
fn swapping_in_another_keys_signature_fails_verification() {
    let challenge = [0x5Au8; 32];

    let (_, sk_a) = generate_keypair().unwrap();
    let (_, sk_b) = generate_keypair().unwrap();

    let solution_a = Solution::new(&challenge, 0, &sk_a).unwrap();
    let solution_b = Solution::new(&challenge, 0, &sk_b).unwrap();

    let mut forged = solution_a;
    forged.signature = solution_b.signature;

    assert!(!forged.verify().unwrap());
}
