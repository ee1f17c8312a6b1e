//! S2 — positive lookup: challenging with a stored hash must return that
//! exact entry at distance 0, and the resulting solution must verify.

mod common;

use storageproof::Solution;

#[test]
fn exact_challenge_resolves_to_its_own_entry() {
    let setup = common::tiny_plot();

    let entry0 = setup
        .collection
        .plots
        .values()
        .next()
        .unwrap()
        .entries[0];

    let result = setup.collection.look_up(&entry0.hash).unwrap();

    assert_eq!(result.distance, 0);
    assert_eq!(result.hash, Some(entry0.hash));

    let sk = result.private_key.expect("private key must be retrievable");
    let solution = Solution::new(&entry0.hash, 0, &sk).unwrap();
    assert!(solution.verify().unwrap());
}
