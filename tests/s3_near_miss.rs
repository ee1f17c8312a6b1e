//! S3 — near miss: flipping a single bit of a stored hash yields a lookup
//! whose distance matches the true nearest neighbor in the plot, not just
//! some entry that happens to deserialize.

mod common;

use storageproof::hamming_distance;

#[test]
fn single_bit_flip_yields_the_true_nearest_neighbor() {
    let setup = common::tiny_plot();

    let entry0 = setup
        .collection
        .plots
        .values()
        .next()
        .unwrap()
        .entries[0];

    let mut near_miss = entry0.hash;
    near_miss[0] ^= 0x01;

    let true_min = setup
        .collection
        .plots
        .values()
        .flat_map(|info| info.entries.iter())
        .map(|entry| hamming_distance(&near_miss, &entry.hash))
        .min()
        .expect("plot is non-empty");

    let result = setup.collection.look_up(&near_miss).unwrap();

    assert_eq!(result.distance, true_min as i32);
    assert!(result.private_key.is_some());
}
