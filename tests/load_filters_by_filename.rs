//! Loading only picks up files matching the `sp...plot` naming grammar,
//! recursing into subdirectories and ignoring everything else.

use std::fs;

#[test]
fn load_plots_ignores_non_matching_files_and_recurses_into_subdirectories() {
    let dir = tempfile::tempdir().unwrap();

    // An unrelated file that should be ignored.
    fs::write(dir.path().join("notes.txt"), b"not a plot").unwrap();

    // A nested directory containing the actual plot.
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    let plot_path = storageproof::plot(&nested, 1, false).unwrap();

    let collection = storageproof::load_plots(&[dir.path()], false).unwrap();

    assert_eq!(collection.plots.len(), 1);
    assert!(collection.plots.contains_key(&plot_path));
}
