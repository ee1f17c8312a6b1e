//! Shared fixtures for the integration test suite.

use storageproof::store::PlotCollection;
use tempfile::TempDir;

/// A freshly-plotted `k = 1` plot (1000 keys), loaded into a collection.
pub struct TinyPlot {
    pub _dir: TempDir,
    pub path: std::path::PathBuf,
    pub collection: PlotCollection,
}

pub fn tiny_plot() -> TinyPlot {
    let dir = tempfile::tempdir().unwrap();
    let path = storageproof::plot(dir.path(), 1, false).unwrap();
    let collection = storageproof::load_plots(&[path.clone()], false).unwrap();

    TinyPlot {
        _dir: dir,
        path,
        collection,
    }
}
