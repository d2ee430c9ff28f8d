//! Loads descriptor files from disk and runs a full grid simulation.

use std::path::{Path, PathBuf};

use grid_dispatch::config::FilesConfig;
use grid_dispatch::domain::{DemandStatus, LineDescriptor};
use grid_dispatch::loader::{encode_lines, load_grid};
use grid_dispatch::report::GridSummary;
use grid_dispatch::LoadError;

const PLANTS: &str = "\
Plant       Type      Sustain  Cost/MW  Capacity  Uptime  Extra
---------   -------   -------  -------  --------  ------  -----
SunValley   Solar     95       42.5     300       98      2400000 6
OldSmokey   Fossil    10       25.0     800       85      Coal 2.3
Diablo      Nuclear   60       30.0     1100      93
";

const DEMANDS: &str = "\
Location     Required  Price
----------   --------  -----
Springfield  450       55.0
Shelbyville  300       61.5
Ogdenville   2000      48.0
";

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("grid-dispatch-{test}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_files(dir: &Path) -> FilesConfig {
    let files = FilesConfig {
        plants: dir.join("Plants.txt"),
        demands: dir.join("Demands.txt"),
        lines: dir.join("TransLines.dat"),
    };
    std::fs::write(&files.plants, PLANTS).unwrap();
    std::fs::write(&files.demands, DEMANDS).unwrap();
    std::fs::write(
        &files.lines,
        encode_lines(&[
            LineDescriptor { line_id: "West".into(), max_capacity_mw: 500.0, efficiency: 0.88 },
            LineDescriptor { line_id: "East".into(), max_capacity_mw: 900.0, efficiency: 0.95 },
        ]),
    )
    .unwrap();
    files
}

#[tokio::test]
async fn loads_and_simulates_grid_from_files() {
    let dir = scratch_dir("full");
    let files = write_files(&dir);

    let mut grid = load_grid("Energy Grid", &files).await.unwrap();
    assert_eq!(grid.plant_count(), 3);
    assert_eq!(grid.demands().len(), 3);
    assert_eq!(grid.lines().len(), 2);

    let outcome = grid.simulate().unwrap();

    assert_eq!(grid.lines()[0].line_id(), "East");
    assert_eq!(grid.plants()[0].name(), "SunValley");
    assert!(!outcome.transfers.is_empty());

    let summary = GridSummary::from_grid(&grid);
    assert_eq!(summary.demands[0].status, DemandStatus::Met);
    assert_eq!(summary.demands[1].status, DemandStatus::Met);
    assert_eq!(summary.demands[2].status, DemandStatus::PartiallyMet);
    assert!(summary.totals.percent_met > 0.0 && summary.totals.percent_met < 100.0);
    assert!(summary.totals.delivery_efficiency <= 1.0);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn missing_file_fails_before_any_pass() {
    let dir = scratch_dir("missing");
    let mut files = write_files(&dir);
    files.demands = dir.join("NoSuchFile.txt");

    let err = load_grid("Energy Grid", &files).await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));

    std::fs::remove_dir_all(dir).ok();
}
