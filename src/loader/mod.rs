//! Descriptor file loading.
//!
//! Plants and demands come from whitespace-separated text files with two
//! header lines; transmission lines come from a fixed-layout binary file.
//! Any failure aborts the load before the grid is handed to dispatch.

pub mod demands;
pub mod lines;
pub mod plants;
mod text;

use std::path::Path;

use tracing::info;

pub use demands::parse_demands;
pub use lines::{encode_lines, parse_lines};
pub use plants::parse_plants;

use crate::config::FilesConfig;
use crate::error::LoadError;
use crate::grid::PowerGrid;

async fn read_text(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>, LoadError> {
    tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load all plants, demands, and transmission lines into a new grid
pub async fn load_grid(name: &str, files: &FilesConfig) -> Result<PowerGrid, LoadError> {
    let mut grid = PowerGrid::new(name);

    let plants_file = files.plants.display().to_string();
    for plant in parse_plants(&plants_file, &read_text(&files.plants).await?)? {
        grid.add_plant(plant);
    }

    let demands_file = files.demands.display().to_string();
    for demand in parse_demands(&demands_file, &read_text(&files.demands).await?)? {
        grid.add_demand(demand);
    }

    for line in parse_lines(&read_bytes(&files.lines).await?)? {
        grid.add_line(line);
    }

    info!(
        plants = grid.plants().len(),
        demands = grid.demands().len(),
        lines = grid.lines().len(),
        "grid loaded"
    );

    Ok(grid)
}
