pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod grid;
pub mod loader;
pub mod report;
pub mod telemetry;

pub use error::{GridError, LedgerError, LoadError};
pub use grid::PowerGrid;
