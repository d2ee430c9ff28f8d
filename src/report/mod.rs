//! Read-only reporting over a grid's final ledger state.

pub mod render;
pub mod summary;

pub use render::{render, render_allocations, render_snapshot, render_text};
pub use summary::{DemandRow, GridSummary, GridTotals, LineRow, PlantRow};
