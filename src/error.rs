use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading plant, demand, or transmission line descriptors.
///
/// Any of these aborts the run before a distribution pass starts.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: record {record}: {message}")]
    Parse {
        file: String,
        record: usize,
        message: String,
    },

    #[error("unknown plant type '{0}'")]
    UnknownCategory(String),

    #[error("invalid descriptor '{id}': {message}")]
    Invalid { id: String, message: String },

    #[error("transmission line file layout error: {0}")]
    Layout(String),
}

/// Bookkeeping corruption detected while committing a transfer.
///
/// These indicate a logic defect, never a transient condition.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("plant '{source_id}' overdrawn: requested {requested:.6}MW, available {available:.6}MW")]
    SourceOverdraw {
        source_id: String,
        requested: f64,
        available: f64,
    },

    #[error("line '{line_id}' overdrawn: requested {requested:.6}MW, available {available:.6}MW")]
    LineOverdraw {
        line_id: String,
        requested: f64,
        available: f64,
    },

    #[error("negative quantity {amount} committed against '{id}'")]
    NegativeAmount { id: String, amount: f64 },
}

/// Top-level error for a grid run.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("ledger invariant violated: {0}")]
    Ledger(#[from] LedgerError),
}
