/// Power Dispatch
///
/// Distributes plant output over the transmission lines to the demand
/// locations in a single greedy pass, keeping the plant, line, and demand
/// ledgers consistent after every transfer.

pub mod engine;
pub mod transfer;

pub use engine::DispatchEngine;
pub use transfer::{DispatchOutcome, Transfer};
