use serde::{Deserialize, Serialize};

/// Tolerance used when checking that a transfer conserves energy across the line loss
const CONSERVATION_TOLERANCE_MW: f64 = 1e-6;

/// One committed transfer from a plant, over a line, to a demand location.
///
/// Indices refer to positions in the grid's plant, line, and demand
/// collections as ordered for the pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub demand_idx: usize,
    pub line_idx: usize,
    pub plant_idx: usize,

    /// Power delivered to the demand location (after line loss)
    pub delivered_mw: f64,

    /// Power drawn from the plant (before line loss)
    pub drawn_mw: f64,

    /// Line efficiency at the time of the transfer
    pub efficiency: f64,

    /// Retail price billed for the delivered power
    pub sell_price: f64,

    /// Production cost of the drawn power
    pub cost: f64,
}

impl Transfer {
    /// Power lost in transit on the line
    pub fn loss_mw(&self) -> f64 {
        self.drawn_mw - self.delivered_mw
    }

    /// drawn × efficiency == delivered, within floating point tolerance
    pub fn verify_conservation(&self) -> bool {
        (self.drawn_mw * self.efficiency - self.delivered_mw).abs() < CONSERVATION_TOLERANCE_MW
    }
}

/// Result of one distribution pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub transfers: Vec<Transfer>,
    /// Demands that had a deficit when the pass reached them
    pub demands_visited: usize,
}

impl DispatchOutcome {
    pub fn delivered_mw(&self) -> f64 {
        self.transfers.iter().map(|t| t.delivered_mw).sum()
    }

    pub fn drawn_mw(&self) -> f64 {
        self.transfers.iter().map(|t| t.drawn_mw).sum()
    }

    pub fn loss_mw(&self) -> f64 {
        self.transfers.iter().map(Transfer::loss_mw).sum()
    }

    /// Total drawn from a single plant during the pass
    pub fn drawn_from_plant(&self, plant_idx: usize) -> f64 {
        self.transfers
            .iter()
            .filter(|t| t.plant_idx == plant_idx)
            .map(|t| t.drawn_mw)
            .sum()
    }

    pub fn transfers_on_line(&self, line_idx: usize) -> impl Iterator<Item = &Transfer> + '_ {
        self.transfers.iter().filter(move |t| t.line_idx == line_idx)
    }
}
