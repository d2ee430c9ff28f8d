use tracing::{debug, info};

use super::{DispatchOutcome, Transfer};
use crate::domain::{Demand, Plant, TransLine};
use crate::error::LedgerError;

// Once a line's remaining capacity falls to this level it is treated as
// drained and the pass moves on to the next line. Coarser than the line's
// own settle tolerance.
const LINE_EXHAUSTED_THRESHOLD_MW: f64 = 0.5;

/// Dispatch Engine - THE CORE ALGORITHM
///
/// Greedily matches each demand location with plant capacity over the
/// transmission lines. Expects:
/// - lines ordered by descending efficiency
/// - plants ordered by descending sustainability score
///
/// The engine is the sole writer of all three ledgers for the pass.
pub struct DispatchEngine<'g> {
    plants: &'g mut [Plant],
    lines: &'g mut [TransLine],
    demands: &'g mut [Demand],
}

impl<'g> DispatchEngine<'g> {
    pub fn new(
        plants: &'g mut [Plant],
        lines: &'g mut [TransLine],
        demands: &'g mut [Demand],
    ) -> Self {
        Self {
            plants,
            lines,
            demands,
        }
    }

    /// Run one complete distribution pass over all demand locations.
    ///
    /// Demands are visited in collection order. A ledger error aborts the
    /// pass; transfers committed before it remain applied.
    pub fn run(mut self) -> Result<DispatchOutcome, LedgerError> {
        let mut outcome = DispatchOutcome::default();

        for demand_idx in 0..self.demands.len() {
            if self.demands[demand_idx].deficit_mw() <= 0.0 {
                continue;
            }
            outcome.demands_visited += 1;
            self.allocate_to_demand(demand_idx, &mut outcome)?;
        }

        info!(
            transfers = outcome.transfers.len(),
            demands_visited = outcome.demands_visited,
            delivered_mw = outcome.delivered_mw(),
            drawn_mw = outcome.drawn_mw(),
            "distribution pass complete"
        );

        Ok(outcome)
    }

    /// Allocate plant power and line capacity to a single demand location
    fn allocate_to_demand(
        &mut self,
        demand_idx: usize,
        outcome: &mut DispatchOutcome,
    ) -> Result<(), LedgerError> {
        let demand = &mut self.demands[demand_idx];

        for (line_idx, line) in self.lines.iter_mut().enumerate() {
            if line.avail_capacity_mw() <= 0.0 {
                continue;
            }
            if demand.deficit_mw() == 0.0 {
                break;
            }

            for (plant_idx, plant) in self.plants.iter_mut().enumerate() {
                if demand.deficit_mw() == 0.0 {
                    break;
                }
                if plant.avail_capacity_mw() <= 0.0 {
                    continue;
                }

                let transfer = commit_transfer(plant, line, demand)?;
                debug!(
                    demand = demand.location(),
                    plant = plant.name(),
                    line = line.line_id(),
                    delivered_mw = transfer.delivered_mw,
                    drawn_mw = transfer.drawn_mw,
                    sell_price = transfer.sell_price,
                    cost = transfer.cost,
                    "allocated power"
                );
                outcome.transfers.push(Transfer {
                    demand_idx,
                    line_idx,
                    plant_idx,
                    ..transfer
                });

                if line.avail_capacity_mw() <= LINE_EXHAUSTED_THRESHOLD_MW {
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Move as much power as the deficit, the plant (after line loss), and the
/// line allow, updating all three ledgers.
///
/// The returned transfer carries zeroed indices; the caller fills them in.
fn commit_transfer(
    plant: &mut Plant,
    line: &mut TransLine,
    demand: &mut Demand,
) -> Result<Transfer, LedgerError> {
    let efficiency = line.efficiency();
    let max_scaled_mw = plant.avail_capacity_mw() * efficiency;
    let delivered_mw = demand
        .deficit_mw()
        .min(max_scaled_mw)
        .min(line.avail_capacity_mw());
    let drawn_mw = delivered_mw / efficiency;

    plant.reduce_capacity(drawn_mw)?;
    line.allocate_capacity(delivered_mw)?;

    let cost = drawn_mw * plant.cost_per_mw();
    let sell_price = delivered_mw * demand.retail_price_per_mw();
    demand.apply_transfer(delivered_mw, sell_price, cost);

    Ok(Transfer {
        demand_idx: 0,
        line_idx: 0,
        plant_idx: 0,
        delivered_mw,
        drawn_mw,
        efficiency,
        sell_price,
        cost,
    })
}
