use serde::Serialize;
use tracing::{debug, info};

use crate::dispatch::{DispatchEngine, DispatchOutcome};
use crate::domain::{Demand, Plant, TransLine};
use crate::error::LedgerError;

/// The power grid: every plant, demand location, and transmission line of a run.
///
/// Plants are held in a single owned collection; the dispatch pass refers
/// to them by position.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PowerGrid {
    name: String,
    plants: Vec<Plant>,
    demands: Vec<Demand>,
    lines: Vec<TransLine>,
}

impl PowerGrid {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_plant(&mut self, plant: Plant) {
        self.plants.push(plant);
    }

    pub fn add_demand(&mut self, demand: Demand) {
        self.demands.push(demand);
    }

    pub fn add_line(&mut self, line: TransLine) {
        self.lines.push(line);
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    pub fn lines(&self) -> &[TransLine] {
        &self.lines
    }

    pub fn plant_count(&self) -> usize {
        self.plants.len()
    }

    /// Fix the draw order for the run.
    ///
    /// Plants: descending sustainability score. Lines: descending efficiency.
    /// Both sorts are stable, so equal keys keep their load order.
    pub fn finalize_order(&mut self) {
        self.plants
            .sort_by(|a, b| b.sustain_score().cmp(&a.sustain_score()));
        self.lines
            .sort_by(|a, b| b.efficiency().total_cmp(&a.efficiency()));
        debug!(
            plants = self.plants.len(),
            lines = self.lines.len(),
            "grid draw order finalized"
        );
    }

    /// Have each plant recompute today's output from its operating conditions
    pub fn adjust_plants_for_conditions(&mut self) {
        for plant in &mut self.plants {
            let output = plant.refresh_output();
            debug!(plant = plant.name(), output_mw = output, "plant output refreshed");
        }
    }

    /// Distribute power from the plants to all demand locations
    pub fn distribute_power(&mut self) -> Result<DispatchOutcome, LedgerError> {
        info!(
            grid = %self.name,
            plants = self.plants.len(),
            demands = self.demands.len(),
            lines = self.lines.len(),
            "distributing power"
        );
        DispatchEngine::new(&mut self.plants, &mut self.lines, &mut self.demands).run()
    }

    /// Order, refresh, and distribute in one call
    pub fn simulate(&mut self) -> Result<DispatchOutcome, LedgerError> {
        self.finalize_order();
        self.adjust_plants_for_conditions();
        self.distribute_power()
    }
}
