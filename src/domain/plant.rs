use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

use crate::error::{LedgerError, LoadError};

/// Residual below which a plant draw is treated as consuming all available capacity.
pub const PLANT_SETTLE_TOLERANCE_MW: f64 = 0.001;

/// Plant category tag as it appears in the plant descriptor file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum PlantCategory {
    Solar,
    Wind,
    Hydro,
    Fossil,
    Nuclear,
    #[strum(serialize = "GeoTherm")]
    #[serde(rename = "GeoTherm")]
    Geothermal,
    Fusion,
    Dilithium,
}

/// Category-specific generation parameters.
///
/// Each variant knows how to turn its own parameters (plus the shared
/// nameplate capacity and uptime) into today's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum PlantKind {
    Solar { panel_count: f64, sunlight_hours: f64 },
    Wind { turbine_count: u32, avg_wind_speed: f64 },
    Fossil { fuel_type: String, emission_rate: f64 },
    Hydro { water_flow_rate: f64 },
    Nuclear,
    #[serde(rename = "GeoTherm")]
    Geothermal,
    Fusion { neutron_flux: f64 },
    Dilithium { crystal_purity: i32, field_stability: f64 },
}

impl PlantKind {
    pub fn category(&self) -> PlantCategory {
        match self {
            PlantKind::Solar { .. } => PlantCategory::Solar,
            PlantKind::Wind { .. } => PlantCategory::Wind,
            PlantKind::Fossil { .. } => PlantCategory::Fossil,
            PlantKind::Hydro { .. } => PlantCategory::Hydro,
            PlantKind::Nuclear => PlantCategory::Nuclear,
            PlantKind::Geothermal => PlantCategory::Geothermal,
            PlantKind::Fusion { .. } => PlantCategory::Fusion,
            PlantKind::Dilithium { .. } => PlantCategory::Dilithium,
        }
    }

    /// Output available today in MW (uptime is a percentage, 0-100)
    pub fn compute_output(&self, max_capacity_mw: f64, uptime_percent: f64) -> f64 {
        match self {
            PlantKind::Solar { panel_count, sunlight_hours } => {
                panel_count * (sunlight_hours / 24.0) * uptime_percent / 70_000.0
            }
            PlantKind::Wind { turbine_count, avg_wind_speed } => {
                *turbine_count as f64 * 2.0 * avg_wind_speed * uptime_percent / 1_900.0
            }
            PlantKind::Hydro { water_flow_rate } => water_flow_rate * uptime_percent / 3_065_500.0,
            PlantKind::Fossil { .. } | PlantKind::Nuclear | PlantKind::Geothermal => {
                max_capacity_mw * uptime_percent / 100.0
            }
            PlantKind::Fusion { .. } => max_capacity_mw * 0.6,
            PlantKind::Dilithium { .. } => max_capacity_mw * 0.995,
        }
    }

    /// Short human-readable description of current operating conditions
    pub fn describe_conditions(&self) -> String {
        match self {
            PlantKind::Solar { panel_count, sunlight_hours } => {
                format!("Panel Cnt: {panel_count}, Sun Hrs: {sunlight_hours} Hrs")
            }
            PlantKind::Wind { turbine_count, avg_wind_speed } => {
                format!("Turbines Operational: {turbine_count}, Wind Spd: {avg_wind_speed}")
            }
            PlantKind::Fossil { fuel_type, emission_rate } => {
                format!("Fuel Type: {fuel_type}, Co2 Rate: {emission_rate}")
            }
            PlantKind::Hydro { water_flow_rate } => format!("Water Flow: {water_flow_rate:.0}"),
            PlantKind::Nuclear => "All nuclear systems nominal".to_string(),
            PlantKind::Geothermal => "Geothermal conditions normal".to_string(),
            PlantKind::Fusion { neutron_flux } => {
                format!("Neutron Flux: {neutron_flux} (MW/sqMeter)")
            }
            PlantKind::Dilithium { crystal_purity, field_stability } => {
                format!("Current Purity: {crystal_purity}, Field Stability: {field_stability}")
            }
        }
    }
}

/// Plant record as read from the descriptor file, before it joins the grid
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlantDescriptor {
    #[validate(length(min = 1))]
    pub name: String,
    pub sustain_score: i32,
    #[validate(range(exclusive_min = 0.0))]
    pub cost_per_mw: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub max_capacity_mw: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub uptime_percent: f64,
    pub kind: PlantKind,
}

/// Generation plant and its capacity ledger.
///
/// Invariant: `0 <= available <= current <= max`.
#[derive(Debug, Clone, Serialize)]
pub struct Plant {
    name: String,
    sustain_score: i32,
    max_capacity_mw: f64,
    cur_capacity_mw: f64,
    avail_capacity_mw: f64,
    cost_per_mw: f64,
    uptime_percent: f64,
    kind: PlantKind,
}

impl Plant {
    /// Create a plant with all capacities set to the nameplate maximum
    pub fn new(
        name: impl Into<String>,
        sustain_score: i32,
        max_capacity_mw: f64,
        cost_per_mw: f64,
        uptime_percent: f64,
        kind: PlantKind,
    ) -> Self {
        Self {
            name: name.into(),
            sustain_score,
            max_capacity_mw,
            cur_capacity_mw: max_capacity_mw,
            avail_capacity_mw: max_capacity_mw,
            cost_per_mw,
            uptime_percent,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> PlantCategory {
        self.kind.category()
    }

    pub fn kind(&self) -> &PlantKind {
        &self.kind
    }

    pub fn sustain_score(&self) -> i32 {
        self.sustain_score
    }

    pub fn max_capacity_mw(&self) -> f64 {
        self.max_capacity_mw
    }

    pub fn cur_capacity_mw(&self) -> f64 {
        self.cur_capacity_mw
    }

    pub fn avail_capacity_mw(&self) -> f64 {
        self.avail_capacity_mw
    }

    pub fn cost_per_mw(&self) -> f64 {
        self.cost_per_mw
    }

    pub fn uptime_percent(&self) -> f64 {
        self.uptime_percent
    }

    /// Capacity committed so far in this pass
    pub fn used_capacity_mw(&self) -> f64 {
        self.max_capacity_mw - self.avail_capacity_mw
    }

    pub fn describe_conditions(&self) -> String {
        self.kind.describe_conditions()
    }

    /// Recompute today's output and make all of it available.
    ///
    /// The result is bounded to `[0, max]` so the ledger invariant holds
    /// regardless of what the category formula yields.
    pub fn refresh_output(&mut self) -> f64 {
        let raw = self.kind.compute_output(self.max_capacity_mw, self.uptime_percent);
        let output = raw.max(0.0).min(self.max_capacity_mw);
        if output != raw {
            tracing::debug!(
                plant = %self.name,
                raw_mw = raw,
                bounded_mw = output,
                "plant output bounded to nameplate capacity"
            );
        }
        self.cur_capacity_mw = output;
        self.avail_capacity_mw = output;
        output
    }

    /// Commit `amount_mw` of this plant's available capacity
    pub fn reduce_capacity(&mut self, amount_mw: f64) -> Result<(), LedgerError> {
        if amount_mw < 0.0 {
            return Err(LedgerError::NegativeAmount {
                id: self.name.clone(),
                amount: amount_mw,
            });
        }

        if (amount_mw - self.avail_capacity_mw).abs() < PLANT_SETTLE_TOLERANCE_MW {
            self.avail_capacity_mw = 0.0;
            return Ok(());
        }

        if amount_mw > self.avail_capacity_mw {
            return Err(LedgerError::SourceOverdraw {
                source_id: self.name.clone(),
                requested: amount_mw,
                available: self.avail_capacity_mw,
            });
        }

        self.avail_capacity_mw -= amount_mw;
        Ok(())
    }
}

impl TryFrom<PlantDescriptor> for Plant {
    type Error = LoadError;

    fn try_from(descriptor: PlantDescriptor) -> Result<Self, Self::Error> {
        descriptor.validate().map_err(|e| LoadError::Invalid {
            id: descriptor.name.clone(),
            message: e.to_string(),
        })?;

        Ok(Plant::new(
            descriptor.name,
            descriptor.sustain_score,
            descriptor.max_capacity_mw,
            descriptor.cost_per_mw,
            descriptor.uptime_percent,
            descriptor.kind,
        ))
    }
}
