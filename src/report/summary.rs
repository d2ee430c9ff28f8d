use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::DemandStatus;
use crate::grid::PowerGrid;

/// Final state of one demand location
#[derive(Debug, Clone, Serialize)]
pub struct DemandRow {
    pub location: String,
    pub required_mw: f64,
    pub supplied_mw: f64,
    pub deficit_mw: f64,
    pub status: DemandStatus,
    pub sell_price: f64,
    pub power_cost: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlantRow {
    pub name: String,
    pub category: String,
    pub sustain_score: i32,
    pub max_capacity_mw: f64,
    pub cur_capacity_mw: f64,
    pub avail_capacity_mw: f64,
    pub uptime_percent: f64,
    pub cost_per_mw: f64,
    pub conditions: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineRow {
    pub line_id: String,
    pub max_capacity_mw: f64,
    pub avail_capacity_mw: f64,
    pub efficiency: f64,
}

/// Grid-wide totals
#[derive(Debug, Clone, Default, Serialize)]
pub struct GridTotals {
    pub demand_requested_mw: f64,
    pub demand_supplied_mw: f64,
    /// Share of requested demand supplied, in percent
    pub percent_met: f64,
    /// Plant capacity committed: sum of (max - available)
    pub plant_capacity_used_mw: f64,
    /// Delivered power per MW of plant capacity used
    pub delivery_efficiency: f64,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
}

/// Read-only summary of a grid after distribution
#[derive(Debug, Clone, Serialize)]
pub struct GridSummary {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub grid_name: String,
    pub demands: Vec<DemandRow>,
    pub plants: Vec<PlantRow>,
    pub lines: Vec<LineRow>,
    pub totals: GridTotals,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

impl GridSummary {
    pub fn from_grid(grid: &PowerGrid) -> Self {
        let demands: Vec<DemandRow> = grid
            .demands()
            .iter()
            .map(|d| DemandRow {
                location: d.location().to_string(),
                required_mw: d.required_mw(),
                supplied_mw: d.acquired_mw(),
                deficit_mw: d.deficit_mw(),
                status: d.status(),
                sell_price: d.total_price(),
                power_cost: d.total_cost(),
                profit: d.profit(),
            })
            .collect();

        let plants: Vec<PlantRow> = grid
            .plants()
            .iter()
            .map(|p| PlantRow {
                name: p.name().to_string(),
                category: p.category().to_string(),
                sustain_score: p.sustain_score(),
                max_capacity_mw: p.max_capacity_mw(),
                cur_capacity_mw: p.cur_capacity_mw(),
                avail_capacity_mw: p.avail_capacity_mw(),
                uptime_percent: p.uptime_percent(),
                cost_per_mw: p.cost_per_mw(),
                conditions: p.describe_conditions(),
            })
            .collect();

        let lines = grid
            .lines()
            .iter()
            .map(|l| LineRow {
                line_id: l.line_id().to_string(),
                max_capacity_mw: l.max_capacity_mw(),
                avail_capacity_mw: l.avail_capacity_mw(),
                efficiency: l.efficiency(),
            })
            .collect();

        let mut totals = GridTotals::default();
        for row in &demands {
            totals.demand_requested_mw += row.required_mw;
            totals.demand_supplied_mw += row.supplied_mw;
            totals.revenue += row.sell_price;
            totals.cost += row.power_cost;
        }
        totals.plant_capacity_used_mw = grid.plants().iter().map(|p| p.used_capacity_mw()).sum();
        totals.percent_met = ratio(totals.demand_supplied_mw, totals.demand_requested_mw) * 100.0;
        totals.delivery_efficiency = ratio(totals.demand_supplied_mw, totals.plant_capacity_used_mw);
        totals.profit = totals.revenue - totals.cost;

        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            grid_name: grid.name().to_string(),
            demands,
            plants,
            lines,
            totals,
        }
    }

    pub fn count_with_status(&self, status: DemandStatus) -> usize {
        self.demands.iter().filter(|d| d.status == status).count()
    }
}
