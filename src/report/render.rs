use std::fmt;

use super::{DemandRow, GridSummary, LineRow, PlantRow};
use crate::config::ReportFormat;
use crate::dispatch::DispatchOutcome;
use crate::grid::PowerGrid;

/// Render the summary in the configured format
pub fn render(summary: &GridSummary, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(render_text(summary)),
        ReportFormat::Json => serde_json::to_string_pretty(summary),
    }
}

/// One line per committed transfer, in commit order
pub fn render_allocations(grid: &PowerGrid, outcome: &DispatchOutcome) -> String {
    AllocationLog { grid, outcome }.to_string()
}

pub fn render_text(summary: &GridSummary) -> String {
    TextReport(summary).to_string()
}

/// Plant, demand, and line tables labelled with `stage` ("Initial", "Final", ...)
pub fn render_snapshot(summary: &GridSummary, stage: &str) -> String {
    Snapshot { summary, stage }.to_string()
}

struct AllocationLog<'a> {
    grid: &'a PowerGrid,
    outcome: &'a DispatchOutcome,
}

impl fmt::Display for AllocationLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in &self.outcome.transfers {
            let demand = &self.grid.demands()[t.demand_idx];
            let plant = &self.grid.plants()[t.plant_idx];
            let line = &self.grid.lines()[t.line_idx];
            writeln!(
                f,
                "Allocating: {:>8.2} for {:<12} Using: {:>8.2} From {:<14} On {:<10} Sell: ${:>11.2} Cost: ${:>11.2}",
                t.delivered_mw,
                demand.location(),
                t.drawn_mw,
                plant.name(),
                line.line_id(),
                t.sell_price,
                t.cost,
            )?;
        }
        Ok(())
    }
}

struct TextReport<'a>(&'a GridSummary);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;

        writeln!(f, "\t\t\t\t{}", summary.grid_name)?;
        writeln!(f, "\t\t\t\t Grid Simulation Report")?;
        write_demands(f, &summary.demands)?;

        let t = &summary.totals;
        writeln!(f)?;
        writeln!(f, "Overall Grid Performance:")?;
        writeln!(f, "    Total Demand Request:  {:.2} MW", t.demand_requested_mw)?;
        writeln!(f, "    Total Demand supplied: {:.2} MW", t.demand_supplied_mw)?;
        writeln!(f, "    Percent of demand met: {:.2}%", t.percent_met)?;
        writeln!(f)?;
        writeln!(f, "    Plant Capacity used:   {:.2} MW", t.plant_capacity_used_mw)?;
        writeln!(f, "    Efficiency percentage: {:.4}", t.delivery_efficiency)?;
        writeln!(f)?;
        writeln!(f, "    Total Revenue (Price): {:.2}", t.revenue)?;
        writeln!(f, "    Total cost of Power:   {:.2}", t.cost)?;
        writeln!(f, "             Total Profit: {:.2}", t.profit)?;

        writeln!(f)?;
        write_plants(f, &summary.plants)?;
        writeln!(f)?;
        write_lines(f, &summary.lines)?;
        Ok(())
    }
}

struct Snapshot<'a> {
    summary: &'a GridSummary,
    stage: &'a str,
}

impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\t\t\t\t--- {} Plant Capacity Summary ---", self.stage)?;
        write_plants(f, &self.summary.plants)?;
        writeln!(f)?;
        writeln!(f, "\t--- {} Demand Summary ---", self.stage)?;
        write_demands(f, &self.summary.demands)?;
        writeln!(f)?;
        writeln!(f, "\t--- {} Transmission Line Summary ---", self.stage)?;
        write_lines(f, &self.summary.lines)
    }
}

fn write_demands(f: &mut fmt::Formatter<'_>, demands: &[DemandRow]) -> fmt::Result {
    writeln!(
        f,
        "Location     | Required(MW) | Supplied(MW) |     Status    |  Sell Price |  Power Cost |     Profit |"
    )?;
    writeln!(f, "{}", "-".repeat(102))?;
    for d in demands {
        writeln!(
            f,
            "{:<12} | {:>12.2} | {:>12.2} | {:<13} | {:>11.2} | {:>11.2} | {:>10.2} |",
            d.location,
            d.required_mw,
            d.supplied_mw,
            d.status.to_string(),
            d.sell_price,
            d.power_cost,
            d.profit,
        )?;
    }
    Ok(())
}

fn write_plants(f: &mut fmt::Formatter<'_>, plants: &[PlantRow]) -> fmt::Result {
    writeln!(
        f,
        "  Plant         Type       Sustain     Max Cap     Cur Cap   Avail Cap  %UpTime  Cost/MWh  Current Operating Conditions"
    )?;
    for p in plants {
        writeln!(
            f,
            "{:<14}{:<10}{:>8}{:>10.2}mw{:>10.2}mw{:>10.2}mw{:>9.2}{:>10.2}  {}",
            p.name,
            p.category,
            p.sustain_score,
            p.max_capacity_mw,
            p.cur_capacity_mw,
            p.avail_capacity_mw,
            p.uptime_percent,
            p.cost_per_mw,
            p.conditions,
        )?;
    }
    Ok(())
}

fn write_lines(f: &mut fmt::Formatter<'_>, lines: &[LineRow]) -> fmt::Result {
    writeln!(f, "    Line ID        Capacity       Avail  Efficiency")?;
    for l in lines {
        writeln!(
            f,
            "{:<18}{:>8.2}{:>12.2}{:>12.2}",
            l.line_id, l.max_capacity_mw, l.avail_capacity_mw, l.efficiency
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Demand, Plant, PlantKind, TransLine};

    fn distributed_grid() -> (PowerGrid, DispatchOutcome) {
        let mut grid = PowerGrid::new("Energy Grid");
        grid.add_plant(Plant::new("Coal Creek", 10, 200.0, 20.0, 100.0, PlantKind::Nuclear));
        grid.add_line(TransLine::new("L-1", 80.0, 0.9));
        grid.add_demand(Demand::new("Springfield", 100.0, 50.0));
        let outcome = grid.distribute_power().unwrap();
        (grid, outcome)
    }

    #[test]
    fn test_text_report_lists_demands_and_totals() {
        let (grid, _) = distributed_grid();
        let text = render_text(&GridSummary::from_grid(&grid));

        assert!(text.contains("Energy Grid"));
        assert!(text.contains("Springfield"));
        assert!(text.contains("Partially Met"));
        assert!(text.contains("Total Revenue (Price): 4000.00"));
        assert!(text.contains("All nuclear systems nominal"));
    }

    #[test]
    fn test_json_report_is_machine_readable() {
        let (grid, _) = distributed_grid();
        let json = render(&GridSummary::from_grid(&grid), ReportFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["grid_name"], "Energy Grid");
        assert_eq!(value["demands"][0]["status"], "PartiallyMet");
        assert_eq!(value["totals"]["revenue"], 4000.0);
    }

    #[test]
    fn test_allocation_log_has_one_line_per_transfer() {
        let (grid, outcome) = distributed_grid();
        let log = render_allocations(&grid, &outcome);

        assert_eq!(log.lines().count(), 1);
        assert!(log.contains("Springfield"));
        assert!(log.contains("Coal Creek"));
        assert!(log.contains("L-1"));
    }

    #[test]
    fn test_text_report_ends_with_line_table() {
        let (grid, _) = distributed_grid();
        let text = render_text(&GridSummary::from_grid(&grid));

        let last = text.lines().last().unwrap();
        assert!(last.starts_with("L-1"));
        assert!(last.ends_with("0.90"));
    }

    #[test]
    fn test_snapshot_shows_nameplate_before_refresh() {
        let mut grid = PowerGrid::new("Energy Grid");
        grid.add_plant(Plant::new("Diablo", 60, 200.0, 30.0, 50.0, PlantKind::Nuclear));
        grid.add_line(TransLine::new("L-1", 80.0, 0.9));
        grid.add_demand(Demand::new("Springfield", 100.0, 50.0));

        let initial = render_snapshot(&GridSummary::from_grid(&grid), "Initial");
        grid.adjust_plants_for_conditions();
        let current = render_snapshot(&GridSummary::from_grid(&grid), "Current");

        assert!(initial.contains("--- Initial Plant Capacity Summary ---"));
        assert!(initial.contains("--- Initial Demand Summary ---"));
        assert!(initial.contains("--- Initial Transmission Line Summary ---"));
        assert!(initial.contains("    200.00mw    200.00mw    200.00mw"));
        assert!(current.contains("    200.00mw    100.00mw    100.00mw"));
        assert!(current.contains("Not Met"));
    }
}
