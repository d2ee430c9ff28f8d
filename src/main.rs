use anyhow::Result;
use grid_dispatch::{config, loader, report, telemetry, GridError};
use config::Config;
use report::GridSummary;
use telemetry::init_tracing;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;

    let mut grid = match loader::load_grid(&cfg.grid.name, &cfg.files).await {
        Ok(grid) => grid,
        Err(e) => {
            error!(error = %e, "failed to load initial grid");
            return Err(GridError::from(e).into());
        }
    };

    grid.finalize_order();
    let text_mode = cfg.report.format == config::ReportFormat::Text;
    let initial = text_mode.then(|| report::render_snapshot(&GridSummary::from_grid(&grid), "Initial"));

    grid.adjust_plants_for_conditions();

    let outcome = grid.distribute_power().map_err(|e| {
        error!(error = %e, "distribution aborted");
        GridError::from(e)
    })?;

    let summary = GridSummary::from_grid(&grid);
    let mut rendered = report::render(&summary, cfg.report.format)?;
    if let Some(initial) = initial {
        rendered = format!(
            "{initial}\n{}\n{rendered}\n{}",
            report::render_allocations(&grid, &outcome),
            report::render_snapshot(&summary, "Final"),
        );
    }

    print!("{rendered}");

    if let Some(path) = &cfg.report.output {
        tokio::fs::write(path, &rendered).await?;
        info!(path = %path.display(), "report written");
    }

    info!(run_id = %summary.run_id, "grid run complete");
    Ok(())
}
