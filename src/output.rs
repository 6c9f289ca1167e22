// src/output.rs - Text renderings of a finished trajectory for the demo driver
use clap::ValueEnum;
use smoothpath_shared::FinalTrajectory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One point per line, tab separated.
    #[default]
    Table,
    /// Legacy layout: a count row followed by the points.
    Rows,
    /// The whole trajectory, plan and stage reports as JSON.
    Json,
}

fn join_row(row: &[f64]) -> String {
    row.iter()
        .map(|v| format!("{:.6}", v))
        .collect::<Vec<_>>()
        .join("\t")
}

pub fn render(trajectory: &FinalTrajectory, format: OutputFormat) -> Result<String, serde_json::Error> {
    let text = match format {
        OutputFormat::Table => trajectory
            .path
            .points()
            .iter()
            .map(|p| join_row(p.coords()))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Rows => trajectory
            .to_rows()
            .iter()
            .map(|row| join_row(row))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(trajectory)?,
    };
    Ok(text)
}
