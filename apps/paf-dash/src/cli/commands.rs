//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, AppState};
use crate::config::{Config, DefaultsConfig};
use paf_core::{Dataset, PafError, Selection, Sex, build_figure};
use std::path::Path;

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(dataset: Dataset, config: &Config) -> Result<(), PafError> {
    let summary = dataset.summary();

    println!("PAF Comparison Dashboard Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", config.server.host);
    println!("  Port:     {}", config.server.port);
    println!("  Dataset:  {}", config.data.path.display());
    println!("  Rows:     {}", summary.rows);
    println!();
    println!("Endpoints:");
    println!("  GET /            - Dashboard");
    println!("  GET /api/risks   - Risk options");
    println!("  GET /api/causes  - Outcome options for a risk");
    println!("  GET /api/figure  - Scatter figure for one panel");
    println!("  GET /status      - Dataset summary");
    println!("  GET /health      - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let state = AppState::new(dataset, config.defaults.clone());
    api::run_server(&config.server.addr(), state).await
}

// =============================================================================
// SUMMARY COMMAND
// =============================================================================

/// Show dataset summary.
pub fn cmd_summary(dataset: &Dataset, json_mode: bool) -> Result<(), PafError> {
    let summary = dataset.summary();
    let source = dataset
        .source()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    if json_mode {
        let output = serde_json::json!({
            "source": source,
            "rows": summary.rows,
            "risks": summary.risks,
            "causes": summary.causes,
            "super_regions": summary.super_regions,
            "locations": summary.locations,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("PAF Dataset Summary");
    println!("===================");
    println!("Source: {}", source);
    println!();
    println!("Rows:          {}", summary.rows);
    println!("Risks:         {}", summary.risks);
    println!("Outcomes:      {}", summary.causes);
    println!("Super-regions: {}", summary.super_regions);
    println!("Locations:     {}", summary.locations);

    Ok(())
}

// =============================================================================
// OPTION COMMANDS
// =============================================================================

/// List risk options, marking the initial selection.
pub fn cmd_risks(
    dataset: &Dataset,
    defaults: &DefaultsConfig,
    json_mode: bool,
) -> Result<(), PafError> {
    let risks = dataset.risks();
    let initial = dataset.resolve_defaults(&defaults.risk, &defaults.cause);

    if json_mode {
        let output = serde_json::json!({
            "risks": risks,
            "default_risk": initial.risk,
            "default_cause": initial.cause,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    for risk in &risks {
        let marker = if *risk == initial.risk { '*' } else { ' ' };
        println!("{} {}", marker, risk);
    }
    Ok(())
}

/// List outcome options for a risk.
pub fn cmd_causes(dataset: &Dataset, risk: &str, json_mode: bool) -> Result<(), PafError> {
    let causes = dataset.causes_for_risk(risk);

    if json_mode {
        let output = serde_json::json!({ "risk": risk, "causes": causes });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    if causes.is_empty() {
        println!("No outcomes for risk '{}'", risk);
        return Ok(());
    }
    for cause in &causes {
        println!("{}", cause);
    }
    Ok(())
}

// =============================================================================
// FIGURE COMMAND
// =============================================================================

/// Write the figure JSON for one panel to a file or stdout.
pub fn cmd_figure(
    dataset: &Dataset,
    defaults: &DefaultsConfig,
    risk: &str,
    cause: &str,
    sex: Sex,
    output: Option<&Path>,
) -> Result<(), PafError> {
    let figure = build_figure(
        dataset,
        &Selection::new(risk, cause),
        sex,
        &defaults.age_label,
    );
    let json = serde_json::to_string_pretty(&figure)
        .map_err(|e| PafError::Io(format!("Serialize figure: {}", e)))?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .map_err(|e| PafError::Io(format!("Write '{}': {}", path.display(), e)))?;
            tracing::info!(
                "Wrote {} figure with {} traces to {}",
                sex.slug(),
                figure.data.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
