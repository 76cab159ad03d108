//! # PAF Comparison Dashboard
//!
//! The main binary for the ensemble vs. submission PAF dashboard.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 apps/paf-dash (THE BINARY)               │
//! │                                                          │
//! │   ┌─────────────┐    ┌──────────────┐    ┌───────────┐   │
//! │   │    CLI      │    │   HTTP API   │    │  Browser  │   │
//! │   │   (clap)    │    │    (axum)    │◄───│ plotly.js │   │
//! │   └──────┬──────┘    └──────┬───────┘    └───────────┘   │
//! │          └─────────┬────────┘                            │
//! │                    ▼                                     │
//! │            ┌───────────────┐                             │
//! │            │   paf-core    │                             │
//! │            │  (THE DATA)   │                             │
//! │            └───────────────┘                             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the dashboard on 0.0.0.0:8050
//! paf-dash --data final_df_all_causes.csv serve
//!
//! # Inspect the dataset
//! paf-dash summary
//! paf-dash causes --risk "Diet low in fruits"
//! paf-dash figure --risk Smoking --cause "Lung cancer" --sex female -o female.json
//! ```

use clap::Parser;
use paf_dash::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // PAF_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("PAF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "paf_dash=info,paf_core=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  Ensemble vs. Submission PAF Comparison v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
