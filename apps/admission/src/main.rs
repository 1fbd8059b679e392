//! # Admission - BCA Admission Form
//!
//! The main binary for the multi-step admission form.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 apps/admission (THE BINARY)          │
//! │                                                      │
//! │   ┌─────────────┐            ┌──────────────────┐    │
//! │   │    CLI      │            │  Session store   │    │
//! │   │   (clap)    │            │ (file/redb/mem)  │    │
//! │   └──────┬──────┘            └────────┬─────────┘    │
//! │          └───────────────┬────────────┘              │
//! │                          ▼                           │
//! │                 ┌─────────────────┐                  │
//! │                 │ admission-core  │                  │
//! │                 │   (THE LOGIC)   │                  │
//! │                 └─────────────────┘                  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! admission apply --full-name Asha --middle-name K --last-name Roy \
//!     --gender female --dob 2006-04-12 --pob Siliguri --address "Hill Cart Road" \
//!     --phone "98765 43210" --email asha@example.in \
//!     --father-name "Bimal Roy" --mother-name "Rita Roy" --choose-bca yes
//! admission campus Siliguri
//! admission details
//! admission restart
//! ```

use admission::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing: ADMISSION_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("ADMISSION_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "admission=debug,admission_core=debug"
    } else {
        "admission=info,admission_core=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  BCA Admission Form v{}
  Personal Details • Campus • Fees
"#,
        env!("CARGO_PKG_VERSION")
    );
}
