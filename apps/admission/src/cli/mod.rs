//! # Admission CLI Module
//!
//! This module implements the CLI interface for the admission form.
//!
//! ## Available Commands
//!
//! - `status` - Show the step the saved session resumes on
//! - `apply` - Submit the personal-details form (step 1)
//! - `campus` - Select a campus (step 2)
//! - `details` - Show the applicant summary and fee structure (step 3)
//! - `back` - Return from the details to campus selection
//! - `restart` - Discard the application and start over
//! - `fees` - Print a campus fee schedule without a session
//! - `show` - Print the saved record as JSON

mod commands;
mod terminal;

use crate::config::{Backend, FileConfig, Settings};
use admission_core::{AdmissionError, PersonalDetailsForm};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;
pub use terminal::{TerminalNavigator, TerminalNotifier, format_rupees};

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// BCA admission form
///
/// Fill in personal details, pick a campus and review the fee structure.
/// Progress is kept in a session store between commands.
#[derive(Parser, Debug)]
#[command(name = "admission")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the session store
    #[arg(short = 'S', long, global = true)]
    pub store: Option<PathBuf>,

    /// Session store backend
    #[arg(short = 'B', long, global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Config file (defaults to ./admission.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current step of the saved session
    Status,

    /// Submit personal details (step 1)
    Apply {
        /// Read the form from a JSON file; flags override its values
        #[arg(short, long)]
        from_file: Option<PathBuf>,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Select a campus (step 2)
    Campus {
        /// Siliguri or Kolkata
        campus: String,
    },

    /// Show applicant details and fee structure (step 3)
    Details,

    /// Go back from the details to campus selection
    Back,

    /// Discard the application and return to step 1
    Restart,

    /// Print the fee schedule of a campus
    Fees {
        /// Siliguri or Kolkata
        campus: String,
    },

    /// Print the saved record
    Show,
}

/// Personal-details inputs. Unset flags are submitted blank.
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub middle_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    /// male, female or other
    #[arg(long)]
    pub gender: Option<String>,
    /// Date of birth
    #[arg(long)]
    pub dob: Option<String>,
    /// Place of birth
    #[arg(long)]
    pub pob: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub father_name: Option<String>,
    #[arg(long)]
    pub mother_name: Option<String>,
    /// yes or no
    #[arg(long = "choose-bca")]
    pub choose_bca: Option<String>,
}

impl FormArgs {
    /// Overlay the given flags on `base`.
    #[must_use]
    pub fn apply_to(self, mut base: PersonalDetailsForm) -> PersonalDetailsForm {
        let overlay = [
            (self.full_name, &mut base.full_name),
            (self.middle_name, &mut base.middle_name),
            (self.last_name, &mut base.last_name),
            (self.gender, &mut base.gender),
            (self.dob, &mut base.dob),
            (self.pob, &mut base.pob),
            (self.address, &mut base.address),
            (self.phone, &mut base.phone),
            (self.email, &mut base.email),
            (self.father_name, &mut base.father_name),
            (self.mother_name, &mut base.mother_name),
            (self.choose_bca, &mut base.choose_bca),
        ];
        for (flag, slot) in overlay {
            if let Some(value) = flag {
                *slot = value;
            }
        }
        base
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), AdmissionError> {
    let file = FileConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(cli.backend, cli.store, file);
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Status) | None => cmd_status(&settings, json_mode),
        Some(Commands::Apply { from_file, form }) => {
            cmd_apply(&settings, json_mode, from_file.as_deref(), form)
        }
        Some(Commands::Campus { campus }) => cmd_campus(&settings, json_mode, &campus),
        Some(Commands::Details) => cmd_details(&settings, json_mode),
        Some(Commands::Back) => cmd_back(&settings, json_mode),
        Some(Commands::Restart) => cmd_restart(&settings, json_mode),
        Some(Commands::Fees { campus }) => cmd_fees(json_mode, &campus),
        Some(Commands::Show) => cmd_show(&settings),
    }
}
