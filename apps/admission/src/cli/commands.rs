//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Each command builds a step controller over the configured store, enters
//! the step the command belongs to (guards apply exactly as for a fresh page
//! visit) and performs one action.

use super::FormArgs;
use super::terminal::{TerminalNavigator, TerminalNotifier, format_rupees};
use crate::config::Settings;
use admission_core::{
    AdmissionError, ApplicationRecord, Campus, DetailsView, Field, FieldSource, FeeSummary,
    PersonalDetailsForm, SessionStore, Step, StepController, SubmitOutcome, ValidationErrors,
};
use std::path::Path;

/// Controller type used by every command.
pub type Controller = StepController<Box<dyn SessionStore>, TerminalNavigator, TerminalNotifier>;

/// Maximum size of a form file passed to `apply --from-file` (64 KB).
const MAX_FORM_FILE_SIZE: u64 = 64 * 1024;

// =============================================================================
// HELPERS
// =============================================================================

/// A controller on step 1, as on first load of the form.
pub fn open_controller(settings: &Settings, quiet: bool) -> Result<Controller, AdmissionError> {
    Ok(StepController::new(
        settings.open_store()?,
        TerminalNavigator,
        TerminalNotifier { quiet },
    ))
}

/// A controller positioned where the saved session left off.
pub fn resume_controller(settings: &Settings, quiet: bool) -> Result<Controller, AdmissionError> {
    Ok(StepController::resume(
        settings.open_store()?,
        TerminalNavigator,
        TerminalNotifier { quiet },
    ))
}

fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

fn step_json(step: Step) -> serde_json::Value {
    serde_json::json!({
        "step": step,
        "number": step.number(),
        "name": step.name(),
        "route": step.route(),
    })
}

/// Report a guard redirect in text mode.
fn print_redirect(requested: Step, landed: Step) {
    println!("{} is not available yet.", requested.name());
    println!("Now on {}. Submit your personal details first.", landed);
}

fn print_record(record: &ApplicationRecord) {
    for field in Field::ALL {
        if let Some(value) = record.field(field).filter(|v| !v.is_empty()) {
            println!("  {:<15} {}", format!("{}:", field.label()), value);
        }
    }
}

fn print_fee_table(fees: &FeeSummary) {
    println!("Fee Structure ({} campus)", fees.campus);
    println!("------------------------------------------------------");
    println!(
        "{:>8}  {:>15}  {:>14}  {:>10}",
        "Semester", "Tuition Fee (₹)", "Other Fees (₹)", "Total (₹)"
    );
    for entry in &fees.schedule {
        println!(
            "{:>8}  {:>15}  {:>14}  {:>10}",
            entry.semester,
            format_rupees(entry.tuition_fee),
            format_rupees(entry.other_fees),
            format_rupees(entry.total)
        );
    }
    println!();
    println!("* Other fees include library, laboratory, examination, and student welfare fees.");
    println!(
        "* One-time admission fee of ₹{} is payable at the time of admission (not included in the above table).",
        format_rupees(fees.admission_fee)
    );
    println!(
        "* Programme total across all semesters: ₹{}",
        format_rupees(fees.programme_total())
    );
}

fn print_errors(errors: &ValidationErrors) {
    println!("Your application was not saved:");
    for (field, message) in errors.iter() {
        println!("  {:<15} {}", format!("{}:", field.label()), message);
    }
}

fn read_form_file(path: &Path) -> Result<PersonalDetailsForm, AdmissionError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        AdmissionError::Storage(format!("Cannot read form file '{}': {}", path.display(), e))
    })?;
    if metadata.len() > MAX_FORM_FILE_SIZE {
        return Err(AdmissionError::Storage(format!(
            "Form file size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_FORM_FILE_SIZE
        )));
    }

    let data = std::fs::read(path)
        .map_err(|e| AdmissionError::Storage(format!("Read form file: {}", e)))?;
    serde_json::from_slice(&data)
        .map_err(|e| AdmissionError::Serialization(format!("Parse form file: {}", e)))
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show the step the saved session resumes on.
pub fn cmd_status(settings: &Settings, json_mode: bool) -> Result<(), AdmissionError> {
    let controller = resume_controller(settings, json_mode)?;
    let step = controller.current();
    let record = controller.record();

    if json_mode {
        let mut output = step_json(step);
        output["backend"] = settings.backend.as_str().into();
        output["store"] = settings.store.to_string_lossy().into_owned().into();
        output["applicant"] = record.display_name().into();
        print_json(&output);
        return Ok(());
    }

    println!("Admission Status");
    println!("================");
    println!("Store:   {:?}", settings.store);
    println!("Backend: {}", settings.backend.as_str());
    println!();
    println!("Current: {}", step);
    if !record.is_empty() {
        println!("Applicant: {}", record.display_name());
    }

    match step {
        Step::PersonalDetails => println!("Next: admission apply --full-name ... --choose-bca yes"),
        Step::Submitted => {
            println!("Your application has been submitted successfully.");
            println!("Next: admission restart");
        }
        Step::CampusSelection => println!("Next: admission campus <Siliguri|Kolkata>"),
        Step::DetailsAndFees => println!("Next: admission details"),
    }

    Ok(())
}

// =============================================================================
// APPLY COMMAND
// =============================================================================

/// Submit the personal-details form.
pub fn cmd_apply(
    settings: &Settings,
    json_mode: bool,
    from_file: Option<&Path>,
    args: FormArgs,
) -> Result<(), AdmissionError> {
    let base = match from_file {
        Some(path) => read_form_file(path)?,
        None => PersonalDetailsForm::default(),
    };
    let form = args.apply_to(base);

    let mut controller = open_controller(settings, json_mode)?;
    let outcome = controller.submit_personal_details(form)?;

    if json_mode {
        let output = match &outcome {
            SubmitOutcome::Advanced(step) => serde_json::json!({
                "accepted": true,
                "next": step_json(*step),
            }),
            SubmitOutcome::Rejected(errors) => serde_json::json!({
                "accepted": false,
                "errors": errors,
            }),
        };
        print_json(&output);
        return Ok(());
    }

    match outcome {
        SubmitOutcome::Rejected(errors) => print_errors(&errors),
        SubmitOutcome::Advanced(Step::Submitted) => {
            println!("Thank you!");
            println!(
                "Your application has been submitted successfully. We appreciate your interest in our college."
            );
            println!("Run `admission restart` to submit another application.");
        }
        SubmitOutcome::Advanced(step) => {
            println!("Saved. Now on {}.", step);
            println!("Choose your campus: admission campus <Siliguri|Kolkata>");
        }
    }

    Ok(())
}

// =============================================================================
// CAMPUS COMMAND
// =============================================================================

/// Select a campus.
pub fn cmd_campus(settings: &Settings, json_mode: bool, campus: &str) -> Result<(), AdmissionError> {
    let campus: Campus = campus.parse()?;
    let mut controller = open_controller(settings, json_mode)?;

    let landed = controller.enter(Step::CampusSelection);
    if landed != Step::CampusSelection {
        if json_mode {
            print_json(&serde_json::json!({ "selected": false, "current": step_json(landed) }));
        } else {
            print_redirect(Step::CampusSelection, landed);
        }
        return Ok(());
    }

    let step = controller.select_campus(campus)?;

    if json_mode {
        print_json(&serde_json::json!({
            "selected": true,
            "campus": campus,
            "current": step_json(step),
        }));
        return Ok(());
    }

    println!("{} campus selected. Now on {}.", campus, step);
    println!("Review your details and fees: admission details");
    Ok(())
}

// =============================================================================
// DETAILS COMMAND
// =============================================================================

/// Show the applicant summary and fee structure.
pub fn cmd_details(settings: &Settings, json_mode: bool) -> Result<(), AdmissionError> {
    let mut controller = open_controller(settings, json_mode)?;
    let landed = controller.enter(Step::DetailsAndFees);

    let view: Option<DetailsView> = controller.details();
    let Some(view) = view else {
        if json_mode {
            print_json(&serde_json::json!({ "current": step_json(landed) }));
        } else {
            print_redirect(Step::DetailsAndFees, landed);
        }
        return Ok(());
    };

    if json_mode {
        let programme_total = view.fees.programme_total();
        print_json(&serde_json::json!({
            "current": step_json(landed),
            "details": view,
            "programmeTotal": programme_total,
        }));
        return Ok(());
    }

    println!("Application Details");
    println!("===================");
    print_record(&view.record);
    println!();
    print_fee_table(&view.fees);
    println!();
    println!("Change campus: admission back | Start over: admission restart");
    Ok(())
}

// =============================================================================
// BACK COMMAND
// =============================================================================

/// Return from the details to campus selection.
pub fn cmd_back(settings: &Settings, json_mode: bool) -> Result<(), AdmissionError> {
    let mut controller = open_controller(settings, json_mode)?;
    let landed = controller.enter(Step::DetailsAndFees);

    let step = if landed == Step::DetailsAndFees {
        controller.back()?
    } else {
        landed
    };

    if json_mode {
        print_json(&serde_json::json!({ "current": step_json(step) }));
    } else {
        println!("Now on {}.", step);
    }
    Ok(())
}

// =============================================================================
// RESTART COMMAND
// =============================================================================

/// Discard the application.
///
/// Available from the submitted confirmation and from the details step,
/// the two places the form offers it.
pub fn cmd_restart(settings: &Settings, json_mode: bool) -> Result<(), AdmissionError> {
    let mut controller = resume_controller(settings, json_mode)?;

    let step = match controller.current() {
        Step::Submitted => controller.restart()?,
        Step::DetailsAndFees => controller.start_over()?,
        from => {
            return Err(AdmissionError::InvalidTransition {
                from,
                action: "restart",
            });
        }
    };

    if json_mode {
        print_json(&serde_json::json!({ "cleared": true, "current": step_json(step) }));
    } else {
        println!("Application cleared. Now on {}.", step);
    }
    Ok(())
}

// =============================================================================
// FEES COMMAND
// =============================================================================

/// Print a fee schedule without touching any session.
pub fn cmd_fees(json_mode: bool, campus: &str) -> Result<(), AdmissionError> {
    let fees = FeeSummary::for_campus(campus.parse()?);

    if json_mode {
        let programme_total = fees.programme_total();
        print_json(&serde_json::json!({
            "fees": &fees,
            "programmeTotal": programme_total,
        }));
        return Ok(());
    }

    print_fee_table(&fees);
    Ok(())
}

// =============================================================================
// SHOW COMMAND
// =============================================================================

/// Print the saved record as JSON.
pub fn cmd_show(settings: &Settings) -> Result<(), AdmissionError> {
    let store = admission_core::FormStore::new(settings.open_store()?);
    let record = store.load();
    let value = serde_json::to_value(&record)
        .map_err(|e| AdmissionError::Serialization(e.to_string()))?;
    print_json(&value);
    Ok(())
}
