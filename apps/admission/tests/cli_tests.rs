//! Tests for CLI parsing, configuration and command execution.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use admission::cli::{
    Cli, Commands, FormArgs, cmd_apply, cmd_back, cmd_campus, cmd_details, cmd_fees,
    cmd_restart, cmd_status, execute,
};
use admission::config::{Backend, FileConfig, Settings};
use admission_core::{
    AdmissionError, BcaChoice, Campus, FileStore, FormStore, PersonalDetailsForm, RedbStore,
};
use clap::Parser;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn file_settings(dir: &TempDir) -> Settings {
    Settings {
        backend: Backend::File,
        store: dir.path().join("session.json"),
    }
}

fn load(settings: &Settings) -> admission_core::ApplicationRecord {
    FormStore::new(FileStore::new(&settings.store)).load()
}

fn full_args(choose_bca: &str) -> FormArgs {
    FormArgs {
        full_name: Some("Anil".into()),
        middle_name: Some("Chandra".into()),
        last_name: Some("Bose".into()),
        gender: Some("male".into()),
        dob: Some("2005-02-14".into()),
        pob: Some("Malda".into()),
        address: Some("College Street".into()),
        phone: Some("98300 12345".into()),
        email: Some("anil.bose@example.com".into()),
        father_name: Some("Tapan Bose".into()),
        mother_name: Some("Kalyani Bose".into()),
        choose_bca: Some(choose_bca.into()),
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[test]
fn test_parse_apply_flags() {
    let cli = Cli::try_parse_from([
        "admission",
        "--backend",
        "file",
        "--store",
        "s.json",
        "apply",
        "--full-name",
        "Anil",
        "--choose-bca",
        "yes",
    ])
    .unwrap();

    assert_eq!(cli.backend, Some(Backend::File));
    match cli.command {
        Some(Commands::Apply { form, from_file }) => {
            assert_eq!(form.full_name.as_deref(), Some("Anil"));
            assert_eq!(form.choose_bca.as_deref(), Some("yes"));
            assert!(from_file.is_none());
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_parse_rejects_unknown_backend() {
    assert!(Cli::try_parse_from(["admission", "--backend", "s3", "status"]).is_err());
}

#[test]
fn test_form_args_overlay() {
    let base = PersonalDetailsForm {
        full_name: "From File".into(),
        email: "file@example.com".into(),
        ..PersonalDetailsForm::default()
    };
    let args = FormArgs {
        full_name: Some("From Flag".into()),
        ..FormArgs::default()
    };

    let form = args.apply_to(base);
    assert_eq!(form.full_name, "From Flag");
    assert_eq!(form.email, "file@example.com");
}

#[test]
fn test_config_file_selects_backend() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("admission.toml");
    std::fs::write(&path, "backend = \"memory\"\nstore = \"x.db\"\n").unwrap();

    let file = FileConfig::load(Some(&path)).unwrap();
    let settings = Settings::resolve(None, None, file);

    assert_eq!(settings.backend, Backend::Memory);
    assert_eq!(settings.store, Path::new("x.db"));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = tempdir().unwrap();
    let result = FileConfig::load(Some(&dir.path().join("nope.toml")));
    assert!(matches!(result, Err(AdmissionError::Config(_))));
}

// =============================================================================
// COMMANDS
// =============================================================================

#[test]
fn test_apply_campus_details_restart() {
    let dir = tempdir().unwrap();
    let settings = file_settings(&dir);

    cmd_apply(&settings, false, None, full_args("yes")).unwrap();
    assert_eq!(load(&settings).full_name.as_deref(), Some("Anil"));

    cmd_campus(&settings, false, "kolkata").unwrap();
    assert_eq!(load(&settings).campus, Some(Campus::Kolkata));

    cmd_details(&settings, true).unwrap();
    cmd_back(&settings, false).unwrap();
    assert_eq!(load(&settings).campus, Some(Campus::Kolkata));

    cmd_restart(&settings, false).unwrap();
    assert!(load(&settings).is_empty());
}

#[test]
fn test_invalid_apply_saves_nothing() {
    let dir = tempdir().unwrap();
    let settings = file_settings(&dir);

    let mut args = full_args("yes");
    args.email = Some("not-an-email".into());
    cmd_apply(&settings, true, None, args).unwrap();

    assert!(load(&settings).is_empty());
}

#[test]
fn test_apply_from_file() {
    let dir = tempdir().unwrap();
    let settings = file_settings(&dir);
    let form_path = dir.path().join("form.json");
    std::fs::write(
        &form_path,
        r#"{
            "fullName": "Mou", "middleName": "D", "lastName": "Saha",
            "gender": "female", "dob": "2006-06-06", "pob": "Siliguri",
            "address": "Pradhan Nagar", "phone": "9123456780",
            "email": "mou@saha.in", "fatherName": "Dev Saha",
            "motherName": "Lila Saha", "chooseBCA": "no"
        }"#,
    )
    .unwrap();

    cmd_apply(&settings, false, Some(&form_path), FormArgs::default()).unwrap();

    let record = load(&settings);
    assert_eq!(record.full_name.as_deref(), Some("Mou"));
    assert_eq!(record.choose_bca, Some(BcaChoice::No));

    // Declined applications restart from the confirmation
    cmd_restart(&settings, true).unwrap();
    assert!(load(&settings).is_empty());
}

#[test]
fn test_campus_without_details_is_redirected() {
    let dir = tempdir().unwrap();
    let settings = file_settings(&dir);

    cmd_campus(&settings, false, "Siliguri").unwrap();
    assert!(load(&settings).is_empty());
}

#[test]
fn test_unknown_campus_is_rejected() {
    let dir = tempdir().unwrap();
    let settings = file_settings(&dir);

    cmd_apply(&settings, true, None, full_args("yes")).unwrap();
    let result = cmd_campus(&settings, true, "Durgapur");

    assert!(matches!(result, Err(AdmissionError::UnknownCampus(_))));
    assert_eq!(load(&settings).campus, None);
    assert!(matches!(
        cmd_fees(true, "Durgapur"),
        Err(AdmissionError::UnknownCampus(_))
    ));
}

#[test]
fn test_restart_on_step_one_is_invalid() {
    let dir = tempdir().unwrap();
    let settings = file_settings(&dir);

    assert!(matches!(
        cmd_restart(&settings, true),
        Err(AdmissionError::InvalidTransition { .. })
    ));
}

#[test]
fn test_status_and_fees_run() {
    let dir = tempdir().unwrap();
    let settings = file_settings(&dir);

    cmd_status(&settings, false).unwrap();
    cmd_status(&settings, true).unwrap();
    cmd_fees(false, "Siliguri").unwrap();
}

#[test]
fn test_redb_backend_via_execute() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("session.redb");
    let store_arg = store.to_str().unwrap();

    let cli = Cli::try_parse_from([
        "admission",
        "--quiet",
        "--backend",
        "redb",
        "--store",
        store_arg,
        "--config",
        dir.path().join("missing.toml").to_str().unwrap(),
        "status",
    ])
    .unwrap();
    // An explicit config path must exist
    assert!(matches!(execute(cli), Err(AdmissionError::Config(_))));

    let config = dir.path().join("admission.toml");
    std::fs::write(&config, "").unwrap();
    let cli = Cli::try_parse_from([
        "admission",
        "--quiet",
        "--backend",
        "redb",
        "--store",
        store_arg,
        "--config",
        config.to_str().unwrap(),
        "campus",
        "Kolkata",
    ])
    .unwrap();
    execute(cli).unwrap();

    // Guard redirected: nothing was saved
    let record = FormStore::new(RedbStore::open(&store).unwrap()).load();
    assert!(record.is_empty());
}
