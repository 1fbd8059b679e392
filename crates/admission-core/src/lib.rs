//! # admission-core
//!
//! The admission form logic - THE LOGIC.
//!
//! This crate implements the multi-step BCA admission flow as a small,
//! deterministic state machine:
//!
//! 1. **Personal details** - the applicant fills the form; it is validated
//!    and merged into the session record.
//! 2. **Campus selection** - the applicant picks Siliguri or Kolkata.
//! 3. **Details and fees** - the record is summarised next to a derived
//!    per-semester fee schedule.
//!
//! Declining BCA on step 1 ends the flow on a confirmation state.
//!
//! ## Architectural Constraints
//!
//! - The record lives in an injected [`SessionStore`]; nothing reaches for
//!   an ambient singleton.
//! - Entry guards are pure functions ([`resolve_entry`]) separated from any
//!   view concern.
//! - Fee derivation never touches storage.
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod fees;
pub mod flow;
pub mod primitives;
pub mod storage;
pub mod types;
pub mod validation;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AdmissionError, ApplicationRecord, BcaChoice, Campus, Field, FieldSource, Gender,
    PersonalDetailsForm,
};

// =============================================================================
// RE-EXPORTS: Logic
// =============================================================================

pub use fees::{FeeScheduleEntry, FeeSummary, admission_fee, compute_fee_schedule};
pub use flow::{
    DetailsView, Navigator, NullNotifier, Notifier, RecordingNavigator, Step, StepController,
    SubmitOutcome, resolve_entry,
};
pub use storage::{FileStore, FormStore, MemoryStore, RedbStore, SessionStore};
pub use validation::{ValidationErrors, is_valid_email, is_valid_phone, normalize_phone, validate};
