//! # Step Controller
//!
//! Drives the admission flow: runs entry guards, validates submissions,
//! writes the record and hands the next step to the navigator.
//!
//! The controller is the only writer of the persisted record. Every
//! transition finishes its storage write before the navigator is called,
//! and a failed write leaves the controller on the step it was on.

use super::step::{Step, resolve_entry};
use crate::fees::FeeSummary;
use crate::primitives::MSG_SUBMIT_REJECTED;
use crate::storage::{FormStore, SessionStore};
use crate::types::{AdmissionError, ApplicationRecord, BcaChoice, Campus, PersonalDetailsForm};
use crate::validation::{ValidationErrors, validate};
use serde::Serialize;

// =============================================================================
// COLLABORATORS
// =============================================================================

/// Transfers rendering to a step.
pub trait Navigator {
    fn navigate(&mut self, step: Step);
}

/// Surfaces a transient, fire-and-forget message to the applicant.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// A navigator that remembers every step it was sent to.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    pub visited: Vec<Step>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last step navigated to, if any.
    #[must_use]
    pub fn last(&self) -> Option<Step> {
        self.visited.last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, step: Step) {
        self.visited.push(step);
    }
}

/// A notifier that drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _message: &str) {}
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Result of a personal-details submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record was saved and the flow moved on.
    Advanced(Step),
    /// Validation failed; nothing was saved and the step is unchanged.
    Rejected(ValidationErrors),
}

/// What the details step shows: the committed record and its fees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsView {
    pub record: ApplicationRecord,
    pub fees: FeeSummary,
}

// =============================================================================
// STEP CONTROLLER
// =============================================================================

/// The admission state machine.
///
/// Holds the current step and the in-progress step-1 form; the committed
/// record lives in the injected store.
#[derive(Debug)]
pub struct StepController<S, N = RecordingNavigator, M = NullNotifier> {
    store: FormStore<S>,
    navigator: N,
    notifier: M,
    current: Step,
    draft: PersonalDetailsForm,
}

impl<S, N, M> StepController<S, N, M>
where
    S: SessionStore,
    N: Navigator,
    M: Notifier,
{
    /// Create a controller on the personal-details step with a blank form.
    pub fn new(store: S, navigator: N, notifier: M) -> Self {
        Self {
            store: FormStore::new(store),
            navigator,
            notifier,
            current: Step::PersonalDetails,
            draft: PersonalDetailsForm::default(),
        }
    }

    /// Create a controller positioned on the furthest step the persisted
    /// record supports, and navigate there.
    pub fn resume(store: S, navigator: N, notifier: M) -> Self {
        let mut controller = Self::new(store, navigator, notifier);
        let step = Step::furthest(&controller.store.load());
        tracing::debug!(%step, "resuming session");
        controller.go(step);
        controller
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The step currently shown.
    #[must_use]
    pub fn current(&self) -> Step {
        self.current
    }

    /// The step-1 form as last submitted, blank after a restart.
    #[must_use]
    pub fn draft(&self) -> &PersonalDetailsForm {
        &self.draft
    }

    /// The persisted record.
    pub fn record(&self) -> ApplicationRecord {
        self.store.load()
    }

    #[must_use]
    pub fn store(&self) -> &FormStore<S> {
        &self.store
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    #[must_use]
    pub fn notifier(&self) -> &M {
        &self.notifier
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Enter `requested`, subject to its entry guard.
    ///
    /// Returns the step actually entered.
    pub fn enter(&mut self, requested: Step) -> Step {
        let step = resolve_entry(requested, &self.store.load());
        if step != requested {
            tracing::debug!(%requested, resolved = %step, "entry guard redirected");
        }
        self.go(step);
        step
    }

    /// Submit the personal-details form.
    ///
    /// On validation errors the applicant is notified, the form is kept as
    /// typed and nothing is saved. Otherwise the form is merged into the
    /// record and the flow moves to campus selection, or to the submitted
    /// confirmation when BCA was declined.
    pub fn submit_personal_details(
        &mut self,
        form: PersonalDetailsForm,
    ) -> Result<SubmitOutcome, AdmissionError> {
        self.require(Step::PersonalDetails, "submit personal details")?;

        let errors = validate(&form);
        if !errors.is_empty() {
            tracing::info!(fields = errors.len(), "personal details rejected");
            self.notifier.notify(MSG_SUBMIT_REJECTED);
            self.draft = form;
            return Ok(SubmitOutcome::Rejected(errors));
        }

        let record = self.store.save(&form.to_record()?)?;
        self.draft = form;

        let next = match record.choose_bca {
            Some(BcaChoice::No) => Step::Submitted,
            _ => Step::CampusSelection,
        };
        tracing::info!(%next, "personal details accepted");
        self.go(next);
        Ok(SubmitOutcome::Advanced(next))
    }

    /// Leave the submitted confirmation and start a fresh application.
    pub fn restart(&mut self) -> Result<Step, AdmissionError> {
        self.require(Step::Submitted, "restart")?;
        self.reset()
    }

    /// Select a campus and move to the details step.
    pub fn select_campus(&mut self, campus: Campus) -> Result<Step, AdmissionError> {
        self.require(Step::CampusSelection, "select a campus")?;

        self.store.save(&ApplicationRecord::with_campus(campus))?;
        tracing::info!(%campus, "campus selected");
        self.go(Step::DetailsAndFees);
        Ok(Step::DetailsAndFees)
    }

    /// Discard the application from the details step.
    pub fn start_over(&mut self) -> Result<Step, AdmissionError> {
        self.require(Step::DetailsAndFees, "start over")?;
        self.reset()
    }

    /// Return from the details step to campus selection without changes.
    pub fn back(&mut self) -> Result<Step, AdmissionError> {
        self.require(Step::DetailsAndFees, "go back")?;
        self.go(Step::CampusSelection);
        Ok(Step::CampusSelection)
    }

    /// The details view, available only while on the details step.
    pub fn details(&self) -> Option<DetailsView> {
        if self.current != Step::DetailsAndFees {
            return None;
        }
        let record = self.store.load();
        let campus = record.campus?;
        Some(DetailsView {
            fees: FeeSummary::for_campus(campus),
            record,
        })
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn require(&self, step: Step, action: &'static str) -> Result<(), AdmissionError> {
        if self.current == step {
            Ok(())
        } else {
            Err(AdmissionError::InvalidTransition {
                from: self.current,
                action,
            })
        }
    }

    fn reset(&mut self) -> Result<Step, AdmissionError> {
        self.store.clear()?;
        self.draft = PersonalDetailsForm::default();
        tracing::info!("application cleared");
        self.go(Step::PersonalDetails);
        Ok(Step::PersonalDetails)
    }

    fn go(&mut self, step: Step) {
        self.current = step;
        self.navigator.navigate(step);
    }
}

// =============================================================================
// TESTS
// =============================================================================
