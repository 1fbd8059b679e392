//! # Steps and Entry Guards
//!
//! | Step | Route | Requires |
//! |------|-------|----------|
//! | PersonalDetails | `/` | nothing |
//! | Submitted | `/` | `fullName`, `chooseBCA` = `no` |
//! | CampusSelection | `/location` | `fullName` |
//! | DetailsAndFees | `/details` | `fullName`, `campus` |

use crate::primitives::{ROUTE_CAMPUS_SELECTION, ROUTE_DETAILS, ROUTE_PERSONAL_DETAILS};
use crate::types::{ApplicationRecord, BcaChoice, Field, FieldSource};
use serde::{Deserialize, Serialize};

// =============================================================================
// STEP ENUM
// =============================================================================

/// One screen of the admission flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Step 1: the personal-details form. Universal fallback.
    PersonalDetails,
    /// Step 1 after declining BCA: confirmation, end of the flow.
    Submitted,
    /// Step 2: campus selection.
    CampusSelection,
    /// Step 3: applicant summary and fee structure.
    DetailsAndFees,
}

impl Step {
    /// Get the step name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Step::PersonalDetails => "Personal Details",
            Step::Submitted => "Application Submitted",
            Step::CampusSelection => "Campus Selection",
            Step::DetailsAndFees => "Details and Fees",
        }
    }

    /// The position of the step in the flow (1-3).
    #[must_use]
    pub fn number(&self) -> u8 {
        match self {
            Step::PersonalDetails | Step::Submitted => 1,
            Step::CampusSelection => 2,
            Step::DetailsAndFees => 3,
        }
    }

    /// The route the step is rendered under.
    #[must_use]
    pub fn route(&self) -> &'static str {
        match self {
            Step::PersonalDetails | Step::Submitted => ROUTE_PERSONAL_DETAILS,
            Step::CampusSelection => ROUTE_CAMPUS_SELECTION,
            Step::DetailsAndFees => ROUTE_DETAILS,
        }
    }

    /// Map a route back to the step a fresh visit lands on.
    ///
    /// Unknown routes return `None`.
    #[must_use]
    pub fn from_route(route: &str) -> Option<Step> {
        match route {
            ROUTE_PERSONAL_DETAILS => Some(Step::PersonalDetails),
            ROUTE_CAMPUS_SELECTION => Some(Step::CampusSelection),
            ROUTE_DETAILS => Some(Step::DetailsAndFees),
            _ => None,
        }
    }

    /// Fields the persisted record must hold before this step may be shown.
    #[must_use]
    pub fn requirements(&self) -> &'static [Field] {
        match self {
            Step::PersonalDetails => &[],
            Step::Submitted => &[Field::FullName, Field::ChooseBca],
            Step::CampusSelection => &[Field::FullName],
            Step::DetailsAndFees => &[Field::FullName, Field::Campus],
        }
    }

    /// Check if this step ends the flow.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Submitted)
    }

    /// The furthest step a persisted record supports.
    ///
    /// Used when a session is resumed without a requested route.
    #[must_use]
    pub fn furthest(record: &ApplicationRecord) -> Step {
        if !record.has(Field::FullName) {
            Step::PersonalDetails
        } else if record.choose_bca == Some(BcaChoice::No) {
            Step::Submitted
        } else if record.has(Field::Campus) {
            Step::DetailsAndFees
        } else {
            Step::CampusSelection
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {}: {}", self.number(), self.name())
    }
}

// =============================================================================
// ENTRY GUARD
// =============================================================================

/// Resolve the step actually shown when `requested` is entered.
///
/// Returns `requested` if the record satisfies its requirements, otherwise
/// the personal-details step. Missing prerequisites are corrected silently.
/// The confirmation additionally needs BCA to have been declined.
#[must_use]
pub fn resolve_entry(requested: Step, record: &ApplicationRecord) -> Step {
    let satisfied = requested
        .requirements()
        .iter()
        .all(|field| record.has(*field))
        && (requested != Step::Submitted || record.choose_bca == Some(BcaChoice::No));

    if satisfied {
        requested
    } else {
        Step::PersonalDetails
    }
}

// =============================================================================
// TESTS
// =============================================================================
