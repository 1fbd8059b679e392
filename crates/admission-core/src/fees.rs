//! # Fee Schedule
//!
//! Derives the per-semester fee table shown on the details step.
//!
//! | Campus   | Tuition (1-4) | Tuition (5-8) | Other fees | Admission fee |
//! |----------|---------------|---------------|------------|---------------|
//! | Siliguri | 20,000        | 21,000        | 5,000      | 5,000         |
//! | Kolkata  | 25,000        | 26,000        | 7,000      | 8,000         |
//!
//! The schedule is a pure function of the campus. It is never stored.

use crate::primitives::{
    KOLKATA_ADMISSION_FEE, KOLKATA_OTHER_FEES, KOLKATA_TUITION, SEMESTER_COUNT, SENIOR_SURCHARGE,
    SILIGURI_ADMISSION_FEE, SILIGURI_OTHER_FEES, SILIGURI_TUITION, SURCHARGE_FROM_SEMESTER,
};
use crate::types::Campus;
use serde::{Deserialize, Serialize};

/// One row of the fee table. Amounts are whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeScheduleEntry {
    pub semester: u8,
    pub tuition_fee: u32,
    pub other_fees: u32,
    pub total: u32,
}

fn base_tuition(campus: Campus) -> u32 {
    match campus {
        Campus::Siliguri => SILIGURI_TUITION,
        Campus::Kolkata => KOLKATA_TUITION,
    }
}

fn base_other_fees(campus: Campus) -> u32 {
    match campus {
        Campus::Siliguri => SILIGURI_OTHER_FEES,
        Campus::Kolkata => KOLKATA_OTHER_FEES,
    }
}

/// One-time admission fee, payable at admission and not part of the schedule.
#[must_use]
pub fn admission_fee(campus: Campus) -> u32 {
    match campus {
        Campus::Siliguri => SILIGURI_ADMISSION_FEE,
        Campus::Kolkata => KOLKATA_ADMISSION_FEE,
    }
}

/// Compute the eight-semester schedule for `campus`, semester 1 first.
#[must_use]
pub fn compute_fee_schedule(campus: Campus) -> Vec<FeeScheduleEntry> {
    let tuition = base_tuition(campus);
    let other_fees = base_other_fees(campus);

    (1..=SEMESTER_COUNT)
        .map(|semester| {
            let surcharge = if semester >= SURCHARGE_FROM_SEMESTER {
                SENIOR_SURCHARGE
            } else {
                0
            };
            let tuition_fee = tuition + surcharge;
            FeeScheduleEntry {
                semester,
                tuition_fee,
                other_fees,
                total: tuition_fee + other_fees,
            }
        })
        .collect()
}

// =============================================================================
// FEE SUMMARY
// =============================================================================

/// The fee block of the details step: the table plus the admission fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSummary {
    pub campus: Campus,
    pub schedule: Vec<FeeScheduleEntry>,
    pub admission_fee: u32,
}

impl FeeSummary {
    #[must_use]
    pub fn for_campus(campus: Campus) -> Self {
        Self {
            campus,
            schedule: compute_fee_schedule(campus),
            admission_fee: admission_fee(campus),
        }
    }

    /// Sum of every semester total, excluding the admission fee.
    #[must_use]
    pub fn programme_total(&self) -> u32 {
        self.schedule.iter().map(|e| e.total).sum()
    }
}
