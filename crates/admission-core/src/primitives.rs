//! # Form Primitives
//!
//! Hardcoded constants for the admission flow.
//!
//! These values are compiled into the binary and are immutable at runtime.
//!
//! ## Primitives
//!
//! 1. **Storage Primitive**: the single session key holding the record.
//! 2. **Message Primitive**: user-facing validation messages.
//! 3. **Fee Primitive**: per-campus tuition, other fees and admission fee.

/// The session-storage key under which the whole record is persisted.
///
/// There is exactly one key; the record is written as one JSON object.
pub const STORAGE_KEY: &str = "admissionForm";

// =============================================================================
// VALIDATION MESSAGES
// =============================================================================

/// Emitted for every required field whose value is missing or empty.
pub const MSG_REQUIRED: &str = "This field is required";

/// Emitted when `email` is present but not shaped like `local@domain.tld`.
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address";

/// Emitted when `phone` does not contain exactly ten digits.
pub const MSG_INVALID_PHONE: &str = "Please enter a valid 10-digit phone number";

/// Emitted when a select-style field holds a value outside its options.
pub const MSG_INVALID_OPTION: &str = "Please select a valid option";

/// Surfaced through the notifier when a step-1 submit is rejected.
pub const MSG_SUBMIT_REJECTED: &str = "Please fill all required fields correctly";

/// Number of digits a phone number must reduce to.
pub const PHONE_DIGITS: usize = 10;

// =============================================================================
// FEE STRUCTURE
// =============================================================================

/// Semesters in the BCA programme.
pub const SEMESTER_COUNT: u8 = 8;

/// First semester that carries the senior tuition surcharge.
pub const SURCHARGE_FROM_SEMESTER: u8 = 5;

/// Tuition surcharge added from [`SURCHARGE_FROM_SEMESTER`] onwards.
pub const SENIOR_SURCHARGE: u32 = 1000;

/// Base tuition per semester at Siliguri.
pub const SILIGURI_TUITION: u32 = 20_000;

/// Base tuition per semester at Kolkata.
pub const KOLKATA_TUITION: u32 = 25_000;

/// Library, laboratory, examination and welfare fees per semester at Siliguri.
pub const SILIGURI_OTHER_FEES: u32 = 5000;

/// Library, laboratory, examination and welfare fees per semester at Kolkata.
pub const KOLKATA_OTHER_FEES: u32 = 7000;

/// One-time admission fee at Siliguri, payable outside the schedule.
pub const SILIGURI_ADMISSION_FEE: u32 = 5000;

/// One-time admission fee at Kolkata, payable outside the schedule.
pub const KOLKATA_ADMISSION_FEE: u32 = 8000;

// =============================================================================
// ROUTES
// =============================================================================

/// Route of the personal-details step (and its submitted confirmation).
pub const ROUTE_PERSONAL_DETAILS: &str = "/";

/// Route of the campus-selection step.
pub const ROUTE_CAMPUS_SELECTION: &str = "/location";

/// Route of the details-and-fees step.
pub const ROUTE_DETAILS: &str = "/details";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_is_stable() {
        // Renaming the key orphans every in-flight session
        assert_eq!(STORAGE_KEY, "admissionForm");
    }

    #[test]
    fn siliguri_is_the_cheaper_tier() {
        assert!(SILIGURI_TUITION < KOLKATA_TUITION);
        assert!(SILIGURI_OTHER_FEES < KOLKATA_OTHER_FEES);
        assert!(SILIGURI_ADMISSION_FEE < KOLKATA_ADMISSION_FEE);
    }
}
