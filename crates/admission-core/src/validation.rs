//! # Validation Module
//!
//! Field presence and format checks for the personal-details step.
//!
//! - Every required field must be non-empty
//! - `email` must look like `local@domain.tld`
//! - `phone` must reduce to exactly ten digits
//! - `gender` and `chooseBCA` must be one of their options
//!
//! Validation is pure: it never reads or writes the session store.

use crate::primitives::{
    MSG_INVALID_EMAIL, MSG_INVALID_OPTION, MSG_INVALID_PHONE, MSG_REQUIRED, PHONE_DIGITS,
};
use crate::types::{BcaChoice, Field, FieldSource, Gender};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern"));

// =============================================================================
// VALIDATION ERRORS
// =============================================================================

/// Per-field error messages, ordered by form position.
///
/// An empty map means the submission may proceed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, replacing an earlier one.
    pub fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }
}

// =============================================================================
// PREDICATES
// =============================================================================

/// Check the `local@domain.tld` shape: no whitespace, exactly one `@`
/// separating two non-empty parts, and a dot inside the domain part.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Strip everything but ASCII digits.
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// A phone number is valid when exactly ten digits remain after
/// separators are removed.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    normalize_phone(phone).len() == PHONE_DIGITS
}

// =============================================================================
// VALIDATE
// =============================================================================

/// Validate a step-1 submission.
///
/// Required-field checks run first; the format checks only run on present
/// values, so at most one message is reported per field.
#[must_use]
pub fn validate(source: &impl FieldSource) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for field in Field::REQUIRED {
        if !source.has(field) {
            errors.insert(field, MSG_REQUIRED);
        }
    }

    let present = |field: Field| source.field(field).filter(|v| !v.is_empty());

    if present(Field::Email).is_some_and(|email| !is_valid_email(email)) {
        errors.insert(Field::Email, MSG_INVALID_EMAIL);
    }

    if present(Field::Phone).is_some_and(|phone| !is_valid_phone(phone)) {
        errors.insert(Field::Phone, MSG_INVALID_PHONE);
    }

    if present(Field::Gender).is_some_and(|gender| gender.parse::<Gender>().is_err()) {
        errors.insert(Field::Gender, MSG_INVALID_OPTION);
    }

    if present(Field::ChooseBca).is_some_and(|choice| choice.parse::<BcaChoice>().is_err()) {
        errors.insert(Field::ChooseBca, MSG_INVALID_OPTION);
    }

    errors
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PersonalDetailsForm;

    fn valid_form() -> PersonalDetailsForm {
        PersonalDetailsForm {
            full_name: "Rahul".into(),
            middle_name: "Kumar".into(),
            last_name: "Das".into(),
            gender: "male".into(),
            dob: "2005-11-02".into(),
            pob: "Siliguri".into(),
            address: "Sevoke Road".into(),
            phone: "9876543210".into(),
            email: "rahul.das@mail.co.in".into(),
            father_name: "Amit Das".into(),
            mother_name: "Mita Das".into(),
            choose_bca: "yes".into(),
        }
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate(&valid_form()).is_empty());
    }

    #[test]
    fn blank_form_reports_every_required_field() {
        let errors = validate(&PersonalDetailsForm::default());

        assert_eq!(errors.len(), Field::REQUIRED.len());
        for field in Field::REQUIRED {
            assert_eq!(errors.get(field), Some(MSG_REQUIRED));
        }
    }

    #[test]
    fn malformed_email_replaces_nothing_else() {
        let form = PersonalDetailsForm {
            email: "rahul@localhost".into(),
            ..valid_form()
        };
        let errors = validate(&form);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Email), Some(MSG_INVALID_EMAIL));
    }

    #[test]
    fn phone_with_separators_is_accepted() {
        assert!(is_valid_phone("(987) 654-3210"));
        assert!(is_valid_phone("98765 43210"));
        assert!(!is_valid_phone("+91 98765 43210"));
        assert!(!is_valid_phone("12345"));
    }

    #[test]
    fn short_phone_is_rejected_with_phone_message() {
        let form = PersonalDetailsForm {
            phone: "98765-4321".into(),
            ..valid_form()
        };
        assert_eq!(validate(&form).get(Field::Phone), Some(MSG_INVALID_PHONE));
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@@b.c"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.c"));
    }

    #[test]
    fn unknown_choice_is_flagged() {
        let form = PersonalDetailsForm {
            gender: "robot".into(),
            choose_bca: "maybe".into(),
            ..valid_form()
        };
        let errors = validate(&form);

        assert_eq!(errors.get(Field::Gender), Some(MSG_INVALID_OPTION));
        assert_eq!(errors.get(Field::ChooseBca), Some(MSG_INVALID_OPTION));
    }

    #[test]
    fn normalize_keeps_digits_only() {
        assert_eq!(normalize_phone("+91 (98) 7654-3210"), "919876543210");
    }
}
