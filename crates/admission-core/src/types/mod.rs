//! # Core Type Definitions
//!
//! This module contains the data model of the admission flow:
//! - Field identifiers (`Field`) and the `FieldSource` read interface
//! - Closed choices (`Gender`, `BcaChoice`, `Campus`)
//! - The persisted record (`ApplicationRecord`)
//! - The raw step-1 submission (`PersonalDetailsForm`)
//! - Error types (`AdmissionError`)
//!
//! ## Persistence Layout
//!
//! `ApplicationRecord` serializes to a single flat JSON object using the
//! camelCase keys of the browser form (`fullName`, `chooseBCA`, ...).
//! Absent fields are omitted; unknown keys are ignored on read.

use crate::flow::Step;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// FIELDS
// =============================================================================

/// One field of the admission record, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    MiddleName,
    LastName,
    Gender,
    Dob,
    Pob,
    Address,
    Phone,
    Email,
    FatherName,
    MotherName,
    #[serde(rename = "chooseBCA")]
    ChooseBca,
    Campus,
}

impl Field {
    /// The twelve fields every step-1 submission must carry.
    pub const REQUIRED: [Field; 12] = [
        Field::FullName,
        Field::MiddleName,
        Field::LastName,
        Field::Gender,
        Field::Dob,
        Field::Pob,
        Field::Address,
        Field::Phone,
        Field::Email,
        Field::FatherName,
        Field::MotherName,
        Field::ChooseBca,
    ];

    /// Every field of the record, `campus` last.
    pub const ALL: [Field; 13] = [
        Field::FullName,
        Field::MiddleName,
        Field::LastName,
        Field::Gender,
        Field::Dob,
        Field::Pob,
        Field::Address,
        Field::Phone,
        Field::Email,
        Field::FatherName,
        Field::MotherName,
        Field::ChooseBca,
        Field::Campus,
    ];

    /// The storage key of this field.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::MiddleName => "middleName",
            Field::LastName => "lastName",
            Field::Gender => "gender",
            Field::Dob => "dob",
            Field::Pob => "pob",
            Field::Address => "address",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::FatherName => "fatherName",
            Field::MotherName => "motherName",
            Field::ChooseBca => "chooseBCA",
            Field::Campus => "campus",
        }
    }

    /// Human-readable label, as printed next to the input.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::MiddleName => "Middle Name",
            Field::LastName => "Last Name",
            Field::Gender => "Gender",
            Field::Dob => "Date of Birth",
            Field::Pob => "Place of Birth",
            Field::Address => "Address",
            Field::Phone => "Phone Number",
            Field::Email => "Email",
            Field::FatherName => "Father's Name",
            Field::MotherName => "Mother's Name",
            Field::ChooseBca => "Choose BCA",
            Field::Campus => "Campus",
        }
    }

    /// Look a field up by its storage key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Read access to field values, shared by the raw form and the record.
///
/// `None` and `Some("")` both mean "absent".
pub trait FieldSource {
    /// The textual value of `field`, if any.
    fn field(&self, field: Field) -> Option<&str>;

    /// Whether `field` holds a non-empty value.
    fn has(&self, field: Field) -> bool {
        self.field(field).is_some_and(|v| !v.is_empty())
    }
}

// =============================================================================
// CLOSED CHOICES
// =============================================================================

/// Applicant gender, as offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = AdmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(AdmissionError::InvalidChoice {
                field: Field::Gender,
                value: s.to_string(),
            }),
        }
    }
}

/// Answer to "Do you want to choose BCA?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BcaChoice {
    Yes,
    No,
}

impl BcaChoice {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BcaChoice::Yes => "yes",
            BcaChoice::No => "no",
        }
    }
}

impl FromStr for BcaChoice {
    type Err = AdmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(BcaChoice::Yes),
            "no" => Ok(BcaChoice::No),
            _ => Err(AdmissionError::InvalidChoice {
                field: Field::ChooseBca,
                value: s.to_string(),
            }),
        }
    }
}

/// Campus offering the BCA programme.
///
/// The fee tiers are defined only for these two; any other name is
/// rejected when parsed rather than priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Campus {
    Siliguri,
    Kolkata,
}

impl Campus {
    pub const ALL: [Campus; 2] = [Campus::Siliguri, Campus::Kolkata];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Campus::Siliguri => "Siliguri",
            Campus::Kolkata => "Kolkata",
        }
    }
}

impl fmt::Display for Campus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Campus {
    type Err = AdmissionError;

    /// Case-insensitive: `kolkata` and `KOLKATA` both name Kolkata.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Campus::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AdmissionError::UnknownCampus(s.to_string()))
    }
}

/// Decode an optional choice, treating unknown spellings as absent.
///
/// A record written by an older or foreign client must still load; an
/// unrecognised campus then simply fails the step-3 guard.
fn lenient_choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

// =============================================================================
// APPLICATION RECORD
// =============================================================================

/// The single persisted entity: everything the applicant has committed so far.
///
/// Fields are merged in step by step; every field is optional at rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_choice"
    )]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_name: Option<String>,
    #[serde(
        rename = "chooseBCA",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_choice"
    )]
    pub choose_bca: Option<BcaChoice>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_choice"
    )]
    pub campus: Option<Campus>,
}

impl ApplicationRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A record carrying only a campus selection.
    #[must_use]
    pub fn with_campus(campus: Campus) -> Self {
        Self {
            campus: Some(campus),
            ..Self::default()
        }
    }

    /// Check if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Field::ALL.into_iter().all(|f| self.field(f).is_none())
    }

    /// Shallow merge: every field set in `partial` overwrites this one.
    pub fn merge(&mut self, partial: &ApplicationRecord) {
        fn take<T: Clone>(slot: &mut Option<T>, incoming: &Option<T>) {
            if let Some(value) = incoming {
                *slot = Some(value.clone());
            }
        }

        take(&mut self.full_name, &partial.full_name);
        take(&mut self.middle_name, &partial.middle_name);
        take(&mut self.last_name, &partial.last_name);
        take(&mut self.gender, &partial.gender);
        take(&mut self.dob, &partial.dob);
        take(&mut self.pob, &partial.pob);
        take(&mut self.address, &partial.address);
        take(&mut self.phone, &partial.phone);
        take(&mut self.email, &partial.email);
        take(&mut self.father_name, &partial.father_name);
        take(&mut self.mother_name, &partial.mother_name);
        take(&mut self.choose_bca, &partial.choose_bca);
        take(&mut self.campus, &partial.campus);
    }

    /// The applicant's name as displayed on the summary.
    #[must_use]
    pub fn display_name(&self) -> String {
        [&self.full_name, &self.middle_name, &self.last_name]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FieldSource for ApplicationRecord {
    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::FullName => self.full_name.as_deref(),
            Field::MiddleName => self.middle_name.as_deref(),
            Field::LastName => self.last_name.as_deref(),
            Field::Gender => self.gender.map(|g| g.as_str()),
            Field::Dob => self.dob.as_deref(),
            Field::Pob => self.pob.as_deref(),
            Field::Address => self.address.as_deref(),
            Field::Phone => self.phone.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::FatherName => self.father_name.as_deref(),
            Field::MotherName => self.mother_name.as_deref(),
            Field::ChooseBca => self.choose_bca.map(|c| c.as_str()),
            Field::Campus => self.campus.map(|c| c.as_str()),
        }
    }
}

// =============================================================================
// PERSONAL DETAILS FORM
// =============================================================================

/// The step-1 form exactly as typed, before validation.
///
/// `Default` is the blank form shown on first load and after a restart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetailsForm {
    pub full_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub gender: String,
    pub dob: String,
    pub pob: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub father_name: String,
    pub mother_name: String,
    #[serde(rename = "chooseBCA")]
    pub choose_bca: String,
}

impl PersonalDetailsForm {
    /// Check if every input is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        Field::REQUIRED.into_iter().all(|f| !self.has(f))
    }

    /// Convert the form into a record ready to be merged.
    ///
    /// Expects a form that already passed validation; a bad choice value
    /// is reported as [`AdmissionError::InvalidChoice`].
    pub fn to_record(&self) -> Result<ApplicationRecord, AdmissionError> {
        let text = |s: &String| (!s.is_empty()).then(|| s.clone());

        Ok(ApplicationRecord {
            full_name: text(&self.full_name),
            middle_name: text(&self.middle_name),
            last_name: text(&self.last_name),
            gender: Some(self.gender.parse()?),
            dob: text(&self.dob),
            pob: text(&self.pob),
            address: text(&self.address),
            phone: text(&self.phone),
            email: text(&self.email),
            father_name: text(&self.father_name),
            mother_name: text(&self.mother_name),
            choose_bca: Some(self.choose_bca.parse()?),
            campus: None,
        })
    }
}

impl FieldSource for PersonalDetailsForm {
    fn field(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::FullName => &self.full_name,
            Field::MiddleName => &self.middle_name,
            Field::LastName => &self.last_name,
            Field::Gender => &self.gender,
            Field::Dob => &self.dob,
            Field::Pob => &self.pob,
            Field::Address => &self.address,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::FatherName => &self.father_name,
            Field::MotherName => &self.mother_name,
            Field::ChooseBca => &self.choose_bca,
            Field::Campus => return None,
        };
        Some(value.as_str())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the admission flow.
///
/// - No silent failures on writes
/// - Use `Result<T, AdmissionError>` for fallible operations
/// - None of these is fatal; the worst outcome is returning to step 1
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The session store could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A campus name outside the offered campuses.
    #[error("Unknown campus: {0:?} (expected Siliguri or Kolkata)")]
    UnknownCampus(String),

    /// A select-style field holds a value outside its options.
    #[error("Invalid value for {field}: {value:?}")]
    InvalidChoice { field: Field, value: String },

    /// An action was requested from a step that does not offer it.
    #[error("Cannot {action} from {from}")]
    InvalidTransition { from: Step, action: &'static str },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> PersonalDetailsForm {
        PersonalDetailsForm {
            full_name: "Asha".into(),
            middle_name: "K".into(),
            last_name: "Roy".into(),
            gender: "female".into(),
            dob: "2006-04-12".into(),
            pob: "Jalpaiguri".into(),
            address: "12 Hill Cart Road".into(),
            phone: "98765 43210".into(),
            email: "asha@example.in".into(),
            father_name: "Bimal Roy".into(),
            mother_name: "Rita Roy".into(),
            choose_bca: "yes".into(),
        }
    }

    #[test]
    fn record_serializes_with_form_keys() {
        let record = filled_form().to_record().expect("convert");
        let json = serde_json::to_value(&record).expect("serialize");

        assert_eq!(json["fullName"], "Asha");
        assert_eq!(json["chooseBCA"], "yes");
        assert_eq!(json["gender"], "female");
        assert!(json.get("campus").is_none());
    }

    #[test]
    fn unknown_campus_decodes_as_absent() {
        let record: ApplicationRecord =
            serde_json::from_str(r#"{"fullName":"Asha","campus":"Darjeeling"}"#).expect("parse");

        assert_eq!(record.full_name.as_deref(), Some("Asha"));
        assert_eq!(record.campus, None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let record: ApplicationRecord =
            serde_json::from_str(r#"{"fullName":"Asha","favouriteColour":"red"}"#).expect("parse");
        assert_eq!(record.full_name.as_deref(), Some("Asha"));
    }

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut record = filled_form().to_record().expect("convert");
        let partial = ApplicationRecord {
            email: Some("new@example.in".into()),
            campus: Some(Campus::Kolkata),
            ..ApplicationRecord::default()
        };

        record.merge(&partial);

        assert_eq!(record.email.as_deref(), Some("new@example.in"));
        assert_eq!(record.campus, Some(Campus::Kolkata));
        assert_eq!(record.full_name.as_deref(), Some("Asha"));
    }

    #[test]
    fn empty_string_counts_as_absent() {
        let record = ApplicationRecord {
            full_name: Some(String::new()),
            ..ApplicationRecord::default()
        };
        assert!(!record.has(Field::FullName));
    }

    #[test]
    fn campus_parse_is_case_insensitive() {
        assert_eq!("kolkata".parse::<Campus>().ok(), Some(Campus::Kolkata));
        assert_eq!(" SILIGURI ".parse::<Campus>().ok(), Some(Campus::Siliguri));
        assert!(matches!(
            "Delhi".parse::<Campus>(),
            Err(AdmissionError::UnknownCampus(_))
        ));
    }

    #[test]
    fn field_keys_roundtrip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("nickname"), None);
    }

    #[test]
    fn display_name_skips_blanks() {
        let record = ApplicationRecord {
            full_name: Some("Asha".into()),
            middle_name: Some(String::new()),
            last_name: Some("Roy".into()),
            ..ApplicationRecord::default()
        };
        assert_eq!(record.display_name(), "Asha Roy");
    }
}
