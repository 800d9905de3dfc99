//! Field-level validation for the personalization and insurance steps.
//!
//! Forms hold raw text as typed. `validate` either produces the typed model
//! or reports every invalid field with its own message.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use mamalift_core::models::demographics::{Demographics, ReferralSource, SessionType};
use mamalift_core::models::insurance::InsuranceProvider;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

static ZIP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zip pattern is valid"));

/// Per-field error messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Five-digit ZIP, optionally with the four-digit extension.
pub fn is_valid_zip_code(value: &str) -> bool {
    ZIP_CODE.is_match(value)
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    FirstName,
    LastName,
    DateOfBirth,
    Email,
    Phone,
    ZipCode,
    SessionType,
    ReferralSource,
    ProviderName,
}

impl PersonalField {
    pub fn key(&self) -> &'static str {
        match self {
            PersonalField::FirstName => "first_name",
            PersonalField::LastName => "last_name",
            PersonalField::DateOfBirth => "date_of_birth",
            PersonalField::Email => "email",
            PersonalField::Phone => "phone",
            PersonalField::ZipCode => "zip_code",
            PersonalField::SessionType => "session_type",
            PersonalField::ReferralSource => "referral_source",
            PersonalField::ProviderName => "provider_name",
        }
    }
}

/// Step 3: contact details, scheduling preference and referral source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalizationForm {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub email: String,
    pub phone: String,
    pub zip_code: String,
    /// Empty means no preference was given.
    pub session_type: String,
    pub referral_source: String,
    pub provider_name: String,
    #[serde(skip)]
    errors: FieldErrors,
}

impl PersonalizationForm {
    /// Prefill from previously submitted details.
    pub fn from_demographics(d: &Demographics) -> Self {
        Self {
            first_name: d.first_name.clone(),
            last_name: d.last_name.clone(),
            date_of_birth: d.date_of_birth.clone().unwrap_or_default(),
            email: d.email.clone(),
            phone: d.phone.clone(),
            zip_code: d.zip_code.clone(),
            session_type: d
                .session_type
                .map(|s| s.id().to_string())
                .unwrap_or_default(),
            referral_source: d.referral_source.label().to_string(),
            provider_name: d.provider_name.clone().unwrap_or_default(),
            errors: FieldErrors::default(),
        }
    }

    /// Set a field and clear any error previously reported for it.
    pub fn set(&mut self, field: PersonalField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PersonalField::FirstName => self.first_name = value,
            PersonalField::LastName => self.last_name = value,
            PersonalField::DateOfBirth => self.date_of_birth = value,
            PersonalField::Email => self.email = value,
            PersonalField::Phone => self.phone = value,
            PersonalField::ZipCode => self.zip_code = value,
            PersonalField::SessionType => self.session_type = value,
            PersonalField::ReferralSource => self.referral_source = value,
            PersonalField::ProviderName => self.provider_name = value,
        }
        self.errors.remove(field.key());
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Whether the provider-name field applies to the selected referral source.
    pub fn shows_provider_field(&self) -> bool {
        self.referral_source
            .parse::<ReferralSource>()
            .is_ok_and(|r| r.is_clinician_referral())
    }

    /// Validate every field. On failure the errors are also kept on the form
    /// so each one can be shown next to its input.
    pub fn validate(&mut self) -> Result<Demographics, FieldErrors> {
        let mut errors = FieldErrors::default();

        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();
        let zip_code = self.zip_code.trim();

        if first_name.is_empty() {
            errors.insert("first_name", "First name is required");
        }
        if last_name.is_empty() {
            errors.insert("last_name", "Last name is required");
        }
        if email.is_empty() {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(email) {
            errors.insert("email", "Please enter a valid email address");
        }
        if phone.is_empty() {
            errors.insert("phone", "Phone number is required");
        }
        if zip_code.is_empty() {
            errors.insert("zip_code", "Zip code is required");
        } else if !is_valid_zip_code(zip_code) {
            errors.insert("zip_code", "Please enter a valid zip code");
        }

        let session_type = match optional(&self.session_type) {
            None => None,
            Some(raw) => match raw.parse::<SessionType>() {
                Ok(s) => Some(s),
                Err(_) => {
                    errors.insert("session_type", "Please choose a session type");
                    None
                }
            },
        };

        let referral_source = if self.referral_source.trim().is_empty() {
            errors.insert("referral_source", "Please tell us how you found us");
            None
        } else {
            match self.referral_source.trim().parse::<ReferralSource>() {
                Ok(r) => Some(r),
                Err(_) => {
                    errors.insert("referral_source", "Please tell us how you found us");
                    None
                }
            }
        };

        let Some(referral_source) = referral_source.filter(|_| errors.is_empty()) else {
            self.errors = errors.clone();
            return Err(errors);
        };
        self.errors = FieldErrors::default();

        let provider_name = if referral_source.is_clinician_referral() {
            optional(&self.provider_name)
        } else {
            None
        };

        Ok(Demographics {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth: optional(&self.date_of_birth),
            email: email.to_string(),
            phone: phone.to_string(),
            zip_code: zip_code.to_string(),
            session_type,
            referral_source,
            provider_name,
        })
    }
}

/// Insurance fields checked on step 4, before matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInsurance {
    pub provider: InsuranceProvider,
    pub member_id: String,
    pub group_number: Option<String>,
    pub selected_appointment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsuranceField {
    Provider,
    MemberId,
    GroupNumber,
    Appointment,
}

impl InsuranceField {
    pub fn key(&self) -> &'static str {
        match self {
            InsuranceField::Provider => "provider",
            InsuranceField::MemberId => "member_id",
            InsuranceField::GroupNumber => "group_number",
            InsuranceField::Appointment => "appointment",
        }
    }
}

/// Step 4: insurance details and first-appointment choice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsuranceForm {
    pub provider: String,
    pub member_id: String,
    pub group_number: String,
    pub selected_appointment: String,
    #[serde(skip)]
    errors: FieldErrors,
}

impl InsuranceForm {
    pub fn set(&mut self, field: InsuranceField, value: impl Into<String>) {
        let value = value.into();
        match field {
            InsuranceField::Provider => self.provider = value,
            InsuranceField::MemberId => self.member_id = value,
            InsuranceField::GroupNumber => self.group_number = value,
            InsuranceField::Appointment => self.selected_appointment = value,
        }
        self.errors.remove(field.key());
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Validate against the slot ids currently on offer.
    pub fn validate(&mut self, slot_ids: &[&str]) -> Result<ValidatedInsurance, FieldErrors> {
        let mut errors = FieldErrors::default();

        let provider = match optional(&self.provider) {
            None => {
                errors.insert("provider", "Insurance provider is required");
                None
            }
            Some(raw) => match raw.parse::<InsuranceProvider>() {
                Ok(p) => Some(p),
                Err(_) => {
                    errors.insert("provider", "Please select a listed insurance provider");
                    None
                }
            },
        };

        let member_id = self.member_id.trim();
        if member_id.is_empty() {
            errors.insert("member_id", "Member ID is required");
        }

        let appointment = self.selected_appointment.trim();
        if appointment.is_empty() {
            errors.insert("appointment", "Please select an appointment time");
        } else if !slot_ids.contains(&appointment) {
            errors.insert("appointment", "Please select an available appointment time");
        }

        let Some(provider) = provider.filter(|_| errors.is_empty()) else {
            self.errors = errors.clone();
            return Err(errors);
        };
        self.errors = FieldErrors::default();

        Ok(ValidatedInsurance {
            provider,
            member_id: member_id.to_string(),
            group_number: optional(&self.group_number),
            selected_appointment: appointment.to_string(),
        })
    }
}
