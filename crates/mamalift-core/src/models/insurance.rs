use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InsuranceProvider {
    Aetna,
    Anthem,
    Cigna,
    Humana,
    Kaiser,
    Molina,
    Tricare,
    United,
    Other,
}

impl InsuranceProvider {
    pub const ALL: [InsuranceProvider; 9] = [
        InsuranceProvider::Aetna,
        InsuranceProvider::Anthem,
        InsuranceProvider::Cigna,
        InsuranceProvider::Humana,
        InsuranceProvider::Kaiser,
        InsuranceProvider::Molina,
        InsuranceProvider::Tricare,
        InsuranceProvider::United,
        InsuranceProvider::Other,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            InsuranceProvider::Aetna => "aetna",
            InsuranceProvider::Anthem => "anthem",
            InsuranceProvider::Cigna => "cigna",
            InsuranceProvider::Humana => "humana",
            InsuranceProvider::Kaiser => "kaiser",
            InsuranceProvider::Molina => "molina",
            InsuranceProvider::Tricare => "tricare",
            InsuranceProvider::United => "united",
            InsuranceProvider::Other => "other",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InsuranceProvider::Aetna => "Aetna",
            InsuranceProvider::Anthem => "Anthem Blue Cross Blue Shield",
            InsuranceProvider::Cigna => "Cigna",
            InsuranceProvider::Humana => "Humana",
            InsuranceProvider::Kaiser => "Kaiser Permanente",
            InsuranceProvider::Molina => "Molina Healthcare",
            InsuranceProvider::Tricare => "Tricare",
            InsuranceProvider::United => "United Healthcare",
            InsuranceProvider::Other => "Other",
        }
    }
}

impl FromStr for InsuranceProvider {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsuranceProvider::ALL
            .into_iter()
            .find(|p| p.id() == s || p.name() == s)
            .ok_or_else(|| CoreError::UnknownVariant {
                kind: "insurance provider",
                value: s.to_string(),
            })
    }
}

/// Insurance and matching details recorded on the final registration step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InsuranceDetails {
    pub provider: InsuranceProvider,
    pub member_id: String,
    pub group_number: Option<String>,
    /// Id of the chosen [`AppointmentSlot`](super::appointment::AppointmentSlot).
    pub selected_appointment: String,
    pub therapist_id: String,
    pub matched_at: jiff::Timestamp,
}
