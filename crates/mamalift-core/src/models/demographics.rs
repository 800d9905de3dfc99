use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Contact and scheduling details collected on the personalization step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Demographics {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<String>,
    pub email: String,
    pub phone: String,
    pub zip_code: String,
    pub session_type: Option<SessionType>,
    pub referral_source: ReferralSource,
    /// Only kept when `referral_source` is a clinician referral.
    pub provider_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionType {
    Video,
    Phone,
    InPerson,
    NoPreference,
}

impl SessionType {
    pub const ALL: [SessionType; 4] = [
        SessionType::Video,
        SessionType::Phone,
        SessionType::InPerson,
        SessionType::NoPreference,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SessionType::Video => "video",
            SessionType::Phone => "phone",
            SessionType::InPerson => "in_person",
            SessionType::NoPreference => "no_preference",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Video => "Video sessions",
            SessionType::Phone => "Phone sessions",
            SessionType::InPerson => "In-person (if available)",
            SessionType::NoPreference => "No preference",
        }
    }

    /// Medium shown next to appointment slots. Anything without a concrete
    /// preference is scheduled as video.
    pub fn appointment_medium(session_type: Option<SessionType>) -> &'static str {
        match session_type {
            Some(SessionType::Phone) => "Phone",
            Some(SessionType::InPerson) => "In-person",
            _ => "Video",
        }
    }
}

impl FromStr for SessionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(SessionType::Video),
            "phone" => Ok(SessionType::Phone),
            "in-person" | "in_person" => Ok(SessionType::InPerson),
            "no-preference" | "no_preference" => Ok(SessionType::NoPreference),
            other => Err(CoreError::UnknownVariant {
                kind: "session type",
                value: other.to_string(),
            }),
        }
    }
}

/// How the respondent heard about the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReferralSource {
    ObGyn,
    Pediatrician,
    PrimaryCare,
    Therapist,
    Online,
    FriendOrFamily,
    Insurance,
    Other,
}

impl ReferralSource {
    pub const ALL: [ReferralSource; 8] = [
        ReferralSource::ObGyn,
        ReferralSource::Pediatrician,
        ReferralSource::PrimaryCare,
        ReferralSource::Therapist,
        ReferralSource::Online,
        ReferralSource::FriendOrFamily,
        ReferralSource::Insurance,
        ReferralSource::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReferralSource::ObGyn => "My OB/GYN referred me",
            ReferralSource::Pediatrician => "My baby's pediatrician referred me",
            ReferralSource::PrimaryCare => "My primary care doctor referred me",
            ReferralSource::Therapist => "Another therapist referred me",
            ReferralSource::Online => "Found online/social media",
            ReferralSource::FriendOrFamily => "Friend or family recommendation",
            ReferralSource::Insurance => "Through my insurance",
            ReferralSource::Other => "Other",
        }
    }

    /// Clinician referrals unlock the optional provider-name field.
    pub fn is_clinician_referral(&self) -> bool {
        matches!(
            self,
            ReferralSource::ObGyn
                | ReferralSource::Pediatrician
                | ReferralSource::PrimaryCare
                | ReferralSource::Therapist
        )
    }
}

impl FromStr for ReferralSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let by_label = ReferralSource::ALL.into_iter().find(|r| r.label() == s);
        if let Some(source) = by_label {
            return Ok(source);
        }
        match s {
            "ob_gyn" => Ok(ReferralSource::ObGyn),
            "pediatrician" => Ok(ReferralSource::Pediatrician),
            "primary_care" => Ok(ReferralSource::PrimaryCare),
            "therapist" => Ok(ReferralSource::Therapist),
            "online" => Ok(ReferralSource::Online),
            "friend_or_family" => Ok(ReferralSource::FriendOrFamily),
            "insurance" => Ok(ReferralSource::Insurance),
            "other" => Ok(ReferralSource::Other),
            other => Err(CoreError::UnknownVariant {
                kind: "referral source",
                value: other.to_string(),
            }),
        }
    }
}
