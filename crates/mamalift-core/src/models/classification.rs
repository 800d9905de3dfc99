use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Risk tier derived from the screening total and the critical item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    /// Self-harm indicated. Always overrides the score-based tiers.
    Crisis,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Crisis => "crisis",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskLevel::Low),
            "moderate" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            "crisis" => Ok(RiskLevel::Crisis),
            other => Err(CoreError::UnknownVariant {
                kind: "risk level",
                value: other.to_string(),
            }),
        }
    }
}

/// Program track a respondent is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ProgramType {
    /// "MamaLift": 8-week digital program with weekly therapist check-ins.
    StandardProgram,
    /// "MamaLift Plus": bi-weekly sessions and priority scheduling.
    EnhancedProgram,
    /// Needs a higher level of care than the program provides.
    Ineligible,
}

impl ProgramType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProgramType::StandardProgram => "MamaLift",
            ProgramType::EnhancedProgram => "MamaLift Plus",
            ProgramType::Ineligible => "Ineligible",
        }
    }

    pub fn is_eligible(&self) -> bool {
        !matches!(self, ProgramType::Ineligible)
    }

    pub fn is_enhanced(&self) -> bool {
        matches!(self, ProgramType::EnhancedProgram)
    }

    /// How soon the first appointment is promised, in hours.
    pub fn first_appointment_within_hours(&self) -> Option<u32> {
        match self {
            ProgramType::StandardProgram => Some(48),
            ProgramType::EnhancedProgram => Some(24),
            ProgramType::Ineligible => None,
        }
    }

    /// Therapist session cadence shown on the results and personalization steps.
    pub fn session_cadence(&self) -> Option<&'static str> {
        match self {
            ProgramType::StandardProgram => Some("Weekly check-ins with licensed therapists"),
            ProgramType::EnhancedProgram => Some("Bi-weekly sessions with priority scheduling"),
            ProgramType::Ineligible => None,
        }
    }
}

impl fmt::Display for ProgramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProgramType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard_program" | "MamaLift" => Ok(ProgramType::StandardProgram),
            "enhanced_program" | "MamaLift Plus" => Ok(ProgramType::EnhancedProgram),
            "ineligible" | "Ineligible" => Ok(ProgramType::Ineligible),
            other => Err(CoreError::UnknownVariant {
                kind: "program type",
                value: other.to_string(),
            }),
        }
    }
}

/// Output of the classifier: everything that is derived from the responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Classification {
    pub total_score: u32,
    pub risk_level: RiskLevel,
    pub program_type: ProgramType,
}

impl Classification {
    pub fn is_crisis(&self) -> bool {
        self.risk_level == RiskLevel::Crisis
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            total_score: 0,
            risk_level: RiskLevel::Low,
            program_type: ProgramType::StandardProgram,
        }
    }
}
