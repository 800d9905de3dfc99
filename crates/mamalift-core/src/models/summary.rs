use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::appointment::{AppointmentSlot, Therapist};
use super::classification::ProgramType;
use super::demographics::SessionType;

/// Confirmation shown once every registration step is complete.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegistrationSummary {
    pub session_id: Uuid,
    pub program_type: ProgramType,
    pub first_name: String,
    /// Login details are sent here.
    pub email: String,
    pub therapist: Therapist,
    pub appointment: AppointmentSlot,
    pub session_type: Option<SessionType>,
    pub matched_at: jiff::Timestamp,
    pub completed_at: jiff::Timestamp,
}
