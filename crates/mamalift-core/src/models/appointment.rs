use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An open slot for the first therapist appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppointmentSlot {
    pub id: String,
    pub day: String,
    pub time: String,
    /// Highlighted for enhanced-program members.
    pub is_priority: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Therapist {
    pub id: String,
    pub name: String,
    pub credentials: String,
    pub specialty: String,
    pub experience: String,
    pub rating: String,
    pub bio: String,
}
