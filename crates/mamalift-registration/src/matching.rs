//! Therapist matching and appointment slots.
//!
//! Static data: there is no scheduling backend, every respondent is matched
//! to the same therapist and offered the same slots.

use std::sync::LazyLock;

use mamalift_core::models::appointment::{AppointmentSlot, Therapist};
use mamalift_core::models::classification::ProgramType;

static THERAPIST: LazyLock<Therapist> = LazyLock::new(|| Therapist {
    id: "dr-sarah-mitchell".to_string(),
    name: "Dr. Sarah Mitchell".to_string(),
    credentials: "Licensed Clinical Psychologist".to_string(),
    specialty: "Postpartum Depression & Anxiety".to_string(),
    experience: "15 years experience, 500+ mothers helped".to_string(),
    rating: "4.9/5".to_string(),
    bio: "As a mother myself, I've dedicated my career to helping women navigate \
          the challenges of motherhood with compassion and evidence-based care."
        .to_string(),
});

static SLOTS: LazyLock<Vec<AppointmentSlot>> = LazyLock::new(|| {
    [
        ("1", "Tomorrow", "2:00 PM", true),
        ("2", "Thursday", "10:00 AM", false),
        ("3", "Thursday", "3:30 PM", true),
        ("4", "Friday", "11:00 AM", false),
        ("5", "Monday", "9:00 AM", true),
        ("6", "Monday", "4:00 PM", false),
    ]
    .into_iter()
    .map(|(id, day, time, is_priority)| AppointmentSlot {
        id: id.to_string(),
        day: day.to_string(),
        time: time.to_string(),
        is_priority,
    })
    .collect()
});

pub fn matched_therapist() -> &'static Therapist {
    &THERAPIST
}

pub fn available_slots() -> &'static [AppointmentSlot] {
    &SLOTS
}

pub fn slot_ids() -> Vec<&'static str> {
    SLOTS.iter().map(|s| s.id.as_str()).collect()
}

pub fn find_slot(id: &str) -> Option<&'static AppointmentSlot> {
    SLOTS.iter().find(|s| s.id == id)
}

/// Priority slots are only called out to enhanced-program members.
pub fn is_highlighted(slot: &AppointmentSlot, program: ProgramType) -> bool {
    slot.is_priority && program.is_enhanced()
}

pub fn coverage_summary(program: ProgramType) -> &'static str {
    match program {
        ProgramType::EnhancedProgram => {
            "8-week program + bi-weekly sessions + priority support"
        }
        ProgramType::StandardProgram => "8-week digital program + weekly therapist sessions",
        ProgramType::Ineligible => "Not covered by this program",
    }
}
