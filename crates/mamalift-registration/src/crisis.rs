//! Support resources shown on the crisis screen and to ineligible respondents.

use std::sync::LazyLock;

use mamalift_core::models::crisis::CrisisResource;

pub const SUPPORT_LINE: &str = "1-800-944-4773";

static RESOURCES: LazyLock<Vec<CrisisResource>> = LazyLock::new(|| {
    vec![
        CrisisResource {
            name: "Postpartum Support International Helpline".to_string(),
            contact: SUPPORT_LINE.to_string(),
            description: "Immediate connection with a trained specialist who can help find local resources and providers".to_string(),
        },
        CrisisResource {
            name: "National Crisis Text Line".to_string(),
            contact: "Text HOME to 741741".to_string(),
            description: "Crisis text support, any time".to_string(),
        },
        CrisisResource {
            name: "Psychology Today therapist directory".to_string(),
            contact: "https://www.psychologytoday.com/us/therapists".to_string(),
            description: "Find local providers offering more intensive care".to_string(),
        },
    ]
});

pub fn crisis_resources() -> &'static [CrisisResource] {
    &RESOURCES
}
