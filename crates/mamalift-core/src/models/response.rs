use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single recorded answer to a screening question.
///
/// At most one `Response` exists per `question_id`; a later answer to the
/// same question replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Response {
    pub question_id: u8,
    pub score: u8,
    pub answer: String,
}
