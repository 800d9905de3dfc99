use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A support line or directory offered when the respondent needs more care
/// than the program provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CrisisResource {
    pub name: String,
    pub contact: String,
    pub description: String,
}
