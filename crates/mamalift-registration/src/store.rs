use std::collections::BTreeMap;
use std::sync::Arc;

use mamalift_core::models::classification::{Classification, ProgramType, RiskLevel};
use mamalift_core::models::response::Response;
use mamalift_instruments::scoring::{classify, ScoringRules};
use mamalift_instruments::Instrument;
use serde::Serialize;

use crate::error::RegistrationError;

/// Immutable snapshot of the screening answers and everything derived from
/// them. A new snapshot is produced on every answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentState {
    responses: BTreeMap<u8, Response>,
    classification: Classification,
}

impl AssessmentState {
    fn new(responses: BTreeMap<u8, Response>, rules: &ScoringRules) -> Self {
        let classification = classify(responses.values(), rules);
        Self {
            responses,
            classification,
        }
    }

    /// Responses ordered by question id.
    pub fn responses(&self) -> impl Iterator<Item = &Response> {
        self.responses.values()
    }

    pub fn response(&self, question_id: u8) -> Option<&Response> {
        self.responses.get(&question_id)
    }

    pub fn is_answered(&self, question_id: u8) -> bool {
        self.responses.contains_key(&question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.responses.len()
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn total_score(&self) -> u32 {
        self.classification.total_score
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.classification.risk_level
    }

    pub fn program_type(&self) -> ProgramType {
        self.classification.program_type
    }
}

/// Holds the answers collected so far and re-classifies after every change.
pub struct ResponseStore {
    instrument: Arc<dyn Instrument>,
    rules: ScoringRules,
    state: AssessmentState,
}

impl ResponseStore {
    pub fn new(instrument: Arc<dyn Instrument>, rules: ScoringRules) -> Self {
        let state = AssessmentState::new(BTreeMap::new(), &rules);
        Self {
            instrument,
            rules,
            state,
        }
    }

    pub fn instrument(&self) -> &dyn Instrument {
        self.instrument.as_ref()
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn state(&self) -> &AssessmentState {
        &self.state
    }

    /// Record the option picked for a question, replacing any earlier answer
    /// to it, and return the re-classified snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::InvalidInput` for an unknown question or an
    /// option index outside the question's options. The store is unchanged.
    pub fn submit_answer(
        &mut self,
        question_id: u8,
        option_index: usize,
    ) -> Result<&AssessmentState, RegistrationError> {
        let response = self.instrument.response_for(question_id, option_index)?;
        tracing::debug!(question_id, score = response.score, "answer recorded");

        let was_crisis = self.state.classification.is_crisis();
        let mut responses = self.state.responses.clone();
        responses.insert(question_id, response);
        self.state = AssessmentState::new(responses, &self.rules);

        if self.state.classification.is_crisis() && !was_crisis {
            tracing::warn!(question_id, "critical item flagged, crisis support required");
        }
        Ok(&self.state)
    }

    pub fn reset(&mut self) {
        self.state = AssessmentState::new(BTreeMap::new(), &self.rules);
    }
}
