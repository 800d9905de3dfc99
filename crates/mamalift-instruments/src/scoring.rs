use mamalift_core::models::classification::{Classification, ProgramType, RiskLevel};
use mamalift_core::models::response::Response;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::InstrumentError;
use crate::Instrument;

/// One selectable answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub text: String,
    pub score: u8,
}

/// A screening question. Options are kept in display order, which is not
/// necessarily score order (several EPDS items are reverse-keyed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: u8,
    pub prompt: String,
    pub context: Option<String>,
    pub options: Vec<AnswerOption>,
    pub is_critical: bool,
}

impl Question {
    pub fn option(&self, index: usize) -> Option<&AnswerOption> {
        self.options.get(index)
    }

    /// Index of the option the respondent picked, recovered from a stored response.
    pub fn selected_index(&self, response: &Response) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o.text == response.answer && o.score == response.score)
    }
}

/// Thresholds that turn responses into a [`Classification`].
///
/// The defaults are the clinical EPDS cut-offs used by the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringRules {
    /// Totals at or above this (and below `high_threshold`) are moderate risk.
    pub moderate_threshold: u32,
    /// Totals at or above this are high risk.
    pub high_threshold: u32,
    /// Any non-zero answer to this question is a crisis.
    pub critical_question_id: u8,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            moderate_threshold: 13,
            high_threshold: 20,
            critical_question_id: 10,
        }
    }
}

impl ScoringRules {
    /// Check the rules are usable with `instrument`.
    pub fn validate(&self, instrument: &dyn Instrument) -> Result<(), InstrumentError> {
        if self.moderate_threshold == 0 {
            return Err(InstrumentError::InvalidRules(
                "moderate_threshold must be greater than 0".to_string(),
            ));
        }
        if self.moderate_threshold >= self.high_threshold {
            return Err(InstrumentError::InvalidRules(format!(
                "moderate_threshold ({}) must be below high_threshold ({})",
                self.moderate_threshold, self.high_threshold
            )));
        }
        let max_score = instrument.max_score();
        if self.high_threshold > max_score {
            return Err(InstrumentError::InvalidRules(format!(
                "high_threshold ({}) is above the highest possible total ({max_score})",
                self.high_threshold
            )));
        }
        // The crisis override must stay on the item flagged as critical.
        match instrument.question(self.critical_question_id) {
            Some(q) if q.is_critical => {}
            Some(_) => {
                return Err(InstrumentError::InvalidRules(format!(
                    "question {} of {} is not a critical item",
                    self.critical_question_id,
                    instrument.name()
                )));
            }
            None => {
                return Err(InstrumentError::InvalidRules(format!(
                    "critical_question_id {} is not a question of {}",
                    self.critical_question_id,
                    instrument.name()
                )));
            }
        }
        Ok(())
    }
}

/// Classify a set of responses.
///
/// This is the single source of truth for risk tier and program type. The
/// critical item is checked before the total: a non-zero answer there is a
/// crisis even if nothing else has been answered.
pub fn classify<'a>(
    responses: impl IntoIterator<Item = &'a Response>,
    rules: &ScoringRules,
) -> Classification {
    let mut total_score = 0u32;
    let mut critical_flagged = false;

    for response in responses {
        total_score += u32::from(response.score);
        if response.question_id == rules.critical_question_id && response.score > 0 {
            critical_flagged = true;
        }
    }

    let (risk_level, program_type) = if critical_flagged {
        (RiskLevel::Crisis, ProgramType::Ineligible)
    } else if total_score >= rules.high_threshold {
        (RiskLevel::High, ProgramType::Ineligible)
    } else if total_score >= rules.moderate_threshold {
        (RiskLevel::Moderate, ProgramType::EnhancedProgram)
    } else {
        (RiskLevel::Low, ProgramType::StandardProgram)
    };

    Classification {
        total_score,
        risk_level,
        program_type,
    }
}
