//! mamalift-instruments
//!
//! Screening instrument definitions. Pure data plus the classifier; no I/O.
//! Defines the question bank, answer scoring and the risk stratification
//! rules for each supported instrument.

pub mod error;
pub mod instruments;
pub mod scoring;

use error::InstrumentError;
use mamalift_core::models::response::Response;
use scoring::{AnswerOption, Question};

/// Trait implemented by each screening instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "epds").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "EPDS").
    fn name(&self) -> &str;

    /// Questions in clinical order.
    fn questions(&self) -> &[Question];

    fn question_count(&self) -> usize {
        self.questions().len()
    }

    fn question(&self, id: u8) -> Option<&Question> {
        self.questions().iter().find(|q| q.id == id)
    }

    /// Highest total the instrument can produce.
    fn max_score(&self) -> u32 {
        self.questions()
            .iter()
            .filter_map(|q| q.options.iter().map(|o| u32::from(o.score)).max())
            .sum()
    }

    /// Resolve a selection to its question and option, rejecting unknown ids
    /// and out-of-range indices.
    fn resolve(
        &self,
        question_id: u8,
        option_index: usize,
    ) -> Result<(&Question, &AnswerOption), InstrumentError> {
        let question =
            self.question(question_id)
                .ok_or_else(|| InstrumentError::UnknownQuestion {
                    instrument_id: self.id().to_string(),
                    question_id,
                })?;
        let option = question
            .option(option_index)
            .ok_or(InstrumentError::OptionOutOfRange {
                question_id,
                option_index,
                option_count: question.options.len(),
            })?;
        Ok((question, option))
    }

    /// Build the [`Response`] recorded for a selection.
    fn response_for(&self, question_id: u8, option_index: usize) -> Result<Response, InstrumentError> {
        let (question, option) = self.resolve(question_id, option_index)?;
        Ok(Response {
            question_id: question.id,
            score: option.score,
            answer: option.text.clone(),
        })
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::epds::Epds)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Result<Box<dyn Instrument>, InstrumentError> {
    all_instruments()
        .into_iter()
        .find(|i| i.id() == id)
        .ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
}
