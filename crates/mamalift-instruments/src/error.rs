use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("unknown question {question_id} for instrument '{instrument_id}'")]
    UnknownQuestion {
        instrument_id: String,
        question_id: u8,
    },

    #[error("option {option_index} is out of range for question {question_id} ({option_count} options)")]
    OptionOutOfRange {
        question_id: u8,
        option_index: usize,
        option_count: usize,
    },

    #[error("invalid scoring rules: {0}")]
    InvalidRules(String),
}
