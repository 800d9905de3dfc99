use mamalift_core::models::classification::ProgramType;
use mamalift_instruments::error::InstrumentError;
use thiserror::Error;

use crate::forms::FieldErrors;
use crate::navigator::{QuestionPosition, RegistrationStep};

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InstrumentError),

    #[error("question {question_id} must be answered before moving on")]
    PrematureNavigation { question_id: u8 },

    #[error("cannot {action} from {from:?}")]
    InvalidTransition {
        from: QuestionPosition,
        action: &'static str,
    },

    #[error("expected step {expected:?}, session is at {actual:?}")]
    StepOutOfOrder {
        expected: RegistrationStep,
        actual: RegistrationStep,
    },

    #[error("no step {direction} {step:?}")]
    StepOutOfBounds {
        step: RegistrationStep,
        direction: &'static str,
    },

    #[error("{0}")]
    Validation(FieldErrors),

    #[error("program type {0:?} cannot continue registration")]
    NotEligible(ProgramType),

    #[error("crisis support is active; the session must be reset")]
    CrisisActive,
}
