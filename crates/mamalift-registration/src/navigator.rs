//! Linear movement through the questions and through the registration steps.

use serde::Serialize;

use crate::error::RegistrationError;

/// Where the respondent is within the screening questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "question", rename_all = "snake_case")]
pub enum QuestionPosition {
    /// Welcome screen before question 1.
    Intro,
    /// Showing question `n` (1-based).
    Question(u8),
    /// The last question has been answered and confirmed.
    Complete,
}

#[derive(Debug, Clone)]
pub struct QuestionNavigator {
    position: QuestionPosition,
    total: u8,
}

impl QuestionNavigator {
    pub fn new(total: u8) -> Self {
        Self {
            position: QuestionPosition::Intro,
            total,
        }
    }

    pub fn position(&self) -> QuestionPosition {
        self.position
    }

    pub fn total(&self) -> u8 {
        self.total
    }

    /// 0 on the intro, `n` on question `n`, `total` once complete.
    pub fn current_index(&self) -> u8 {
        match self.position {
            QuestionPosition::Intro => 0,
            QuestionPosition::Question(n) => n,
            QuestionPosition::Complete => self.total,
        }
    }

    pub fn start(&mut self) -> Result<QuestionPosition, RegistrationError> {
        match self.position {
            QuestionPosition::Intro => {
                self.position = QuestionPosition::Question(1);
                Ok(self.position)
            }
            from => Err(RegistrationError::InvalidTransition {
                from,
                action: "start",
            }),
        }
    }

    /// Whether `next` would succeed given which questions are answered.
    pub fn can_go_next(&self, is_answered: impl Fn(u8) -> bool) -> bool {
        match self.position {
            QuestionPosition::Intro => true,
            QuestionPosition::Question(n) => is_answered(n),
            QuestionPosition::Complete => false,
        }
    }

    pub fn can_go_previous(&self) -> bool {
        matches!(self.position, QuestionPosition::Question(_))
    }

    /// Advance one question. On the intro this is the same as [`start`](Self::start).
    ///
    /// # Errors
    ///
    /// `PrematureNavigation` if the current question has no answer;
    /// `InvalidTransition` once complete.
    pub fn next(
        &mut self,
        is_answered: impl Fn(u8) -> bool,
    ) -> Result<QuestionPosition, RegistrationError> {
        match self.position {
            QuestionPosition::Intro => self.start(),
            QuestionPosition::Question(n) if !is_answered(n) => {
                Err(RegistrationError::PrematureNavigation { question_id: n })
            }
            QuestionPosition::Question(n) if n >= self.total => {
                self.position = QuestionPosition::Complete;
                Ok(self.position)
            }
            QuestionPosition::Question(n) => {
                self.position = QuestionPosition::Question(n + 1);
                Ok(self.position)
            }
            QuestionPosition::Complete => Err(RegistrationError::InvalidTransition {
                from: self.position,
                action: "go to the next question",
            }),
        }
    }

    /// Go back one question. Question 1 returns to the intro.
    pub fn previous(&mut self) -> Result<QuestionPosition, RegistrationError> {
        match self.position {
            QuestionPosition::Question(1) => {
                self.position = QuestionPosition::Intro;
                Ok(self.position)
            }
            QuestionPosition::Question(n) => {
                self.position = QuestionPosition::Question(n - 1);
                Ok(self.position)
            }
            from => Err(RegistrationError::InvalidTransition {
                from,
                action: "go to the previous question",
            }),
        }
    }

    /// Re-open the questionnaire at its last question, keeping answers.
    pub fn resume_at_last(&mut self) {
        self.position = QuestionPosition::Question(self.total);
    }

    /// Percentage of questions reached, `current / total * 100`.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.current_index()) / f64::from(self.total) * 100.0
    }

    pub fn reset(&mut self) {
        self.position = QuestionPosition::Intro;
    }
}

/// The four registration steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    SafetyAssessment = 1,
    AssessmentResults = 2,
    PersonalDetails = 3,
    InsuranceMatching = 4,
}

impl RegistrationStep {
    pub const TOTAL: u8 = 4;

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(RegistrationStep::SafetyAssessment),
            2 => Some(RegistrationStep::AssessmentResults),
            3 => Some(RegistrationStep::PersonalDetails),
            4 => Some(RegistrationStep::InsuranceMatching),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegistrationStep::SafetyAssessment => "Safety Assessment",
            RegistrationStep::AssessmentResults => "Assessment Results",
            RegistrationStep::PersonalDetails => "Personal Details",
            RegistrationStep::InsuranceMatching => "Insurance & Matching",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepNavigator {
    current: RegistrationStep,
}

impl Default for StepNavigator {
    fn default() -> Self {
        Self {
            current: RegistrationStep::SafetyAssessment,
        }
    }
}

impl StepNavigator {
    pub fn current(&self) -> RegistrationStep {
        self.current
    }

    pub fn advance(&mut self) -> Result<RegistrationStep, RegistrationError> {
        let next = RegistrationStep::from_number(self.current.number() + 1).ok_or(
            RegistrationError::StepOutOfBounds {
                step: self.current,
                direction: "after",
            },
        )?;
        tracing::info!(from = ?self.current, to = ?next, "registration step advanced");
        self.current = next;
        Ok(next)
    }

    pub fn retreat(&mut self) -> Result<RegistrationStep, RegistrationError> {
        let previous = RegistrationStep::from_number(self.current.number() - 1).ok_or(
            RegistrationError::StepOutOfBounds {
                step: self.current,
                direction: "before",
            },
        )?;
        tracing::info!(from = ?self.current, to = ?previous, "registration step retreated");
        self.current = previous;
        Ok(previous)
    }

    /// Percentage of steps reached, `current / total * 100`.
    pub fn progress(&self) -> f64 {
        f64::from(self.current.number()) / f64::from(RegistrationStep::TOTAL) * 100.0
    }

    pub fn reset(&mut self) {
        self.current = RegistrationStep::SafetyAssessment;
    }
}
