//! Drives the screening questionnaire through a [`Presenter`].

use mamalift_core::models::classification::Classification;

use crate::crisis::crisis_resources;
use crate::error::RegistrationError;
use crate::navigator::RegistrationStep;
use crate::presenter::{Presenter, Selection};
use crate::session::{RegistrationSession, Screen};

/// How the questionnaire ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentOutcome {
    Completed(Classification),
    Crisis,
    Abandoned,
}

enum Action {
    Start,
    Answer { question_id: u8, option_index: usize },
    Next,
    Previous,
    Help,
    Quit,
    Finished(AssessmentOutcome),
}

/// Run the questionnaire until it completes, a crisis is flagged, or the
/// respondent quits.
///
/// Recoverable problems (an out-of-range choice, "next" without an answer)
/// are shown as notices and the same question is asked again. A request
/// for help shows the support resources and then also returns to it.
///
/// # Errors
///
/// Fails if the session is not on the safety assessment step.
pub fn run_assessment(
    session: &mut RegistrationSession,
    presenter: &mut dyn Presenter,
) -> Result<AssessmentOutcome, RegistrationError> {
    loop {
        let action = match session.current_screen() {
            Screen::Intro => match presenter.render_intro() {
                Selection::Quit => Action::Quit,
                Selection::Help => Action::Help,
                _ => Action::Start,
            },
            Screen::Question(view) => match presenter.render_question(&view) {
                Selection::Choose(option_index) => Action::Answer {
                    question_id: view.question.id,
                    option_index,
                },
                Selection::Next => Action::Next,
                Selection::Previous => Action::Previous,
                Selection::Help => Action::Help,
                Selection::Quit => Action::Quit,
            },
            Screen::Crisis(resources) => {
                presenter.render_crisis_screen(resources);
                Action::Finished(AssessmentOutcome::Crisis)
            }
            Screen::Results(classification) => {
                presenter.render_results_screen(&classification);
                Action::Finished(AssessmentOutcome::Completed(classification))
            }
            Screen::Personalization(_) | Screen::InsuranceMatching(_) | Screen::Complete(_) => {
                return Err(RegistrationError::StepOutOfOrder {
                    expected: RegistrationStep::SafetyAssessment,
                    actual: session.step(),
                });
            }
        };

        let result = match action {
            Action::Start => session.start().map(|_| ()),
            Action::Answer {
                question_id,
                option_index,
            } => session.submit_answer(question_id, option_index).map(|_| ()),
            Action::Next => session.go_next().map(|_| ()),
            Action::Previous => session.go_previous().map(|_| ()),
            Action::Help => {
                presenter.render_crisis_screen(crisis_resources());
                Ok(())
            }
            Action::Quit => {
                tracing::info!(session_id = %session.id(), "assessment abandoned");
                return Ok(AssessmentOutcome::Abandoned);
            }
            Action::Finished(outcome) => return Ok(outcome),
        };

        match result {
            Ok(()) => {}
            Err(
                e @ (RegistrationError::InvalidInput(_)
                | RegistrationError::PrematureNavigation { .. }
                | RegistrationError::InvalidTransition { .. }),
            ) => presenter.render_notice(&e.to_string()),
            Err(e) => return Err(e),
        }
    }
}
