use mamalift_core::models::classification::Classification;
use mamalift_core::models::crisis::CrisisResource;

use crate::session::QuestionView;

/// What the respondent did on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Picked the option at this index.
    Choose(usize),
    Next,
    Previous,
    /// Asked for support resources. The current screen stays as it was.
    Help,
    Quit,
}

/// Rendering side of the assessment. Implementations only ever see
/// read-only views of the session.
pub trait Presenter {
    /// Welcome screen before question 1. Anything but `Quit` starts.
    fn render_intro(&mut self) -> Selection;

    fn render_question(&mut self, view: &QuestionView<'_>) -> Selection;

    /// Shown whenever the critical item is flagged, from any question, and
    /// on request through [`Selection::Help`].
    fn render_crisis_screen(&mut self, resources: &[CrisisResource]);

    fn render_results_screen(&mut self, classification: &Classification);

    /// Inline message for a recoverable problem, e.g. "next" without an answer.
    fn render_notice(&mut self, _message: &str) {}
}
