use std::collections::VecDeque;

use mamalift_core::models::classification::{Classification, ProgramType, RiskLevel};
use mamalift_core::models::crisis::CrisisResource;
use mamalift_registration::flow::{run_assessment, AssessmentOutcome};
use mamalift_registration::presenter::{Presenter, Selection};
use mamalift_registration::session::{QuestionView, RegistrationSession};

/// Plays back a fixed list of selections and records what was rendered.
#[derive(Default)]
struct ScriptedPresenter {
    script: VecDeque<Selection>,
    questions_seen: Vec<u8>,
    notices: Vec<String>,
    crisis_screens: usize,
    results: Option<Classification>,
}

impl ScriptedPresenter {
    fn new(script: impl IntoIterator<Item = Selection>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    fn next(&mut self) -> Selection {
        self.script.pop_front().unwrap_or(Selection::Quit)
    }
}

impl Presenter for ScriptedPresenter {
    fn render_intro(&mut self) -> Selection {
        self.next()
    }

    fn render_question(&mut self, view: &QuestionView<'_>) -> Selection {
        self.questions_seen.push(view.number);
        self.next()
    }

    fn render_crisis_screen(&mut self, resources: &[CrisisResource]) {
        assert!(!resources.is_empty());
        self.crisis_screens += 1;
    }

    fn render_results_screen(&mut self, classification: &Classification) {
        self.results = Some(*classification);
    }

    fn render_notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

/// Choose option `index` then press next, for each question.
fn answer_each(indices: [usize; 10]) -> Vec<Selection> {
    let mut script = vec![Selection::Next];
    for index in indices {
        script.push(Selection::Choose(index));
        script.push(Selection::Next);
    }
    script
}

#[test]
fn completes_with_standard_program() {
    // Option 0 scores 0 on items 1, 2, 4 and option 3 scores 0 elsewhere.
    let script = answer_each([0, 0, 3, 0, 3, 3, 3, 3, 3, 3]);
    let mut presenter = ScriptedPresenter::new(script);
    let mut session = RegistrationSession::epds();

    let outcome = run_assessment(&mut session, &mut presenter).unwrap();
    let Some(results) = presenter.results else {
        panic!("results screen not shown");
    };
    assert_eq!(outcome, AssessmentOutcome::Completed(results));
    assert_eq!(results.total_score, 0);
    assert_eq!(results.program_type, ProgramType::StandardProgram);
    assert!(presenter.notices.is_empty());
}

#[test]
fn crisis_interrupts_the_flow() {
    let mut script = answer_each([0, 0, 3, 0, 3, 3, 3, 3, 3, 3]);
    // Pick "Hardly ever" on question 10 instead of "Never".
    let last_choice = script.len() - 2;
    script[last_choice] = Selection::Choose(2);
    let mut presenter = ScriptedPresenter::new(script);
    let mut session = RegistrationSession::epds();

    let outcome = run_assessment(&mut session, &mut presenter).unwrap();
    assert_eq!(outcome, AssessmentOutcome::Crisis);
    assert_eq!(presenter.crisis_screens, 1);
    assert!(presenter.results.is_none());
    assert_eq!(session.classification().risk_level, RiskLevel::Crisis);
}

#[test]
fn premature_next_and_bad_choice_become_notices() {
    let script = [
        Selection::Next,
        Selection::Next,
        Selection::Choose(9),
        Selection::Choose(1),
        Selection::Next,
        Selection::Previous,
        Selection::Previous,
        Selection::Quit,
    ];
    let mut presenter = ScriptedPresenter::new(script);
    let mut session = RegistrationSession::epds();

    let outcome = run_assessment(&mut session, &mut presenter).unwrap();
    assert_eq!(outcome, AssessmentOutcome::Abandoned);
    assert_eq!(presenter.notices.len(), 2);
    assert_eq!(presenter.questions_seen, vec![1, 1, 1, 1, 2, 1]);
    assert_eq!(session.classification().total_score, 1);
}

#[test]
fn quitting_on_the_intro_abandons() {
    let mut presenter = ScriptedPresenter::new([Selection::Quit]);
    let mut session = RegistrationSession::epds();
    let outcome = run_assessment(&mut session, &mut presenter).unwrap();
    assert_eq!(outcome, AssessmentOutcome::Abandoned);
    assert!(presenter.questions_seen.is_empty());
}

#[test]
fn help_shows_resources_and_returns_to_the_question() {
    let script = [
        Selection::Help,
        Selection::Next,
        Selection::Choose(1),
        Selection::Help,
        Selection::Next,
        Selection::Help,
        Selection::Quit,
    ];
    let mut presenter = ScriptedPresenter::new(script);
    let mut session = RegistrationSession::epds();

    let outcome = run_assessment(&mut session, &mut presenter).unwrap();
    assert_eq!(outcome, AssessmentOutcome::Abandoned);
    assert_eq!(presenter.crisis_screens, 3);
    assert_eq!(presenter.questions_seen, vec![1, 1, 1, 2, 2]);
    assert!(presenter.notices.is_empty());
    assert!(!session.is_crisis());
    assert_eq!(session.position().current_question, 2);
    assert_eq!(session.classification().total_score, 1);
}
