use mamalift_registration::error::RegistrationError;
use mamalift_registration::navigator::{
    QuestionNavigator, QuestionPosition, RegistrationStep, StepNavigator,
};

#[test]
fn starts_on_the_intro() {
    let nav = QuestionNavigator::new(10);
    assert_eq!(nav.position(), QuestionPosition::Intro);
    assert_eq!(nav.current_index(), 0);
    assert_eq!(nav.progress(), 0.0);
    assert!(!nav.can_go_previous());
}

#[test]
fn next_is_gated_on_an_answer() {
    let mut nav = QuestionNavigator::new(10);
    nav.start().unwrap();
    let err = nav.next(|_| false).unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::PrematureNavigation { question_id: 1 }
    ));
    assert_eq!(nav.position(), QuestionPosition::Question(1));

    assert_eq!(nav.next(|id| id == 1).unwrap(), QuestionPosition::Question(2));
}

#[test]
fn previous_from_first_question_returns_to_intro() {
    let mut nav = QuestionNavigator::new(10);
    nav.start().unwrap();
    assert_eq!(nav.previous().unwrap(), QuestionPosition::Intro);
    assert!(nav.previous().is_err());
}

#[test]
fn last_question_completes() {
    let mut nav = QuestionNavigator::new(10);
    nav.start().unwrap();
    for expected in 2..=10 {
        assert_eq!(nav.next(|_| true).unwrap(), QuestionPosition::Question(expected));
    }
    assert_eq!(nav.next(|_| true).unwrap(), QuestionPosition::Complete);
    assert_eq!(nav.current_index(), 10);
    assert!(matches!(
        nav.next(|_| true),
        Err(RegistrationError::InvalidTransition { .. })
    ));
    assert!(!nav.can_go_previous());
}

#[test]
fn moves_exactly_one_question_at_a_time() {
    let mut nav = QuestionNavigator::new(10);
    nav.start().unwrap();
    nav.next(|_| true).unwrap();
    nav.next(|_| true).unwrap();
    assert_eq!(nav.current_index(), 3);
    nav.previous().unwrap();
    assert_eq!(nav.current_index(), 2);
}

#[test]
fn question_progress_is_a_plain_ratio() {
    let mut nav = QuestionNavigator::new(10);
    nav.start().unwrap();
    assert_eq!(nav.progress(), 10.0);
    for _ in 0..4 {
        nav.next(|_| true).unwrap();
    }
    assert_eq!(nav.progress(), 50.0);
}

#[test]
fn start_only_works_from_the_intro() {
    let mut nav = QuestionNavigator::new(10);
    nav.start().unwrap();
    assert!(matches!(
        nav.start(),
        Err(RegistrationError::InvalidTransition {
            from: QuestionPosition::Question(1),
            ..
        })
    ));
}

#[test]
fn steps_are_bounded() {
    let mut steps = StepNavigator::default();
    assert_eq!(steps.current(), RegistrationStep::SafetyAssessment);
    assert!(steps.retreat().is_err());

    assert_eq!(steps.advance().unwrap(), RegistrationStep::AssessmentResults);
    assert_eq!(steps.advance().unwrap(), RegistrationStep::PersonalDetails);
    assert_eq!(steps.advance().unwrap(), RegistrationStep::InsuranceMatching);
    assert!(matches!(
        steps.advance(),
        Err(RegistrationError::StepOutOfBounds { .. })
    ));
    assert_eq!(steps.progress(), 100.0);

    assert_eq!(steps.retreat().unwrap(), RegistrationStep::PersonalDetails);
    assert_eq!(steps.progress(), 75.0);
}

#[test]
fn step_labels() {
    let labels: Vec<&str> = (1..=4)
        .filter_map(RegistrationStep::from_number)
        .map(|s| s.label())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Safety Assessment",
            "Assessment Results",
            "Personal Details",
            "Insurance & Matching",
        ]
    );
    assert_eq!(RegistrationStep::from_number(5), None);
}

#[test]
fn positions_serialize_with_a_kind_tag() {
    let intro = serde_json::to_value(QuestionPosition::Intro).unwrap();
    assert_eq!(intro, serde_json::json!({ "kind": "intro" }));
    let third = serde_json::to_value(QuestionPosition::Question(3)).unwrap();
    assert_eq!(third, serde_json::json!({ "kind": "question", "question": 3 }));
}
