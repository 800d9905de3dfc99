use mamalift_core::models::classification::{ProgramType, RiskLevel};
use mamalift_core::models::response::Response;
use mamalift_instruments::scoring::{classify, ScoringRules};
use proptest::prelude::*;

fn response(question_id: u8, score: u8) -> Response {
    Response {
        question_id,
        score,
        answer: format!("score {score}"),
    }
}

/// Responses for questions 1..=9 with the given scores, plus question 10.
fn answered(scores: &[u8], q10: u8) -> Vec<Response> {
    let mut responses: Vec<Response> = scores
        .iter()
        .enumerate()
        .map(|(i, s)| response(i as u8 + 1, *s))
        .collect();
    responses.push(response(10, q10));
    responses
}

#[test]
fn no_responses_is_low_risk() {
    let c = classify(std::iter::empty::<&Response>(), &ScoringRules::default());
    assert_eq!(c.total_score, 0);
    assert_eq!(c.risk_level, RiskLevel::Low);
    assert_eq!(c.program_type, ProgramType::StandardProgram);
}

#[test]
fn all_zero_answers() {
    let c = classify(&answered(&[0; 9], 0), &ScoringRules::default());
    assert_eq!(c.total_score, 0);
    assert_eq!(c.risk_level, RiskLevel::Low);
    assert_eq!(c.program_type, ProgramType::StandardProgram);
}

#[test]
fn all_twos_is_moderate() {
    let c = classify(&answered(&[2; 9], 0), &ScoringRules::default());
    assert_eq!(c.total_score, 18);
    assert_eq!(c.risk_level, RiskLevel::Moderate);
    assert_eq!(c.program_type, ProgramType::EnhancedProgram);
}

#[test]
fn self_harm_answer_overrides_low_total() {
    let c = classify(&answered(&[0; 9], 2), &ScoringRules::default());
    assert_eq!(c.total_score, 2);
    assert_eq!(c.risk_level, RiskLevel::Crisis);
    assert_eq!(c.program_type, ProgramType::Ineligible);
    assert!(c.is_crisis());
}

#[test]
fn self_harm_answer_alone_is_crisis() {
    let c = classify(&[response(10, 3)], &ScoringRules::default());
    assert_eq!(c.total_score, 3);
    assert_eq!(c.risk_level, RiskLevel::Crisis);
    assert_eq!(c.program_type, ProgramType::Ineligible);
}

#[test]
fn thresholds_are_inclusive() {
    let rules = ScoringRules::default();
    let at = |total: u8| {
        // Spread `total` over questions 1..=9 without touching question 10.
        let mut scores = [0u8; 9];
        let mut left = total;
        for s in scores.iter_mut() {
            *s = left.min(3);
            left -= *s;
        }
        classify(&answered(&scores, 0), &rules)
    };
    assert_eq!(at(12).risk_level, RiskLevel::Low);
    assert_eq!(at(13).risk_level, RiskLevel::Moderate);
    assert_eq!(at(19).risk_level, RiskLevel::Moderate);
    assert_eq!(at(20).risk_level, RiskLevel::High);
    assert_eq!(at(20).program_type, ProgramType::Ineligible);
}

#[test]
fn custom_rules_move_the_cut_offs() {
    let rules = ScoringRules {
        moderate_threshold: 10,
        high_threshold: 15,
        critical_question_id: 10,
    };
    let c = classify(&answered(&[1, 1, 1, 1, 1, 1, 1, 1, 2], 0), &rules);
    assert_eq!(c.total_score, 10);
    assert_eq!(c.risk_level, RiskLevel::Moderate);
}

fn shuffled_answers() -> impl Strategy<Value = Vec<Response>> {
    prop::collection::vec(0u8..=3, 9)
        .prop_map(|scores| answered(&scores, 0))
        .prop_shuffle()
}

proptest! {
    #[test]
    fn tier_follows_total_when_critical_item_is_zero(responses in shuffled_answers()) {
        let total: u32 = responses.iter().map(|r| u32::from(r.score)).sum();
        let c = classify(&responses, &ScoringRules::default());
        prop_assert_eq!(c.total_score, total);
        if total < 13 {
            prop_assert_eq!(c.risk_level, RiskLevel::Low);
            prop_assert_eq!(c.program_type, ProgramType::StandardProgram);
        } else if total < 20 {
            prop_assert_eq!(c.risk_level, RiskLevel::Moderate);
            prop_assert_eq!(c.program_type, ProgramType::EnhancedProgram);
        } else {
            prop_assert_eq!(c.risk_level, RiskLevel::High);
            prop_assert_eq!(c.program_type, ProgramType::Ineligible);
        }
    }

    #[test]
    fn critical_item_always_wins(
        scores in prop::collection::vec(0u8..=3, 9),
        q10 in 1u8..=3,
        answered_count in 0usize..=9,
    ) {
        let mut responses = answered(&scores, q10);
        // Drop some of questions 1..=9 to model an incomplete assessment.
        responses.drain(..9 - answered_count);
        let c = classify(&responses, &ScoringRules::default());
        prop_assert_eq!(c.risk_level, RiskLevel::Crisis);
        prop_assert_eq!(c.program_type, ProgramType::Ineligible);
    }
}
