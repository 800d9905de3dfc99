use std::sync::Arc;

use mamalift_core::models::classification::{ProgramType, RiskLevel};
use mamalift_instruments::error::InstrumentError;
use mamalift_instruments::instruments::epds::Epds;
use mamalift_instruments::scoring::ScoringRules;
use mamalift_instruments::Instrument;
use mamalift_registration::error::RegistrationError;
use mamalift_registration::store::ResponseStore;

fn store() -> ResponseStore {
    ResponseStore::new(Arc::new(Epds), ScoringRules::default())
}

/// Option index on `question_id` that carries `score`.
fn index_for(question_id: u8, score: u8) -> usize {
    Epds.question(question_id)
        .unwrap()
        .options
        .iter()
        .position(|o| o.score == score)
        .unwrap()
}

fn answer(store: &mut ResponseStore, question_id: u8, score: u8) {
    store
        .submit_answer(question_id, index_for(question_id, score))
        .unwrap();
}

#[test]
fn empty_store_is_low_risk() {
    let store = store();
    assert_eq!(store.state().total_score(), 0);
    assert_eq!(store.state().risk_level(), RiskLevel::Low);
    assert_eq!(store.state().program_type(), ProgramType::StandardProgram);
    assert_eq!(store.state().answered_count(), 0);
}

#[test]
fn resubmitting_the_same_answer_is_idempotent() {
    let mut store = store();
    answer(&mut store, 1, 2);
    let first = store.state().clone();
    answer(&mut store, 1, 2);
    assert_eq!(store.state(), &first);
    assert_eq!(store.state().total_score(), 2);
    assert_eq!(store.state().answered_count(), 1);
}

#[test]
fn changing_an_answer_replaces_its_score() {
    let mut store = store();
    answer(&mut store, 4, 3);
    answer(&mut store, 5, 1);
    assert_eq!(store.state().total_score(), 4);

    answer(&mut store, 4, 1);
    assert_eq!(store.state().total_score(), 2);
    assert_eq!(store.state().response(4).unwrap().score, 1);
}

#[test]
fn crisis_is_visible_immediately_after_the_critical_answer() {
    let mut store = store();
    answer(&mut store, 1, 0);
    let state = store.submit_answer(10, index_for(10, 1)).unwrap();
    assert_eq!(state.risk_level(), RiskLevel::Crisis);
    assert_eq!(state.program_type(), ProgramType::Ineligible);
}

#[test]
fn snapshot_total_matches_sum_of_responses() {
    let mut store = store();
    for (id, score) in [(1, 3), (2, 2), (3, 1), (7, 3)] {
        answer(&mut store, id, score);
    }
    let sum: u32 = store.state().responses().map(|r| u32::from(r.score)).sum();
    assert_eq!(store.state().total_score(), sum);
    assert_eq!(sum, 9);
}

#[test]
fn unknown_question_is_invalid_input_and_leaves_state_alone() {
    let mut store = store();
    answer(&mut store, 1, 1);
    let before = store.state().clone();

    let err = store.submit_answer(42, 0).unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::InvalidInput(InstrumentError::UnknownQuestion { question_id: 42, .. })
    ));
    assert_eq!(store.state(), &before);
}

#[test]
fn out_of_range_option_is_invalid_input() {
    let mut store = store();
    let err = store.submit_answer(3, 7).unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::InvalidInput(InstrumentError::OptionOutOfRange { option_index: 7, .. })
    ));
    assert_eq!(store.state().answered_count(), 0);
}

#[test]
fn reset_clears_answers() {
    let mut store = store();
    answer(&mut store, 10, 3);
    store.reset();
    assert_eq!(store.state().answered_count(), 0);
    assert_eq!(store.state().risk_level(), RiskLevel::Low);
}

#[test]
fn snapshot_serializes_for_the_frontend() {
    let mut store = store();
    store.submit_answer(1, index_for(1, 2)).unwrap();
    let json = serde_json::to_value(store.state()).unwrap();
    assert_eq!(json["responses"]["1"]["score"], 2);
    assert_eq!(json["classification"]["total_score"], 2);
    assert_eq!(json["classification"]["risk_level"], "low");
    assert_eq!(json["classification"]["program_type"], "standard_program");
}
