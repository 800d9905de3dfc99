//! Runs all four registration steps on a [`Terminal`].

use std::io::{BufRead, Write};

use mamalift_core::models::summary::RegistrationSummary;
use mamalift_registration::crisis::crisis_resources;
use mamalift_registration::error::RegistrationError;
use mamalift_registration::flow::{AssessmentOutcome, run_assessment};
use mamalift_registration::forms::{InsuranceForm, PersonalizationForm};
use mamalift_registration::session::RegistrationSession;

use crate::terminal::Terminal;

#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    Registered(Box<RegistrationSummary>),
    /// The critical item was flagged. Crisis resources were shown.
    Crisis,
    /// Screened above the program's cut-off. Support resources were shown.
    NotEligible,
    Abandoned,
}

pub fn run_registration<R: BufRead, W: Write>(
    session: &mut RegistrationSession,
    terminal: &mut Terminal<R, W>,
) -> eyre::Result<RegistrationOutcome> {
    let outcome = run_assessment(session, terminal)?;
    if let Some(e) = terminal.take_error() {
        return Err(e.into());
    }
    match outcome {
        AssessmentOutcome::Completed(_) => {}
        AssessmentOutcome::Crisis => return Ok(RegistrationOutcome::Crisis),
        AssessmentOutcome::Abandoned => return Ok(RegistrationOutcome::Abandoned),
    }

    match session.continue_from_results() {
        Ok(_) => {}
        Err(RegistrationError::NotEligible(_)) => {
            terminal.show_resources(crisis_resources())?;
            return Ok(RegistrationOutcome::NotEligible);
        }
        Err(e) => return Err(e.into()),
    }
    let program = session.classification().program_type;

    let mut personal = PersonalizationForm::default();
    loop {
        if !terminal.fill_personalization(&mut personal, program)? {
            return Ok(RegistrationOutcome::Abandoned);
        }
        match session.submit_personalization(&mut personal) {
            Ok(_) => break,
            Err(RegistrationError::Validation(errors)) => terminal.show_field_errors(&errors)?,
            Err(e) => return Err(e.into()),
        }
    }

    let session_type = session.demographics().and_then(|d| d.session_type);
    let mut insurance = InsuranceForm::default();
    let summary = loop {
        if !terminal.fill_insurance(&mut insurance, program, session_type)? {
            return Ok(RegistrationOutcome::Abandoned);
        }
        match session.submit_insurance(&mut insurance) {
            Ok(summary) => break summary.clone(),
            Err(RegistrationError::Validation(errors)) => terminal.show_field_errors(&errors)?,
            Err(e) => return Err(e.into()),
        }
    };

    terminal.show_summary(&summary)?;
    Ok(RegistrationOutcome::Registered(Box::new(summary)))
}
