use std::sync::Arc;

use mamalift_core::models::classification::{Classification, ProgramType};
use mamalift_core::models::crisis::CrisisResource;
use mamalift_core::models::demographics::Demographics;
use mamalift_core::models::insurance::InsuranceDetails;
use mamalift_core::models::response::Response;
use mamalift_core::models::summary::RegistrationSummary;
use mamalift_instruments::instruments::epds::Epds;
use mamalift_instruments::scoring::{Question, ScoringRules};
use mamalift_instruments::Instrument;
use serde::Serialize;
use uuid::Uuid;

use crate::crisis::crisis_resources;
use crate::error::RegistrationError;
use crate::forms::{FieldErrors, InsuranceForm, PersonalizationForm};
use crate::matching;
use crate::navigator::{QuestionNavigator, QuestionPosition, RegistrationStep, StepNavigator};
use crate::store::{AssessmentState, ResponseStore};

/// Current step and question, as shown in progress indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WizardPosition {
    pub current_step: RegistrationStep,
    /// 0 is the intro screen.
    pub current_question: u8,
}

/// Read-only view of the question being asked.
#[derive(Debug, Clone)]
pub struct QuestionView<'a> {
    pub question: &'a Question,
    pub selected: Option<usize>,
    pub number: u8,
    pub total: u8,
    pub progress: f64,
    pub can_go_next: bool,
    pub can_go_previous: bool,
}

/// What the presentation layer should show right now.
#[derive(Debug, Clone)]
pub enum Screen<'a> {
    Intro,
    Question(QuestionView<'a>),
    Crisis(&'static [CrisisResource]),
    Results(Classification),
    Personalization(ProgramType),
    InsuranceMatching(ProgramType),
    Complete(&'a RegistrationSummary),
}

/// One respondent's registration. Single owner of all session state.
pub struct RegistrationSession {
    id: Uuid,
    store: ResponseStore,
    questions: QuestionNavigator,
    steps: StepNavigator,
    demographics: Option<Demographics>,
    insurance: Option<InsuranceDetails>,
    summary: Option<RegistrationSummary>,
}

impl RegistrationSession {
    /// Start a session for `instrument` scored with `rules`.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::InvalidInput` if the rules do not fit the
    /// instrument.
    pub fn new(
        instrument: Arc<dyn Instrument>,
        rules: ScoringRules,
    ) -> Result<Self, RegistrationError> {
        rules.validate(instrument.as_ref())?;
        Ok(Self::build(instrument, rules))
    }

    /// EPDS with the standard cut-offs.
    pub fn epds() -> Self {
        Self::build(Arc::new(Epds), ScoringRules::default())
    }

    fn build(instrument: Arc<dyn Instrument>, rules: ScoringRules) -> Self {
        let total = u8::try_from(instrument.question_count()).unwrap_or(u8::MAX);
        let id = Uuid::new_v4();
        tracing::info!(session_id = %id, instrument = instrument.id(), "registration session created");
        Self {
            id,
            store: ResponseStore::new(instrument, rules),
            questions: QuestionNavigator::new(total),
            steps: StepNavigator::default(),
            demographics: None,
            insurance: None,
            summary: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn instrument(&self) -> &dyn Instrument {
        self.store.instrument()
    }

    pub fn step(&self) -> RegistrationStep {
        self.steps.current()
    }

    pub fn position(&self) -> WizardPosition {
        WizardPosition {
            current_step: self.steps.current(),
            current_question: self.questions.current_index(),
        }
    }

    pub fn question_position(&self) -> QuestionPosition {
        self.questions.position()
    }

    /// The question on screen, if one is.
    pub fn current_question(&self) -> Option<&Question> {
        match self.questions.position() {
            QuestionPosition::Question(n) => self.store.instrument().question(n),
            _ => None,
        }
    }

    pub fn current_responses(&self) -> impl Iterator<Item = &Response> {
        self.store.state().responses()
    }

    pub fn assessment(&self) -> &AssessmentState {
        self.store.state()
    }

    pub fn classification(&self) -> Classification {
        self.store.state().classification()
    }

    pub fn is_crisis(&self) -> bool {
        self.classification().is_crisis()
    }

    pub fn can_go_next(&self) -> bool {
        !self.is_crisis()
            && self.steps.current() == RegistrationStep::SafetyAssessment
            && self
                .questions
                .can_go_next(|id| self.store.state().is_answered(id))
    }

    pub fn can_go_previous(&self) -> bool {
        !self.is_crisis()
            && self.steps.current() == RegistrationStep::SafetyAssessment
            && self.questions.can_go_previous()
    }

    pub fn question_progress(&self) -> f64 {
        self.questions.progress()
    }

    pub fn step_progress(&self) -> f64 {
        self.steps.progress()
    }

    pub fn demographics(&self) -> Option<&Demographics> {
        self.demographics.as_ref()
    }

    pub fn insurance(&self) -> Option<&InsuranceDetails> {
        self.insurance.as_ref()
    }

    pub fn summary(&self) -> Option<&RegistrationSummary> {
        self.summary.as_ref()
    }

    fn guard_crisis(&self) -> Result<(), RegistrationError> {
        if self.is_crisis() {
            return Err(RegistrationError::CrisisActive);
        }
        Ok(())
    }

    fn expect_step(&self, expected: RegistrationStep) -> Result<(), RegistrationError> {
        let actual = self.steps.current();
        if actual != expected {
            return Err(RegistrationError::StepOutOfOrder { expected, actual });
        }
        Ok(())
    }

    pub fn start(&mut self) -> Result<QuestionPosition, RegistrationError> {
        self.guard_crisis()?;
        self.expect_step(RegistrationStep::SafetyAssessment)?;
        self.questions.start()
    }

    /// Record an answer. Classification is recomputed before this returns, so
    /// the very next [`current_screen`](Self::current_screen) reflects it.
    pub fn submit_answer(
        &mut self,
        question_id: u8,
        option_index: usize,
    ) -> Result<&AssessmentState, RegistrationError> {
        self.guard_crisis()?;
        self.expect_step(RegistrationStep::SafetyAssessment)?;
        self.store.submit_answer(question_id, option_index)
    }

    /// Move to the next question, or to the results step after the last one.
    pub fn go_next(&mut self) -> Result<QuestionPosition, RegistrationError> {
        self.guard_crisis()?;
        self.expect_step(RegistrationStep::SafetyAssessment)?;
        let state = self.store.state();
        let position = self.questions.next(|id| state.is_answered(id))?;
        if position == QuestionPosition::Complete {
            let classification = state.classification();
            tracing::info!(
                session_id = %self.id,
                total_score = classification.total_score,
                risk_level = %classification.risk_level,
                "assessment complete"
            );
            self.steps.advance()?;
        }
        Ok(position)
    }

    pub fn go_previous(&mut self) -> Result<QuestionPosition, RegistrationError> {
        self.guard_crisis()?;
        self.expect_step(RegistrationStep::SafetyAssessment)?;
        self.questions.previous()
    }

    /// Leave the results step for personalization. Only eligible programs
    /// continue; everyone else is pointed at crisis resources.
    pub fn continue_from_results(&mut self) -> Result<RegistrationStep, RegistrationError> {
        self.guard_crisis()?;
        self.expect_step(RegistrationStep::AssessmentResults)?;
        let program = self.classification().program_type;
        if !program.is_eligible() {
            return Err(RegistrationError::NotEligible(program));
        }
        self.steps.advance()
    }

    /// Step 3. Every invalid field is reported at once.
    pub fn submit_personalization(
        &mut self,
        form: &mut PersonalizationForm,
    ) -> Result<&Demographics, RegistrationError> {
        self.guard_crisis()?;
        self.expect_step(RegistrationStep::PersonalDetails)?;
        let demographics = form.validate().map_err(RegistrationError::Validation)?;
        self.steps.advance()?;
        Ok(&*self.demographics.insert(demographics))
    }

    /// Step 4: record insurance, match the therapist and finish.
    pub fn submit_insurance(
        &mut self,
        form: &mut InsuranceForm,
    ) -> Result<&RegistrationSummary, RegistrationError> {
        self.guard_crisis()?;
        self.expect_step(RegistrationStep::InsuranceMatching)?;
        if self.summary.is_some() {
            return Err(RegistrationError::StepOutOfBounds {
                step: self.steps.current(),
                direction: "past completed registration at",
            });
        }
        let validated = form
            .validate(&matching::slot_ids())
            .map_err(RegistrationError::Validation)?;

        let Some(demographics) = self.demographics.as_ref() else {
            return Err(RegistrationError::StepOutOfOrder {
                expected: RegistrationStep::PersonalDetails,
                actual: self.steps.current(),
            });
        };
        let Some(appointment) = matching::find_slot(&validated.selected_appointment) else {
            let mut errors = FieldErrors::default();
            errors.insert("appointment", "Please select an available appointment time");
            return Err(RegistrationError::Validation(errors));
        };

        let therapist = matching::matched_therapist();
        let matched_at = jiff::Timestamp::now();
        self.insurance = Some(InsuranceDetails {
            provider: validated.provider,
            member_id: validated.member_id,
            group_number: validated.group_number,
            selected_appointment: validated.selected_appointment,
            therapist_id: therapist.id.clone(),
            matched_at,
        });

        let summary = RegistrationSummary {
            session_id: self.id,
            program_type: self.classification().program_type,
            first_name: demographics.first_name.clone(),
            email: demographics.email.clone(),
            therapist: therapist.clone(),
            appointment: appointment.clone(),
            session_type: demographics.session_type,
            matched_at,
            completed_at: jiff::Timestamp::now(),
        };
        tracing::info!(
            session_id = %self.id,
            program = %summary.program_type,
            appointment = %summary.appointment.id,
            "registration complete"
        );
        Ok(&*self.summary.insert(summary))
    }

    /// Go back one registration step. From the results step this re-opens
    /// the last question so answers can be revised.
    pub fn go_back_step(&mut self) -> Result<RegistrationStep, RegistrationError> {
        self.guard_crisis()?;
        if self.summary.is_some() {
            return Err(RegistrationError::StepOutOfBounds {
                step: self.steps.current(),
                direction: "before completed registration at",
            });
        }
        let step = self.steps.retreat()?;
        if step == RegistrationStep::SafetyAssessment {
            self.questions.resume_at_last();
        }
        Ok(step)
    }

    /// Drop everything and return to the intro under a fresh session id, as
    /// if the flow were restarted.
    pub fn reset(&mut self) {
        let previous = std::mem::replace(&mut self.id, Uuid::new_v4());
        tracing::info!(
            session_id = %self.id,
            previous_session_id = %previous,
            "registration session reset"
        );
        self.store.reset();
        self.questions.reset();
        self.steps.reset();
        self.demographics = None;
        self.insurance = None;
        self.summary = None;
    }

    /// Decide what to show. The crisis check runs first on every call, so a
    /// flagged critical item preempts whatever position the wizard is in.
    pub fn current_screen(&self) -> Screen<'_> {
        if self.is_crisis() {
            return Screen::Crisis(crisis_resources());
        }
        if let Some(summary) = &self.summary {
            return Screen::Complete(summary);
        }

        let program = self.classification().program_type;
        match self.steps.current() {
            RegistrationStep::SafetyAssessment => match self.questions.position() {
                QuestionPosition::Intro => Screen::Intro,
                QuestionPosition::Question(n) => match self.store.instrument().question(n) {
                    Some(question) => Screen::Question(QuestionView {
                        question,
                        selected: self
                            .store
                            .state()
                            .response(n)
                            .and_then(|r| question.selected_index(r)),
                        number: n,
                        total: self.questions.total(),
                        progress: self.questions.progress(),
                        can_go_next: self.can_go_next(),
                        can_go_previous: self.can_go_previous(),
                    }),
                    None => Screen::Intro,
                },
                QuestionPosition::Complete => Screen::Results(self.classification()),
            },
            RegistrationStep::AssessmentResults => Screen::Results(self.classification()),
            RegistrationStep::PersonalDetails => Screen::Personalization(program),
            RegistrationStep::InsuranceMatching => Screen::InsuranceMatching(program),
        }
    }
}
