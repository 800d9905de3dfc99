//! Line-oriented presenter over any reader and writer.
//!
//! I/O failures inside [`Presenter`] callbacks cannot be returned directly,
//! so the first one is kept and the respondent is treated as having quit.
//! Call [`Terminal::take_error`] after the assessment loop returns.

use std::io::{self, BufRead, Write};

use mamalift_core::models::appointment::AppointmentSlot;
use mamalift_core::models::classification::{Classification, ProgramType};
use mamalift_core::models::crisis::CrisisResource;
use mamalift_core::models::demographics::{ReferralSource, SessionType};
use mamalift_core::models::insurance::InsuranceProvider;
use mamalift_core::models::summary::RegistrationSummary;
use mamalift_registration::forms::{
    FieldErrors, InsuranceField, InsuranceForm, PersonalField, PersonalizationForm,
};
use mamalift_registration::matching;
use mamalift_registration::presenter::{Presenter, Selection};
use mamalift_registration::session::QuestionView;

/// Parse one line typed at a question prompt.
///
/// Option numbers are 1-based on screen. Out-of-range numbers are passed
/// through so the session can report them.
pub fn parse_selection(line: &str) -> Option<Selection> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "n" | "next" => Some(Selection::Next),
        "p" | "b" | "back" | "previous" => Some(Selection::Previous),
        "h" | "help" => Some(Selection::Help),
        "q" | "quit" => Some(Selection::Quit),
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => Some(Selection::Choose(n - 1)),
            _ => None,
        },
    }
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
    error: Option<io::Error>,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            error: None,
        }
    }

    /// First I/O error hit while rendering, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn fail(&mut self, e: io::Error) -> Selection {
        tracing::error!(error = %e, "terminal I/O failed");
        if self.error.is_none() {
            self.error = Some(e);
        }
        Selection::Quit
    }

    fn try_intro(&mut self) -> io::Result<Selection> {
        writeln!(self.output, "MamaLift: postpartum support registration")?;
        writeln!(self.output)?;
        writeln!(
            self.output,
            "We'll start with 10 short questions about how you have felt in the past 7 days."
        )?;
        writeln!(
            self.output,
            "Your answers help us find the right level of care. They are confidential."
        )?;
        write!(self.output, "Press Enter to begin, h for support resources, or q to quit: ")?;
        self.output.flush()?;
        Ok(match self.read_line()? {
            None => Selection::Quit,
            Some(line) => parse_selection(&line).unwrap_or(Selection::Next),
        })
    }

    fn try_question(&mut self, view: &QuestionView<'_>) -> io::Result<Selection> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Question {} of {} ({:.0}%)",
            view.number, view.total, view.progress
        )?;
        writeln!(self.output, "{}", view.question.prompt)?;
        if let Some(context) = &view.question.context {
            writeln!(self.output, "  {context}")?;
        }
        for (i, option) in view.question.options.iter().enumerate() {
            let marker = if view.selected == Some(i) { '*' } else { ' ' };
            writeln!(self.output, " {marker} {}) {}", i + 1, option.text)?;
        }

        loop {
            let mut hints = vec![format!("1-{} choose", view.question.options.len())];
            if view.can_go_next {
                hints.push("n next".to_string());
            }
            if view.can_go_previous {
                hints.push("p back".to_string());
            }
            hints.push("h help".to_string());
            hints.push("q quit".to_string());
            write!(self.output, "[{}] > ", hints.join(", "))?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(Selection::Quit);
            };
            match parse_selection(&line) {
                Some(selection) => return Ok(selection),
                None => writeln!(self.output, "Please enter an option number, n, p, h or q.")?,
            }
        }
    }

    fn try_crisis(&mut self, resources: &[CrisisResource]) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Your safety comes first.")?;
        writeln!(
            self.output,
            "Thank you for telling us. You deserve support right now, and you don't have to go through this alone."
        )?;
        writeln!(
            self.output,
            "If you are in immediate danger, call 911 or go to your nearest emergency room."
        )?;
        self.try_resources(resources)
    }

    fn try_resources(&mut self, resources: &[CrisisResource]) -> io::Result<()> {
        writeln!(self.output)?;
        for resource in resources {
            writeln!(self.output, "  {}: {}", resource.name, resource.contact)?;
            writeln!(self.output, "    {}", resource.description)?;
        }
        self.output.flush()
    }

    fn try_results(&mut self, classification: &Classification) -> io::Result<()> {
        let program = classification.program_type;
        writeln!(self.output)?;
        writeln!(self.output, "Assessment complete.")?;
        writeln!(self.output, "Recommended: {program}")?;
        if let Some(cadence) = program.session_cadence() {
            writeln!(self.output, "  {cadence}")?;
        }
        if let Some(hours) = program.first_appointment_within_hours() {
            writeln!(self.output, "  First appointment within {hours} hours")?;
        }
        if !program.is_eligible() {
            writeln!(
                self.output,
                "Based on your answers, you may benefit from more intensive support than this program offers."
            )?;
        }
        self.output.flush()
    }

    /// Show support resources outside of the assessment loop.
    pub fn show_resources(&mut self, resources: &[CrisisResource]) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "These services can help you find the right care:")?;
        self.try_resources(resources)
    }

    pub fn show_field_errors(&mut self, errors: &FieldErrors) -> io::Result<()> {
        writeln!(self.output)?;
        for (field, message) in errors.iter() {
            writeln!(self.output, "  ! {field}: {message}")?;
        }
        self.output.flush()
    }

    /// Free-text field. Enter keeps the current value.
    fn ask(&mut self, label: &str, current: &str) -> io::Result<Option<String>> {
        if current.is_empty() {
            write!(self.output, "{label}: ")?;
        } else {
            write!(self.output, "{label} [{current}]: ")?;
        }
        self.output.flush()?;
        Ok(self.read_line()?.map(|line| {
            let line = line.trim();
            if line.is_empty() {
                current.to_string()
            } else {
                line.to_string()
            }
        }))
    }

    /// Numbered list of `(value, label)` choices. A number picks that value,
    /// anything else is taken as typed.
    fn choose(
        &mut self,
        label: &str,
        choices: &[(&str, String)],
        current: &str,
    ) -> io::Result<Option<String>> {
        writeln!(self.output, "{label}:")?;
        for (i, (_, text)) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {text}", i + 1)?;
        }
        let Some(answer) = self.ask("Choice", current)? else {
            return Ok(None);
        };
        let picked = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| choices.get(i))
            .map(|(value, _)| (*value).to_string());
        Ok(Some(picked.unwrap_or(answer)))
    }

    /// Prompt for personal details. On a retry only fields with errors are
    /// asked again. Returns `false` at end of input.
    pub fn fill_personalization(
        &mut self,
        form: &mut PersonalizationForm,
        program: ProgramType,
    ) -> io::Result<bool> {
        let retry = !form.errors().is_empty();
        if !retry {
            writeln!(self.output)?;
            writeln!(self.output, "Tell us about yourself ({program}).")?;
        }
        let wanted = |errors: &FieldErrors, field: PersonalField| {
            !retry || errors.contains(field.key())
        };

        let text_fields = [
            (PersonalField::FirstName, "First name"),
            (PersonalField::LastName, "Last name"),
            (PersonalField::DateOfBirth, "Date of birth (optional)"),
            (PersonalField::Email, "Email"),
            (PersonalField::Phone, "Phone"),
            (PersonalField::ZipCode, "Zip code"),
        ];
        for (field, label) in text_fields {
            if !wanted(form.errors(), field) {
                continue;
            }
            let current = personal_value(form, field).to_string();
            let Some(value) = self.ask(label, &current)? else {
                return Ok(false);
            };
            form.set(field, value);
        }

        if wanted(form.errors(), PersonalField::SessionType) {
            let choices: Vec<(&str, String)> = SessionType::ALL
                .iter()
                .map(|s| (s.id(), s.label().to_string()))
                .collect();
            let current = form.session_type.clone();
            let Some(value) = self.choose("Preferred session type (optional)", &choices, &current)?
            else {
                return Ok(false);
            };
            form.set(PersonalField::SessionType, value);
        }

        if wanted(form.errors(), PersonalField::ReferralSource) {
            let choices: Vec<(&str, String)> = ReferralSource::ALL
                .iter()
                .map(|r| (r.label(), r.label().to_string()))
                .collect();
            let current = form.referral_source.clone();
            let Some(value) = self.choose("How did you hear about us?", &choices, &current)? else {
                return Ok(false);
            };
            form.set(PersonalField::ReferralSource, value);
        }

        if !retry && form.shows_provider_field() {
            let current = form.provider_name.clone();
            let Some(value) = self.ask("Referring provider's name (optional)", &current)? else {
                return Ok(false);
            };
            form.set(PersonalField::ProviderName, value);
        }
        Ok(true)
    }

    /// Prompt for insurance and an appointment slot. Returns `false` at end
    /// of input.
    pub fn fill_insurance(
        &mut self,
        form: &mut InsuranceForm,
        program: ProgramType,
        session_type: Option<SessionType>,
    ) -> io::Result<bool> {
        let retry = !form.errors().is_empty();
        if !retry {
            let therapist = matching::matched_therapist();
            writeln!(self.output)?;
            writeln!(self.output, "Your match: {}, {}", therapist.name, therapist.credentials)?;
            writeln!(self.output, "  {} ({})", therapist.specialty, therapist.experience)?;
            writeln!(self.output, "  Rating {}", therapist.rating)?;
            writeln!(self.output, "Coverage: {}", matching::coverage_summary(program))?;
        }
        let wanted = |errors: &FieldErrors, field: InsuranceField| {
            !retry || errors.contains(field.key())
        };

        if wanted(form.errors(), InsuranceField::Provider) {
            let choices: Vec<(&str, String)> = InsuranceProvider::ALL
                .iter()
                .map(|p| (p.id(), p.name().to_string()))
                .collect();
            let current = form.provider.clone();
            let Some(value) = self.choose("Insurance provider", &choices, &current)? else {
                return Ok(false);
            };
            form.set(InsuranceField::Provider, value);
        }
        if wanted(form.errors(), InsuranceField::MemberId) {
            let current = form.member_id.clone();
            let Some(value) = self.ask("Member ID", &current)? else {
                return Ok(false);
            };
            form.set(InsuranceField::MemberId, value);
        }
        if !retry {
            let current = form.group_number.clone();
            let Some(value) = self.ask("Group number (optional)", &current)? else {
                return Ok(false);
            };
            form.set(InsuranceField::GroupNumber, value);
        }
        if wanted(form.errors(), InsuranceField::Appointment) {
            let medium = SessionType::appointment_medium(session_type);
            let choices: Vec<(&str, String)> = matching::available_slots()
                .iter()
                .map(|slot| (slot.id.as_str(), slot_label(slot, program, medium)))
                .collect();
            let current = form.selected_appointment.clone();
            let Some(value) = self.choose("First appointment", &choices, &current)? else {
                return Ok(false);
            };
            form.set(InsuranceField::Appointment, value);
        }
        Ok(true)
    }

    pub fn show_summary(&mut self, summary: &RegistrationSummary) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Welcome to {}, {}!",
            summary.program_type, summary.first_name
        )?;
        writeln!(
            self.output,
            "  Therapist: {}, {}",
            summary.therapist.name, summary.therapist.credentials
        )?;
        writeln!(
            self.output,
            "  First session: {} at {} ({})",
            summary.appointment.day,
            summary.appointment.time,
            SessionType::appointment_medium(summary.session_type)
        )?;
        writeln!(self.output, "  Login details sent to {}", summary.email)?;
        self.output.flush()
    }
}

fn personal_value(form: &PersonalizationForm, field: PersonalField) -> &str {
    match field {
        PersonalField::FirstName => &form.first_name,
        PersonalField::LastName => &form.last_name,
        PersonalField::DateOfBirth => &form.date_of_birth,
        PersonalField::Email => &form.email,
        PersonalField::Phone => &form.phone,
        PersonalField::ZipCode => &form.zip_code,
        PersonalField::SessionType => &form.session_type,
        PersonalField::ReferralSource => &form.referral_source,
        PersonalField::ProviderName => &form.provider_name,
    }
}

fn slot_label(slot: &AppointmentSlot, program: ProgramType, medium: &str) -> String {
    let mut label = format!("{} {} ({medium})", slot.day, slot.time);
    if matching::is_highlighted(slot, program) {
        label.push_str(" - priority");
    }
    label
}

impl<R: BufRead, W: Write> Presenter for Terminal<R, W> {
    fn render_intro(&mut self) -> Selection {
        self.try_intro().unwrap_or_else(|e| self.fail(e))
    }

    fn render_question(&mut self, view: &QuestionView<'_>) -> Selection {
        self.try_question(view).unwrap_or_else(|e| self.fail(e))
    }

    fn render_crisis_screen(&mut self, resources: &[CrisisResource]) {
        if let Err(e) = self.try_crisis(resources) {
            self.fail(e);
        }
    }

    fn render_results_screen(&mut self, classification: &Classification) {
        if let Err(e) = self.try_results(classification) {
            self.fail(e);
        }
    }

    fn render_notice(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "  ! {message}") {
            self.fail(e);
        }
    }
}
