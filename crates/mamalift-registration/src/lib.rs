//! mamalift-registration
//!
//! The four-step registration session: EPDS screening, results, personal
//! details and insurance/therapist matching. Synchronous and in-memory. A
//! [`session::RegistrationSession`] owns all state for one respondent;
//! presentation code reads it through [`session::Screen`] and drives it
//! through a [`presenter::Presenter`].

pub mod crisis;
pub mod error;
pub mod flow;
pub mod forms;
pub mod matching;
pub mod navigator;
pub mod presenter;
pub mod session;
pub mod store;
