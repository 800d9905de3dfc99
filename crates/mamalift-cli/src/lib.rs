//! mamalift-cli library root.
//!
//! Re-exports the terminal front end so that integration tests can drive a
//! full registration over in-memory input and output.

pub mod config;
pub mod terminal;
pub mod wizard;
