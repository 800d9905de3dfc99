//! mamalift-core
//!
//! Pure domain types for the MamaLift registration flow. No I/O and no
//! screening logic; this is the shared vocabulary between the instrument
//! crate, the registration session and the web frontend (via `ts-rs`).

pub mod error;
pub mod models;
