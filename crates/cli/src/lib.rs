//! Command-line front end for the skillrec recommender.
//!
//! Loads the layered configuration, opens a skill profile file and answers
//! `recommend`, `skills`, `inspect` and `config` commands.

#![deny(unsafe_code)]

mod app;
/// Command-line argument definitions.
pub mod cli;

pub use app::run;
