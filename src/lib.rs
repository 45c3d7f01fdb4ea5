//! Bowling tracker (workspace facade crate).
//!
//! Re-exports the member crates under stable module names and hosts the pieces the
//! binary is built from: argument parsing ([`cli`]) and the interactive scorekeeping
//! session ([`session`]).

pub mod cli;
pub mod session;

pub use bowling_adapter as adapter;
pub use bowling_core as core;
pub use bowling_input as input;
pub use bowling_term as term;
pub use bowling_types as types;
