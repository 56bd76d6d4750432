//! Core types for the ChesterGL build orchestrator
//!
//! This crate holds the error taxonomy shared by the build pipeline and the
//! command-line front end, together with the fixed extern and source lists
//! that every build compiles.

pub mod error;
pub mod sources;

pub use error::{ChesterError, ChesterResult};
pub use sources::FileLists;
