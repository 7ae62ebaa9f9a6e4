//! Command implementations.

pub mod autopost;
pub mod build;
