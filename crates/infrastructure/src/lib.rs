//! Matchrelay Infrastructure Layer
pub mod relay;
pub mod rules;
