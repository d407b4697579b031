//! CLI command implementations.

pub mod common;
pub mod patches;
pub mod render;
pub mod wavetable;
