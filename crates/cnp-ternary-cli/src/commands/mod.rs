//! Subcommand implementations.

pub mod normalize;
pub mod perimeter;
pub mod project;
pub mod ratios;
