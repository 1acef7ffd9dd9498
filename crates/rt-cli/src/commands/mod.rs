//! CLI subcommand implementations.

pub mod best;
pub mod classify;
pub mod run;
pub mod segments;
pub mod util;
