//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod apply;
mod completions;
mod utils;
mod validate;

pub use apply::handle_apply;
pub use completions::handle_completions;
pub use validate::handle_validate;
