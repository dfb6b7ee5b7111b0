//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Reports are written
//! through [`output`] in the configured format.

pub mod output;
pub mod price;
pub mod scenario;
pub mod simulate;
