//! Input/Output for gradient runs
//!
//! This module handles logging setup and the gradient file.

mod gradient_file;
mod output;

pub use gradient_file::{GradientWriter, GRADIENT_FILE};
pub use output::setup_output;
