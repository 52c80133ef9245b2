//! Processing pipeline components.

mod paths;
mod processor;

pub use paths::{output_path_for, prepare_output, preview_path_for};
pub use processor::{CutMode, CutOptions, CutReport, cut_file};
