//! Progress bars for loudness extraction and rendering.

use crate::selector::ProgressObserver;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress bar driven by [`ProgressObserver`] updates.
///
/// The bar is created on the first update, once the total is known. A
/// disabled reporter ignores everything.
#[derive(Debug)]
pub struct ProgressReporter {
    enabled: bool,
    template: String,
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Reporter for the loudness pass over audio chunks.
    #[must_use]
    pub fn analysis(file_name: &str, enabled: bool) -> Self {
        Self::new(
            format!("[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} chunks - {file_name}"),
            enabled,
        )
    }

    /// Reporter for rendering the kept segments.
    #[must_use]
    pub fn render(file_name: &str, enabled: bool) -> Self {
        Self::new(
            format!(
                "{{spinner:.green}} [{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} segments - {file_name}"
            ),
            enabled,
        )
    }

    fn new(template: String, enabled: bool) -> Self {
        Self {
            enabled,
            template,
            bar: None,
        }
    }

    fn create_bar(&self, total: Option<usize>) -> ProgressBar {
        let pb = match total {
            Some(total) => ProgressBar::new(total as u64),
            None => ProgressBar::new_spinner(),
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(&self.template)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░ "),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

impl ProgressObserver for ProgressReporter {
    fn on_progress(&mut self, done: usize, total: Option<usize>) {
        if !self.enabled {
            return;
        }
        if self.bar.is_none() {
            self.bar = Some(self.create_bar(total));
        }
        if let Some(pb) = &self.bar {
            pb.set_position(done as u64);
        }
    }

    fn on_finish(&mut self, done: usize) {
        if let Some(pb) = self.bar.take() {
            pb.set_position(done as u64);
            pb.finish_and_clear();
        }
    }
}
