//! Progress reporting module

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;
use textstat_core::{ProcessingStage, ProgressObserver};

const BAR_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}";
const SPINNER_TEMPLATE: &str = "[{elapsed_precise}] {spinner} {bytes} {msg}";

/// Progress reporter driven by pipeline notifications
pub struct ProgressReporter {
    progress_bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter; a quiet reporter draws nothing
    pub fn new(quiet: bool) -> Self {
        let progress_bar = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
            if let Ok(style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        Self { progress_bar }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

impl ProgressObserver for ProgressReporter {
    fn on_stage(&self, stage: ProcessingStage) {
        if stage == ProcessingStage::Scanning {
            self.progress_bar.reset();
        }
        self.progress_bar.set_message(stage.to_string());
    }

    fn on_bytes(&self, read: u64, total: Option<u64>) {
        if let Some(total) = total {
            if self.progress_bar.length() != Some(total) {
                self.progress_bar.set_length(total);
                if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
                    self.progress_bar.set_style(style.progress_chars("##-"));
                }
            }
        }
        self.progress_bar.set_position(read);
    }
}
