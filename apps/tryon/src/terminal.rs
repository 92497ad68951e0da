//! Draws the try-on view on a terminal.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tryon_async::ui::{Notifier, ResultView};

/// Progress bar on stderr plus colored alerts.
#[derive(Default)]
pub struct TerminalUi {
    bar: Option<ProgressBar>,
}

impl TerminalUi {
    fn bar(&mut self) -> &ProgressBar {
        self.bar.get_or_insert_with(|| {
            let bar = ProgressBar::new(100);
            if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {msg}") {
                bar.set_style(style.progress_chars("=> "));
            }
            bar
        })
    }
}

impl Notifier for TerminalUi {
    fn alert(&mut self, message: &str) {
        let line = message.red().bold();
        match &self.bar {
            Some(bar) => bar.suspend(|| eprintln!("{line}")),
            None => eprintln!("{line}"),
        }
    }

    fn render(&mut self, view: &ResultView) {
        if !view.progress.is_visible() {
            if let Some(bar) = self.bar.take() {
                bar.finish_and_clear();
            }
            return;
        }

        let label = match view.progress.status() {
            Some(status) => format!("{} {}", view.progress.label(), status.dimmed()),
            None => view.progress.label(),
        };
        let width = view.progress.width() as u64;
        let bar = self.bar();
        bar.set_position(width);
        bar.set_message(label);
    }
}

impl Drop for TerminalUi {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
