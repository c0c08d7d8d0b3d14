//! Console progress display driven by pipeline events.

use colored::Colorize;
use council_application::ProgressSink;
use council_domain::{Actor, EventStatus, ProgressEvent};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Renders one spinner per active stage; participant completions tick
/// through as colored messages.
pub struct ConsoleProgress {
    multi: MultiProgress,
    current: Mutex<Option<ProgressBar>>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            current: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ConsoleProgress {
    fn emit(&self, event: ProgressEvent) {
        let mut current = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        match (&event.actor, event.status) {
            (Actor::System, EventStatus::Started) => {
                let bar = self.multi.add(ProgressBar::new_spinner());
                bar.set_style(Self::stage_style());
                bar.set_prefix(event.stage.display_name().to_string());
                bar.set_message(event.detail.unwrap_or_else(|| "working...".to_string()));
                bar.enable_steady_tick(Duration::from_millis(120));
                *current = Some(bar);
            }
            (Actor::System, EventStatus::Done) => {
                if let Some(bar) = current.take() {
                    let label = format!("{} {}", event.stage.display_name(), "done".green());
                    bar.finish_with_message(
                        event.detail.map(|d| format!("{label} ({d})")).unwrap_or(label),
                    );
                }
            }
            (Actor::System, EventStatus::Error) => {
                if let Some(bar) = current.take() {
                    bar.finish_with_message(format!(
                        "{} {}",
                        "degraded:".yellow(),
                        event.detail.unwrap_or_default()
                    ));
                }
            }
            (Actor::Participant(id), EventStatus::Done) => {
                if let Some(bar) = current.as_ref() {
                    let mut message = format!("{} {}", "v".green(), id);
                    if let Some(detail) = &event.detail {
                        message.push_str(&format!(" ({detail})"));
                    }
                    bar.set_message(message);
                }
            }
            (Actor::Participant(id), EventStatus::Error) => {
                if let Some(bar) = current.as_ref() {
                    bar.set_message(format!("{} {} (failed)", "x".red(), id));
                }
            }
            (Actor::Participant(_), EventStatus::Started) => {}
        }
    }
}
