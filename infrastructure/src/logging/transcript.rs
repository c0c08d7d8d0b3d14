//! JSONL deliberation transcript.
//!
//! A [`ProgressSink`] that appends one JSON object per progress event,
//! timestamped, so a finished run leaves an auditable record of who did
//! what and in which order.

use council_application::ProgressSink;
use council_domain::ProgressEvent;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlTranscript {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTranscript {
    /// Create a transcript at the given path, creating parent
    /// directories as needed. Returns `None` (with a warning) when the
    /// file cannot be created; a missing transcript never blocks a run.
    pub fn create(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(error) = std::fs::create_dir_all(parent)
        {
            warn!(
                "could not create transcript directory {}: {error}",
                parent.display()
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(file) => file,
            Err(error) => {
                warn!("could not create transcript file {}: {error}", path.display());
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressSink for JsonlTranscript {
    fn emit(&self, event: ProgressEvent) {
        let record = serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "stage": event.stage.as_str(),
            "actor": event.actor.name(),
            "status": event.status.as_str(),
            "detail": event.detail,
        });

        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(error) = writeln!(writer, "{record}") {
            warn!("could not write transcript line: {error}");
        }
    }
}

impl Drop for JsonlTranscript {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{Actor, Stage};

    #[test]
    fn events_are_written_as_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");

        {
            let transcript = JsonlTranscript::create(&path).unwrap();
            transcript.emit(
                ProgressEvent::started(Stage::Generate, Actor::System)
                    .with_detail("3 members drafting"),
            );
            transcript.emit(ProgressEvent::error(
                Stage::Generate,
                Actor::Participant("beta".into()),
                "quota exceeded",
            ));
        } // drop flushes

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["stage"], "generate");
        assert_eq!(first["actor"], "system");
        assert_eq!(first["status"], "started");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["actor"], "beta");
        assert_eq!(second["status"], "error");
        assert_eq!(second["detail"], "quota exceeded");
    }

    #[test]
    fn parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("run.jsonl");
        let transcript = JsonlTranscript::create(&path).unwrap();
        assert_eq!(transcript.path(), path);
        assert!(path.parent().unwrap().exists());
    }
}
