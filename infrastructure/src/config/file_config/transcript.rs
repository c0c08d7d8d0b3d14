//! Deliberation transcript configuration (`[transcript]` section).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Optional JSONL transcript of progress events; disabled when no path
/// is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSection {
    pub path: Option<PathBuf>,
}
