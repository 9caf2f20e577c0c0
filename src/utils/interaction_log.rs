//! Appends question/response pairs to a JSON array file.
//!
//! The log is a single pretty-printed array so it can be inspected (or fed
//! back into the document corpus) without tooling. The whole array is
//! rewritten on every append; an unreadable existing file is discarded
//! rather than blocking the reply.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while writing the interaction log.
#[derive(Error, Debug)]
pub enum InteractionLogError {
    /// Error reading or writing the log file.
    #[error("Unable to access interaction log: {0}")]
    Io(#[from] io::Error),

    /// Error serializing the log entries.
    #[error("Unable to serialize interaction log: {0}")]
    Json(#[from] serde_json::Error),
}

/// One logged question/response exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub question: String,
    pub response: String,
    /// Defaults on read so logs from older deployments without timestamps
    /// still load.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

/// Appends one record to the JSON array at `path`, creating the file and any
/// parent directories if absent. A corrupt existing file is replaced by a
/// fresh array.
pub fn save_interaction(
    path: &Path,
    question: &str,
    response: &str,
) -> Result<(), InteractionLogError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut records = match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str::<Vec<InteractionRecord>>(&contents)
            .unwrap_or_else(|e| {
                warn!(
                    "Discarding unreadable interaction log {}: {}",
                    path.display(),
                    e
                );
                Vec::new()
            }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    records.push(InteractionRecord {
        question: question.to_string(),
        response: response.to_string(),
        timestamp: Utc::now(),
    });

    fs::write(path, serde_json::to_string_pretty(&records)?)?;

    Ok(())
}
