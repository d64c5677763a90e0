//! services/api/src/adapters/journal.rs
//!
//! This module contains the flat-file journal adapter, the concrete
//! implementation of the `InteractionJournal` port.
//!
//! All appends flow through a single writer task that owns the file, so rows
//! from concurrent requests are serialized and never interleave. Callers send
//! the record plus a oneshot ack over an mpsc channel and await the write
//! result.

use async_trait::async_trait;
use calmind_core::domain::Interaction;
use calmind_core::ports::{InteractionJournal, PortError, PortResult};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};

/// Column header written once, when the file does not yet exist.
pub const CSV_HEADER: &str = "Text,Emotion,Timestamp";

/// Depth of the writer task's mailbox before appenders start waiting.
const CHANNEL_CAPACITY: usize = 64;

struct AppendRequest {
    interaction: Interaction,
    ack: oneshot::Sender<PortResult<()>>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A journal adapter that serializes CSV appends through one writer task.
#[derive(Clone)]
pub struct CsvJournal {
    tx: mpsc::Sender<AppendRequest>,
}

impl CsvJournal {
    /// Spawns the writer task owning `path` and returns a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, mut rx) = mpsc::channel::<AppendRequest>(CHANNEL_CAPACITY);

        tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                let result = write_row(&path, &request.interaction)
                    .await
                    .map_err(|e| PortError::Unexpected(e.to_string()));
                // The appender may have given up waiting; that is fine.
                let _ = request.ack.send(result);
            }
        });

        Self { tx }
    }
}

//=========================================================================================
// `InteractionJournal` Trait Implementation
//=========================================================================================

#[async_trait]
impl InteractionJournal for CsvJournal {
    /// Appends one row, waiting for the writer task to confirm the write.
    async fn append(&self, interaction: &Interaction) -> PortResult<()> {
        let (ack, result) = oneshot::channel();
        self.tx
            .send(AppendRequest {
                interaction: interaction.clone(),
                ack,
            })
            .await
            .map_err(|_| PortError::Unexpected("mood log writer task has stopped".to_string()))?;

        result
            .await
            .map_err(|_| PortError::Unexpected("mood log writer dropped the request".to_string()))?
    }
}

//=========================================================================================
// Writer Internals
//=========================================================================================

/// Appends one CSV row, creating the directory and header on first use.
async fn write_row(path: &Path, interaction: &Interaction) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let needs_header = !fs::try_exists(path).await?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;

    let mut chunk = String::new();
    if needs_header {
        chunk.push_str(CSV_HEADER);
        chunk.push('\n');
    }
    chunk.push_str(&format!(
        "{},{},{}\n",
        csv_field(&interaction.text),
        csv_field(interaction.emotion.as_str()),
        csv_field(&interaction.timestamp),
    ));

    file.write_all(chunk.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

/// Quotes a field when it contains a comma, quote, or line break, doubling
/// any inner quotes.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use calmind_core::domain::Emotion;
    use std::sync::Arc;

    fn entry(text: &str, emotion: Emotion) -> Interaction {
        Interaction::new(text.to_string(), emotion)
    }

    #[tokio::test]
    async fn writes_header_once_and_appends_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_logs.csv");

        let journal = CsvJournal::spawn(path.clone());
        journal.append(&entry("first", Emotion::Positive)).await.unwrap();
        journal.append(&entry("second", Emotion::Negative)).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with("first,positive,"));
        assert!(lines[2].starts_with("second,negative,"));
    }

    #[tokio::test]
    async fn does_not_repeat_header_across_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_logs.csv");

        let first = CsvJournal::spawn(path.clone());
        first.append(&entry("before restart", Emotion::Neutral)).await.unwrap();
        drop(first);

        let second = CsvJournal::spawn(path.clone());
        second.append(&entry("after restart", Emotion::Neutral)).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.matches(CSV_HEADER).count(),
            1,
            "header must be written exactly once"
        );
        assert_eq!(contents.lines().count(), 3);
    }

    #[tokio::test]
    async fn quotes_fields_containing_delimiters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_logs.csv");

        let journal = CsvJournal::spawn(path.clone());
        journal
            .append(&entry("well, \"fine\" I guess", Emotion::Neutral))
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"well, \"\"fine\"\" I guess\",neutral,"));
    }

    #[tokio::test]
    async fn concurrent_appends_never_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_logs.csv");

        let journal = Arc::new(CsvJournal::spawn(path.clone()));
        let mut handles = Vec::new();
        for i in 0..20 {
            let journal = journal.clone();
            handles.push(tokio::spawn(async move {
                journal
                    .append(&entry(&format!("entry {}", i), Emotion::Neutral))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 21);
        assert_eq!(lines[0], CSV_HEADER);
        for line in &lines[1..] {
            // Every row is complete: text, label, timestamp.
            assert_eq!(line.split(',').count(), 3, "corrupt row: {line}");
            assert!(line.contains(",neutral,"));
        }
    }
}
