//! Save drafts once the athlete stops typing.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::performance::ScoreSheet;
use crate::storage::save_state;

/// Default quiet period before a draft is written
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_secs(1);

/// Background writer that keeps only the latest value and writes it after
/// `delay` passes with no newer value. Every update restarts the wait.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    handle: JoinHandle<usize>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Start the writer task. Must be called inside a tokio runtime.
    pub fn spawn<F>(delay: Duration, write: F) -> Self
    where
        F: FnMut(&T) -> Result<()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(rx, delay, write));
        Self { tx, handle }
    }

    /// Queue a new value, replacing any that is still waiting
    pub fn update(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::warn!("autosave task has stopped, update dropped");
        }
    }

    /// Flush the pending value, if any, and stop. Returns how many writes
    /// the task performed.
    pub async fn finish(self) -> Result<usize> {
        drop(self.tx);
        self.handle.await.context("Autosave task failed")
    }
}

async fn run<T, F>(mut rx: mpsc::UnboundedReceiver<T>, delay: Duration, mut write: F) -> usize
where
    F: FnMut(&T) -> Result<()>,
{
    let mut pending: Option<T> = None;
    let mut writes = 0;

    loop {
        if pending.is_some() {
            tokio::select! {
                next = rx.recv() => match next {
                    Some(value) => pending = Some(value),
                    None => break,
                },
                _ = tokio::time::sleep(delay) => {
                    if let Some(value) = pending.take() {
                        writes += flush(&mut write, &value);
                    }
                }
            }
        } else {
            match rx.recv().await {
                Some(value) => pending = Some(value),
                None => break,
            }
        }
    }

    // Channel closed: whatever is still pending goes out now
    if let Some(value) = pending.take() {
        writes += flush(&mut write, &value);
    }

    writes
}

fn flush<T, F>(write: &mut F, value: &T) -> usize
where
    F: FnMut(&T) -> Result<()>,
{
    match write(value) {
        Ok(()) => 1,
        Err(e) => {
            tracing::warn!("autosave failed: {:#}", e);
            0
        }
    }
}

/// Draft file inside the data directory
pub fn get_draft_path(data_dir: &Path) -> PathBuf {
    data_dir.join("draft.json")
}

/// Debouncer that writes score sheets to `path`
pub fn spawn_draft_saver(path: PathBuf, delay: Duration) -> Debouncer<ScoreSheet> {
    Debouncer::spawn(delay, move |sheet: &ScoreSheet| {
        save_state(&path, sheet, "draft")?;
        tracing::debug!(completed = sheet.completed(), "draft saved");
        Ok(())
    })
}

/// Load a leftover draft, if one exists and is readable
pub fn load_draft(path: &Path) -> Option<ScoreSheet> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(sheet) => Some(sheet),
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring unreadable draft: {}", e);
            None
        }
    }
}

/// Remove the draft once its performance is saved
pub fn clear_draft(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove draft at {}", path.display()))?;
    }
    Ok(())
}
