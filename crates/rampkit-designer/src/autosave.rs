//! Debounced background project writes.
//!
//! Every [`AutosaveHandle::schedule`] replaces the pending project and
//! restarts the timer, so a burst of edits produces a single write once the
//! editor goes quiet. Writes run on the blocking pool. Write failures are
//! logged and otherwise ignored; the in-memory session never depends on them.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use rampkit_core::constants::AUTOSAVE_DEBOUNCE_MS;

use crate::project::{PersistedProject, ProjectStore};

enum Command {
    Schedule(Box<PersistedProject>),
    Cancel,
    Flush(oneshot::Sender<()>),
    Shutdown,
}

/// Owner of the autosave task. Dropping it cancels any pending write.
#[derive(Debug)]
pub struct AutosaveHandle {
    tx: mpsc::UnboundedSender<Command>,
    task: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Schedule(_) => f.write_str("Schedule"),
            Command::Cancel => f.write_str("Cancel"),
            Command::Flush(_) => f.write_str("Flush"),
            Command::Shutdown => f.write_str("Shutdown"),
        }
    }
}

impl AutosaveHandle {
    /// Spawns the worker on the current tokio runtime with the default
    /// debounce.
    pub fn spawn<S>(store: S) -> Self
    where
        S: ProjectStore + Send + Sync + 'static,
    {
        Self::with_debounce(store, Duration::from_millis(AUTOSAVE_DEBOUNCE_MS))
    }

    pub fn with_debounce<S>(store: S, debounce: Duration) -> Self
    where
        S: ProjectStore + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(Arc::new(store), debounce, rx));
        Self {
            tx,
            task: Some(task),
        }
    }

    /// Replaces the pending project and restarts the timer.
    pub fn schedule(&self, project: PersistedProject) {
        self.send(Command::Schedule(Box::new(project)));
    }

    /// Drops the pending project, if any.
    pub fn cancel(&self) {
        self.send(Command::Cancel);
    }

    /// Writes the pending project now and waits for the write to finish.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.send(Command::Flush(ack_tx));
        let _ = ack_rx.await;
    }

    /// Cancels any pending write and waits for the worker to exit.
    pub async fn shutdown(mut self) {
        self.send(Command::Shutdown);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn send(&self, command: Command) {
        if self.tx.send(command).is_err() {
            debug!("Autosave worker already stopped");
        }
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn write<S>(store: &Arc<S>, project: Box<PersistedProject>)
where
    S: ProjectStore + Send + Sync + 'static,
{
    let store = Arc::clone(store);
    let count = project.objects.len();
    match tokio::task::spawn_blocking(move || store.save(&project)).await {
        Ok(Ok(())) => debug!("Autosaved {} objects", count),
        Ok(Err(e)) => warn!("Autosave failed: {}", e),
        Err(e) => warn!("Autosave task failed: {}", e),
    }
}

async fn run<S>(store: Arc<S>, debounce: Duration, mut rx: mpsc::UnboundedReceiver<Command>)
where
    S: ProjectStore + Send + Sync + 'static,
{
    let mut pending: Option<Box<PersistedProject>> = None;

    loop {
        let command = if pending.is_some() {
            tokio::select! {
                command = rx.recv() => command,
                _ = tokio::time::sleep(debounce) => {
                    if let Some(project) = pending.take() {
                        write(&store, project).await;
                    }
                    continue;
                }
            }
        } else {
            rx.recv().await
        };

        match command {
            Some(Command::Schedule(project)) => pending = Some(project),
            Some(Command::Cancel) => pending = None,
            Some(Command::Flush(ack)) => {
                if let Some(project) = pending.take() {
                    write(&store, project).await;
                }
                let _ = ack.send(());
            }
            Some(Command::Shutdown) | None => break,
        }
    }
}
