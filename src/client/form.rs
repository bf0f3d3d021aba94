//! Listing form controller with debounced autosave
//!
//! Manages the draft of one listing. Every edit schedules a save after a
//! quiet period (trailing-edge debounce): a new edit cancels the pending
//! timer and restarts it with the newer snapshot, so at most one save fires
//! per quiet interval and it always carries the latest state.
//!
//! Every write — autosave and publish alike — goes through a single ordered
//! queue drained by one writer task, so no two writes for the same draft
//! can ever apply out of order. Publishing flushes any pending debounced
//! save into the queue first, preserving trigger order: edits land before
//! the publish flip.
//!
//! The first successful save of a new draft captures the identifier the
//! store assigned; from then on saves are updates. Save failures are logged
//! and swallowed — the controller keeps editing state and retries nothing.

use super::api::ListingsClient;
use super::error::ClientError;
use crate::core::listing::Listing;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::warn;

/// Quiet period between the last edit and the autosave it triggers.
pub const AUTOSAVE_QUIET_PERIOD: Duration = Duration::from_millis(700);

/// Where the form currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Fetching the existing record (editing an existing listing only).
    LoadingInitial,
    /// Accepting edits; a debounce timer may be pending.
    Editing,
    /// A save is in flight.
    Saving,
}

/// Observable state of the draft's save session.
#[derive(Debug, Clone)]
pub struct FormSession {
    pub phase: FormPhase,
    /// Identifier of the stored document, once the first save succeeded.
    pub document_id: Option<String>,
    pub last_saved: Option<DateTime<Utc>>,
}

enum WriteOp {
    Save(Listing),
    Publish { publish: bool },
    Flush(oneshot::Sender<()>),
}

/// Controller for one listing draft.
pub struct ListingFormController {
    draft: Listing,
    quiet_period: Duration,
    queue: mpsc::UnboundedSender<WriteOp>,
    pending_save: Option<JoinHandle<()>>,
    session: watch::Receiver<FormSession>,
}

impl ListingFormController {
    /// Start editing a brand-new listing. Skips the loading phase.
    pub fn new(client: ListingsClient) -> Self {
        let (session_tx, session_rx) = watch::channel(FormSession {
            phase: FormPhase::Editing,
            document_id: None,
            last_saved: None,
        });
        Self {
            draft: Listing::default(),
            quiet_period: AUTOSAVE_QUIET_PERIOD,
            queue: spawn_writer(client, session_tx),
            pending_save: None,
            session: session_rx,
        }
    }

    /// Start editing an existing listing: fetch it, then accept edits.
    pub async fn load(client: ListingsClient, id: &str) -> Result<Self, ClientError> {
        let (session_tx, session_rx) = watch::channel(FormSession {
            phase: FormPhase::LoadingInitial,
            document_id: None,
            last_saved: None,
        });

        let listing = client.get(id).await?;
        session_tx.send_modify(|s| {
            s.phase = FormPhase::Editing;
            s.document_id = listing.id.clone();
        });

        Ok(Self {
            draft: listing,
            quiet_period: AUTOSAVE_QUIET_PERIOD,
            queue: spawn_writer(client, session_tx),
            pending_save: None,
            session: session_rx,
        })
    }

    /// Override the debounce quiet period (tests).
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// The current draft.
    pub fn draft(&self) -> &Listing {
        &self.draft
    }

    /// Snapshot of the save session.
    pub fn session(&self) -> FormSession {
        self.session.borrow().clone()
    }

    /// Identifier of the stored document, once assigned.
    pub fn document_id(&self) -> Option<String> {
        self.session.borrow().document_id.clone()
    }

    /// Whether the draft is currently published.
    pub fn is_published(&self) -> bool {
        self.draft.is_published
    }

    /// Apply an edit to the draft and (re)start the debounce timer.
    pub fn edit(&mut self, mutate: impl FnOnce(&mut Listing)) {
        mutate(&mut self.draft);
        self.schedule_save();
    }

    /// Flip the published flag, immediately and without debouncing.
    ///
    /// Order is preserved through the write queue: a pending debounced save
    /// is flushed into the queue ahead of the publish write, and the flags
    /// are applied to the local draft so any later snapshot agrees.
    pub fn toggle_publish(&mut self) {
        if let Some(handle) = self.pending_save.take() {
            handle.abort();
            let _ = self.queue.send(WriteOp::Save(self.draft.clone()));
        }
        let publish = !self.draft.is_published;
        self.draft.set_published(publish);
        let _ = self.queue.send(WriteOp::Publish { publish });
    }

    /// Wait until every write enqueued so far has been applied.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.queue.send(WriteOp::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }

    fn schedule_save(&mut self) {
        if let Some(handle) = self.pending_save.take() {
            handle.abort();
        }
        let queue = self.queue.clone();
        let snapshot = self.draft.clone();
        let quiet_period = self.quiet_period;
        self.pending_save = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let _ = queue.send(WriteOp::Save(snapshot));
        }));
    }
}

impl Drop for ListingFormController {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_save.take() {
            handle.abort();
        }
    }
}

fn spawn_writer(
    client: ListingsClient,
    session: watch::Sender<FormSession>,
) -> mpsc::UnboundedSender<WriteOp> {
    let (queue_tx, queue_rx) = mpsc::unbounded_channel();
    tokio::spawn(run_writer(client, queue_rx, session));
    queue_tx
}

/// Serialize a snapshot into update fields, identifier excluded.
fn snapshot_fields(snapshot: &Listing) -> Option<Map<String, Value>> {
    match serde_json::to_value(snapshot) {
        Ok(Value::Object(mut fields)) => {
            fields.remove("_id");
            Some(fields)
        }
        _ => None,
    }
}

/// The single writer for one draft: applies queued writes strictly in
/// order, capturing the assigned identifier on first create.
async fn run_writer(
    client: ListingsClient,
    mut queue: mpsc::UnboundedReceiver<WriteOp>,
    session: watch::Sender<FormSession>,
) {
    while let Some(op) = queue.recv().await {
        match op {
            WriteOp::Save(mut snapshot) => {
                session.send_modify(|s| s.phase = FormPhase::Saving);
                let document_id = session.borrow().document_id.clone();
                let now = Utc::now();
                snapshot.updated_at = Some(now);

                let saved_id = match &document_id {
                    None => {
                        snapshot.created_at = Some(now);
                        snapshot.id = None;
                        match client.create(&snapshot).await {
                            Ok(stored) => stored.id,
                            Err(err) => {
                                warn!(error = %err, "autosave (create) failed");
                                None
                            }
                        }
                    }
                    Some(id) => match snapshot_fields(&snapshot) {
                        Some(fields) => {
                            match client.update(id, &Value::Object(fields)).await {
                                Ok(_) => Some(id.clone()),
                                Err(err) => {
                                    warn!(error = %err, "autosave (update) failed");
                                    None
                                }
                            }
                        }
                        None => {
                            warn!("draft snapshot did not serialize to an object");
                            None
                        }
                    },
                };

                session.send_modify(|s| {
                    if let Some(id) = saved_id {
                        s.document_id.get_or_insert(id);
                        s.last_saved = Some(now);
                    }
                    s.phase = FormPhase::Editing;
                });
            }
            WriteOp::Publish { publish } => {
                let document_id = session.borrow().document_id.clone();
                let Some(id) = document_id else {
                    warn!("publish before first save; no document to update");
                    continue;
                };
                let status = if publish { "published" } else { "draft" };
                let payload = json!({
                    "isPublished": publish,
                    "status": status,
                    "updatedAt": Utc::now().to_rfc3339(),
                });
                match client.update(&id, &payload).await {
                    Ok(_) => session.send_modify(|s| s.last_saved = Some(Utc::now())),
                    Err(err) => warn!(error = %err, "publish failed"),
                }
            }
            WriteOp::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}
