//! [`MemoryBackend`] — the in-memory implementation of the Docket
//! collaborator traits.

use std::{
  collections::HashMap,
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use docket_core::{
  document::Document,
  lifecycle::{CommitBatch, Stage},
  provider::{CommitSink, SavedDocumentProvider, SubjectCatalog},
  subject::Subject,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{Error, Result, demo};

// ─── Backend ─────────────────────────────────────────────────────────────────

#[derive(Default)]
struct State {
  subjects: Vec<Subject>,
  saved:    HashMap<Uuid, Vec<Document>>,
}

/// Subjects and saved documents held in process memory.
///
/// Cloning is cheap — clones share the same state, so a clone handed to a
/// staging store as its provider sees the saves made through another clone
/// used as the commit sink.
#[derive(Clone, Default)]
pub struct MemoryBackend {
  state:         Arc<RwLock<State>>,
  save_delay:    Duration,
  failures_left: Arc<AtomicUsize>,
}

impl MemoryBackend {
  /// An empty backend with no subjects.
  pub fn new() -> Self { Self::default() }

  /// A backend seeded with the demo catalog.
  pub fn demo() -> Self {
    let state = State {
      subjects: demo::subjects(),
      saved:    demo::saved_documents(),
    };
    Self {
      state: Arc::new(RwLock::new(state)),
      ..Self::default()
    }
  }

  /// Wait `delay` before resolving each save, to simulate a network call.
  pub fn with_delay(mut self, delay: Duration) -> Self {
    self.save_delay = delay;
    self
  }

  /// Make the next `count` saves fail with [`Error::SaveRejected`].
  pub fn fail_next_saves(&self, count: usize) {
    self.failures_left.store(count, Ordering::SeqCst);
  }

  /// Add a subject to the catalog together with its already-saved documents.
  /// Replaces any subject with the same id.
  pub async fn insert_subject(&self, subject: Subject, saved: Vec<Document>) {
    let mut state = self.state.write().await;
    state.subjects.retain(|s| s.subject_id != subject.subject_id);
    state.saved.insert(subject.subject_id, saved);
    state.subjects.push(subject);
  }

  /// Take one injected failure, if any remain.
  fn take_failure(&self) -> bool {
    self
      .failures_left
      .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
      .is_ok()
  }
}

// ─── Collaborator impls ──────────────────────────────────────────────────────

impl SubjectCatalog for MemoryBackend {
  type Error = Error;

  async fn list_subjects(&self) -> Result<Vec<Subject>> {
    Ok(self.state.read().await.subjects.clone())
  }

  async fn get_subject(&self, id: Uuid) -> Result<Option<Subject>> {
    let state = self.state.read().await;
    Ok(state.subjects.iter().find(|s| s.subject_id == id).cloned())
  }
}

impl SavedDocumentProvider for MemoryBackend {
  type Error = Error;

  async fn saved_documents(&self, subject_id: Uuid) -> Result<Vec<Document>> {
    let documents = self
      .state
      .read()
      .await
      .saved
      .get(&subject_id)
      .cloned()
      .unwrap_or_default();
    tracing::debug!(%subject_id, count = documents.len(), "loaded saved documents");
    Ok(documents)
  }
}

impl CommitSink for MemoryBackend {
  type Error = Error;

  async fn save(&self, batch: &CommitBatch) -> Result<()> {
    if !self.save_delay.is_zero() {
      tokio::time::sleep(self.save_delay).await;
    }

    let subject_id = batch.subject_id;
    if self.take_failure() {
      tracing::warn!(%subject_id, count = batch.len(), "save rejected");
      return Err(Error::SaveRejected(subject_id));
    }

    let mut state = self.state.write().await;
    if !state.subjects.iter().any(|s| s.subject_id == subject_id) {
      return Err(Error::SubjectNotFound(subject_id));
    }

    let saved = state.saved.entry(subject_id).or_default();
    saved.extend(batch.documents.iter().map(|doc| Document {
      stage: Stage::Saved,
      content: None,
      ..doc.clone()
    }));
    tracing::info!(
      %subject_id,
      count = batch.len(),
      bytes = batch.total_size(),
      "saved documents"
    );
    Ok(())
  }
}
