//! [`StagingStore`] — the document staging/commit state machine.
//!
//! The store holds the documents of the active subject only. New files enter
//! as `staged` documents at the front of the collection; a commit turns every
//! staged document into a `saved` one. Saved documents cannot be removed.

use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use crate::{
  document::{Category, CategorySelection, Document, RawFile},
  lifecycle::{CommitBatch, CommitTicket, Stage},
  provider::{CommitSink, SavedDocumentProvider},
  subject::Subject,
  Error, Result,
};

/// Staging store for one active subject at a time.
///
/// All mutations run to completion synchronously except loading saved
/// documents and the commit's sink call. Use [`begin_commit`] and
/// [`finish_commit`] to keep adding or removing files while a commit is in
/// flight; [`commit`] is the one-shot form.
///
/// [`begin_commit`]: Self::begin_commit
/// [`finish_commit`]: Self::finish_commit
/// [`commit`]: Self::commit
#[derive(Debug)]
pub struct StagingStore<P> {
  provider:       P,
  active:         Option<Subject>,
  /// Staged documents first (newest first), then saved documents.
  documents:      Vec<Document>,
  selection:      CategorySelection,
  next_commit_id: u64,
  in_flight:      Option<u64>,
  /// Every document id this store has handed out.
  issued:         HashSet<Uuid>,
}

impl<P: SavedDocumentProvider> StagingStore<P> {
  /// An empty store with no active subject.
  pub fn new(provider: P) -> Self {
    Self {
      provider,
      active: None,
      documents: Vec::new(),
      selection: CategorySelection::default(),
      next_commit_id: 0,
      in_flight: None,
      issued: HashSet::new(),
    }
  }

  pub fn provider(&self) -> &P { &self.provider }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn active_subject(&self) -> Option<&Subject> { self.active.as_ref() }

  pub fn documents(&self) -> &[Document] { &self.documents }

  pub fn document(&self, id: Uuid) -> Option<&Document> {
    self.documents.iter().find(|d| d.document_id == id)
  }

  pub fn staged(&self) -> impl Iterator<Item = &Document> {
    self.documents.iter().filter(|d| d.is_staged())
  }

  pub fn saved(&self) -> impl Iterator<Item = &Document> {
    self.documents.iter().filter(|d| !d.is_staged())
  }

  pub fn staged_count(&self) -> usize { self.staged().count() }

  pub fn saved_count(&self) -> usize { self.saved().count() }

  pub fn has_pending_changes(&self) -> bool { self.staged().next().is_some() }

  pub fn category_selection(&self) -> &CategorySelection { &self.selection }

  /// Whether a commit has been started and not yet finished.
  pub fn is_committing(&self) -> bool { self.in_flight.is_some() }

  // ── Subject selection ─────────────────────────────────────────────────────

  /// Make `subject` active and load its saved documents.
  ///
  /// Refused with [`Error::PendingChangesBlock`] when staged documents exist
  /// and `subject` is not the active subject; route such switches through
  /// [`SubjectGuard`](crate::guard::SubjectGuard).
  pub async fn select_subject(&mut self, subject: Subject) -> Result<()> {
    if let Some(current) = &self.active {
      let staged = self.staged_count();
      if staged > 0 && current.subject_id != subject.subject_id {
        return Err(Error::PendingChangesBlock {
          staged,
          current: current.subject_id,
          requested: subject.subject_id,
        });
      }
    }
    self.load_subject(subject).await
  }

  /// Make `subject` active, discarding any staged documents uncommitted.
  pub async fn force_select_subject(&mut self, subject: Subject) -> Result<()> {
    self.load_subject(subject).await
  }

  async fn load_subject(&mut self, subject: Subject) -> Result<()> {
    let mut documents = self
      .provider
      .saved_documents(subject.subject_id)
      .await
      .map_err(Error::provider)?;
    // Whatever the provider hands back is committed by definition.
    for doc in &mut documents {
      doc.mark_saved();
    }

    self.documents = documents;
    self.active = Some(subject);
    self.selection = CategorySelection::default();
    Ok(())
  }

  // ── Staging ───────────────────────────────────────────────────────────────

  /// Set the category (and, for [`Category::Other`], the free-text label)
  /// applied to files added from now on.
  pub fn set_category_selection(
    &mut self,
    category: Category,
    label: Option<String>,
  ) {
    self.selection = CategorySelection::new(category, label);
  }

  /// Stage `files` for the active subject. The new documents go to the front
  /// of the collection in the order given. Returns how many were added.
  pub fn add_files(
    &mut self,
    files: impl IntoIterator<Item = RawFile>,
  ) -> Result<usize> {
    if self.active.is_none() {
      return Err(Error::NoActiveSubject);
    }

    let now = Utc::now();
    let mut added: Vec<Document> = Vec::new();
    for file in files {
      let document_id = self.fresh_id();
      added.push(Document {
        document_id,
        name: file.name,
        category: self.selection.category,
        label: self.selection.label.clone(),
        size: file.size,
        uploaded_at: now,
        stage: Stage::Staged,
        content: Some(file.content),
      });
    }

    let count = added.len();
    self.documents.splice(0..0, added);
    Ok(count)
  }

  /// An id never issued before by this store and not held by a loaded
  /// saved document.
  fn fresh_id(&mut self) -> Uuid {
    loop {
      let id = Uuid::new_v4();
      let held = self.documents.iter().any(|d| d.document_id == id);
      if !held && self.issued.insert(id) {
        return id;
      }
    }
  }

  /// Remove a staged document and return it.
  ///
  /// Saved documents and unknown ids yield [`Error::NotRemovable`] and leave
  /// the collection unchanged.
  pub fn remove_file(&mut self, document_id: Uuid) -> Result<Document> {
    let index = self
      .documents
      .iter()
      .position(|d| d.document_id == document_id && d.is_staged())
      .ok_or(Error::NotRemovable(document_id))?;
    Ok(self.documents.remove(index))
  }

  // ── Commit ────────────────────────────────────────────────────────────────

  /// Start a commit of every staged document.
  ///
  /// The returned ticket carries the batch for the sink. Until it is passed
  /// to [`finish_commit`](Self::finish_commit), further commits fail with
  /// [`Error::CommitInProgress`]; adding and removing files keeps working.
  pub fn begin_commit(&mut self) -> Result<CommitTicket> {
    let subject_id = self
      .active
      .as_ref()
      .map(|s| s.subject_id)
      .ok_or(Error::NoActiveSubject)?;
    if self.in_flight.is_some() {
      return Err(Error::CommitInProgress);
    }

    let documents: Vec<Document> = self.staged().cloned().collect();
    if documents.is_empty() {
      return Err(Error::NothingToCommit);
    }

    let commit_id = self.next_commit_id;
    self.next_commit_id += 1;
    self.in_flight = Some(commit_id);

    Ok(CommitTicket {
      commit_id,
      batch: CommitBatch {
        subject_id,
        documents,
      },
    })
  }

  /// Apply the sink's verdict for `ticket`.
  ///
  /// On success, every document of the batch that is still held and still
  /// staged becomes `saved` and drops its content; the count is returned.
  /// Documents staged after the commit began stay staged. On failure nothing
  /// changes and [`Error::CommitFailed`] is returned.
  pub fn finish_commit<E>(
    &mut self,
    ticket: CommitTicket,
    outcome: std::result::Result<(), E>,
  ) -> Result<usize>
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    self.release(ticket.commit_id);
    outcome.map_err(Error::commit_failed)?;

    let CommitBatch {
      subject_id,
      documents,
    } = ticket.batch;
    // The subject changed while the commit was in flight; its staged
    // documents are already gone.
    if self.active.as_ref().map(|s| s.subject_id) != Some(subject_id) {
      return Ok(0);
    }

    let committed: HashSet<Uuid> =
      documents.iter().map(|d| d.document_id).collect();
    let mut saved = 0;
    for doc in &mut self.documents {
      if doc.is_staged() && committed.contains(&doc.document_id) {
        doc.mark_saved();
        saved += 1;
      }
    }
    Ok(saved)
  }

  /// Commit every staged document through `sink` and wait for the result.
  ///
  /// Dropping the returned future before it resolves abandons the commit:
  /// the store unlocks and every document stays staged.
  pub async fn commit<S: CommitSink>(&mut self, sink: &S) -> Result<usize> {
    let ticket = self.begin_commit()?;
    let mut in_flight = AbortOnDrop {
      commit_id: ticket.commit_id,
      store:     self,
    };
    let outcome = sink.save(ticket.batch()).await;
    in_flight.store.finish_commit(ticket, outcome)
  }
}

impl<P> StagingStore<P> {
  /// Give up on `ticket` without applying a verdict. Staged documents stay
  /// staged and further commits are allowed again.
  pub fn abort_commit(&mut self, ticket: CommitTicket) {
    self.release(ticket.commit_id);
  }

  fn release(&mut self, commit_id: u64) {
    if self.in_flight == Some(commit_id) {
      self.in_flight = None;
    }
  }
}

/// Unlocks the store if a [`StagingStore::commit`] future is dropped while
/// the sink call is pending.
struct AbortOnDrop<'s, P> {
  commit_id: u64,
  store:     &'s mut StagingStore<P>,
}

impl<P> Drop for AbortOnDrop<'_, P> {
  fn drop(&mut self) { self.store.release(self.commit_id); }
}
