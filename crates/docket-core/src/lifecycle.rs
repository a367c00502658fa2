//! Document lifecycle: stage flags and commit batches.
//!
//! A document moves `staged → saved` through a successful commit or
//! `staged → removed` through removal. `saved` is terminal; nothing moves a
//! document back to `staged`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::Document;

/// Whether a document has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
  Staged,
  Saved,
}

impl Stage {
  pub fn is_staged(self) -> bool { matches!(self, Self::Staged) }
}

/// The staged documents of one subject, handed to a
/// [`CommitSink`](crate::provider::CommitSink). Documents still carry their
/// raw content.
#[derive(Debug, Clone)]
pub struct CommitBatch {
  pub subject_id: Uuid,
  pub documents:  Vec<Document>,
}

impl CommitBatch {
  pub fn len(&self) -> usize { self.documents.len() }

  pub fn is_empty(&self) -> bool { self.documents.is_empty() }

  pub fn total_size(&self) -> u64 {
    self.documents.iter().map(|d| d.size).sum()
  }
}

/// An outstanding commit started with
/// [`StagingStore::begin_commit`](crate::staging::StagingStore::begin_commit).
///
/// Must be handed back to
/// [`StagingStore::finish_commit`](crate::staging::StagingStore::finish_commit)
/// once the sink resolves, or to
/// [`StagingStore::abort_commit`](crate::staging::StagingStore::abort_commit)
/// to give up; until then the store refuses further commits.
#[derive(Debug)]
#[must_use = "a commit ticket must be finished or aborted or the store stays locked"]
pub struct CommitTicket {
  pub(crate) commit_id: u64,
  pub(crate) batch:     CommitBatch,
}

impl CommitTicket {
  pub fn batch(&self) -> &CommitBatch { &self.batch }
}
