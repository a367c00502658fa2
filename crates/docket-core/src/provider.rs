//! Collaborator traits consumed by the core.
//!
//! Backends (e.g. `docket-store-memory`) implement these; the staging store
//! and the guard depend only on the abstractions.

use std::future::Future;

use uuid::Uuid;

use crate::{document::Document, lifecycle::CommitBatch, subject::Subject};

/// Supplies the selectable subjects. Read-only to the core.
pub trait SubjectCatalog: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All selectable subjects, in catalog order.
  fn list_subjects(
    &self,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;

  /// Look up one subject. Returns `None` if unknown.
  fn get_subject(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Subject>, Self::Error>> + Send + '_;
}

/// Supplies the documents a subject has already committed.
pub trait SavedDocumentProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Saved documents for `subject_id` in load order; empty when the subject
  /// has none or is unknown.
  fn saved_documents(
    &self,
    subject_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + '_;
}

/// Persists a batch of staged documents.
///
/// Resolving `Ok` means every document in the batch is durably stored.
pub trait CommitSink: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn save<'a>(
    &'a self,
    batch: &'a CommitBatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
