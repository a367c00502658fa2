//! Error types for `docket-core`.

use thiserror::Error;
use uuid::Uuid;

/// A boxed collaborator error (catalog, provider or commit sink).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no subject is selected")]
  NoActiveSubject,

  #[error(
    "{staged} staged document(s) for subject {current} would be discarded by \
     switching to {requested}"
  )]
  PendingChangesBlock {
    staged:    usize,
    current:   Uuid,
    requested: Uuid,
  },

  #[error("document {0} is not staged and cannot be removed")]
  NotRemovable(Uuid),

  #[error("there are no staged documents to commit")]
  NothingToCommit,

  #[error("a commit is already in progress")]
  CommitInProgress,

  #[error("commit failed: {0}")]
  CommitFailed(#[source] BoxError),

  #[error("no subject switch is awaiting confirmation")]
  NoPendingSwitch,

  #[error("provider error: {0}")]
  Provider(#[source] BoxError),
}

impl Error {
  pub(crate) fn provider(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Provider(Box::new(e))
  }

  pub(crate) fn commit_failed(
    e: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    Self::CommitFailed(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
