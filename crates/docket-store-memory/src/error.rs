//! Error type for `docket-store-memory`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("subject not found: {0}")]
  SubjectNotFound(uuid::Uuid),

  /// Injected with [`MemoryBackend::fail_next_saves`](crate::MemoryBackend::fail_next_saves).
  #[error("save rejected for subject {0}")]
  SaveRejected(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
