//! Client-side admission filter for picked or dropped files.
//!
//! This is a front-end affordance: the staging store never applies it and
//! accepts whatever it is given.

use thiserror::Error;

use crate::document::{human_size, RawFile};

/// Extensions accepted by default (PDF, common images, Word documents).
pub const DEFAULT_EXTENSIONS: &[&str] =
  &["pdf", "png", "jpg", "jpeg", "gif", "webp", "doc", "docx"];

/// Default size ceiling: 10 MiB.
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Why a file was turned away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
  #[error("{name}: unsupported file type")]
  UnsupportedType { name: String },

  #[error("{name}: {} exceeds the {} limit", human_size(*size), human_size(*max))]
  TooLarge { name: String, size: u64, max: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionPolicy {
  /// Lowercase extensions without the leading dot.
  pub extensions: Vec<String>,
  pub max_bytes:  u64,
}

impl Default for AdmissionPolicy {
  fn default() -> Self {
    Self {
      extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_owned()).collect(),
      max_bytes:  DEFAULT_MAX_BYTES,
    }
  }
}

impl AdmissionPolicy {
  pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
    self.max_bytes = max_bytes;
    self
  }

  pub fn check(&self, file: &RawFile) -> Result<(), Rejection> {
    let allowed = file
      .extension()
      .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)));
    if !allowed {
      return Err(Rejection::UnsupportedType {
        name: file.name.clone(),
      });
    }
    if file.size > self.max_bytes {
      return Err(Rejection::TooLarge {
        name: file.name.clone(),
        size: file.size,
        max:  self.max_bytes,
      });
    }
    Ok(())
  }

  /// Split `files` into the admitted ones and the rejections, keeping order.
  pub fn partition(
    &self,
    files: impl IntoIterator<Item = RawFile>,
  ) -> (Vec<RawFile>, Vec<Rejection>) {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for file in files {
      match self.check(&file) {
        Ok(()) => accepted.push(file),
        Err(r) => rejected.push(r),
      }
    }
    (accepted, rejected)
  }
}
