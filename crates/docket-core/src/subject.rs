//! Subject — the person whose documents are being managed.
//!
//! Subjects are supplied by a [`SubjectCatalog`](crate::provider::SubjectCatalog)
//! and are read-only to the core.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An entity (e.g. an employee) that owns documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub subject_id: Uuid,
  pub name:       String,
  /// Contact address, usually an email.
  pub email:      String,
  /// Optional grouping label such as a department.
  pub department: Option<String>,
}

impl Subject {
  pub fn new(
    subject_id: Uuid,
    name: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      subject_id,
      name: name.into(),
      email: email.into(),
      department: None,
    }
  }

  pub fn with_department(mut self, department: impl Into<String>) -> Self {
    self.department = Some(department.into());
    self
  }

  /// Up to two uppercase initials of the display name, used as an avatar
  /// fallback.
  pub fn initials(&self) -> String {
    self
      .name
      .split_whitespace()
      .filter_map(|word| word.chars().next())
      .flat_map(char::to_uppercase)
      .take(2)
      .collect()
  }
}
