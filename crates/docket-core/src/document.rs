//! Document types — the files held by the staging store.
//!
//! A document is either *staged* (held locally together with its raw content,
//! waiting for a commit) or *saved* (committed, content presumed stored
//! elsewhere). See [`Stage`].

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::lifecycle::Stage;

// ─── Category ────────────────────────────────────────────────────────────────

/// The closed set of document categories.
///
/// The string form (used for parsing and serialisation) is the variant's
/// canonical short name, e.g. `"RG"` or `"ProofOfResidence"`.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
  /// National identity card.
  #[default]
  #[serde(rename = "RG")]
  #[strum(serialize = "RG")]
  Rg,
  /// Taxpayer registry.
  #[serde(rename = "CPF")]
  #[strum(serialize = "CPF")]
  Cpf,
  /// Driver's license.
  #[serde(rename = "CNH")]
  #[strum(serialize = "CNH")]
  Cnh,
  Contract,
  ProofOfResidence,
  Certificate,
  /// Anything else; the free-text label on the document names it.
  Other,
}

impl Category {
  /// Human-readable label for pickers.
  pub fn label(self) -> &'static str {
    match self {
      Self::Rg => "RG - Identity",
      Self::Cpf => "CPF",
      Self::Cnh => "CNH - Driver's License",
      Self::Contract => "Contract",
      Self::ProofOfResidence => "Proof of Residence",
      Self::Certificate => "Certificate",
      Self::Other => "Other",
    }
  }
}

/// The category/label pair applied to newly added files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelection {
  pub category: Category,
  /// Only kept when `category` is [`Category::Other`].
  pub label:    Option<String>,
}

impl CategorySelection {
  pub fn new(category: Category, label: Option<String>) -> Self {
    let label = match category {
      Category::Other => label,
      _ => None,
    };
    Self { category, label }
  }
}

// ─── Raw content ─────────────────────────────────────────────────────────────

/// Opaque handle to a file's bytes. Cloning is cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct RawContent(Bytes);

impl RawContent {
  pub fn new(bytes: impl Into<Bytes>) -> Self { Self(bytes.into()) }

  pub fn bytes(&self) -> &Bytes { &self.0 }
}

impl fmt::Debug for RawContent {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "RawContent({} bytes)", self.0.len())
  }
}

/// A file handed over by the picker or drop target.
///
/// `size` is the size reported by the picker; it is not checked against the
/// content length.
#[derive(Debug, Clone)]
pub struct RawFile {
  pub name:    String,
  pub size:    u64,
  pub content: RawContent,
}

impl RawFile {
  pub fn new(name: impl Into<String>, size: u64, content: RawContent) -> Self {
    Self {
      name: name.into(),
      size,
      content,
    }
  }

  /// Build a file whose size is the length of `bytes`.
  pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
    let bytes = bytes.into();
    Self::new(name, bytes.len() as u64, RawContent(bytes))
  }

  /// Lowercased extension of the file name, if any.
  pub fn extension(&self) -> Option<String> {
    let (stem, ext) = self.name.rsplit_once('.')?;
    (!stem.is_empty() && !ext.is_empty()).then(|| ext.to_ascii_lowercase())
  }
}

// ─── Document ────────────────────────────────────────────────────────────────

/// A named, categorised file belonging to one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
  pub document_id: Uuid,
  pub name:        String,
  pub category:    Category,
  /// Free-text category, meaningful only for [`Category::Other`].
  pub label:       Option<String>,
  pub size:        u64,
  pub uploaded_at: DateTime<Utc>,
  pub stage:       Stage,
  /// Present only while staged.
  #[serde(skip)]
  pub content:     Option<RawContent>,
}

impl Document {
  /// A committed document, as returned by a saved-document provider.
  pub fn saved(
    document_id: Uuid,
    name: impl Into<String>,
    category: Category,
    size: u64,
    uploaded_at: DateTime<Utc>,
  ) -> Self {
    Self {
      document_id,
      name: name.into(),
      category,
      label: None,
      size,
      uploaded_at,
      stage: Stage::Saved,
      content: None,
    }
  }

  pub fn with_label(mut self, label: impl Into<String>) -> Self {
    self.label = Some(label.into());
    self
  }

  pub fn is_staged(&self) -> bool { self.stage.is_staged() }

  /// The category shown to users: the free-text label for
  /// [`Category::Other`] when one was given, the category name otherwise.
  pub fn display_category(&self) -> &str {
    match (self.category, self.label.as_deref()) {
      (Category::Other, Some(label)) if !label.trim().is_empty() => label,
      (category, _) => {
        let name: &'static str = category.into();
        name
      }
    }
  }

  /// Mark as saved and release the raw content.
  pub(crate) fn mark_saved(&mut self) {
    self.stage = Stage::Saved;
    self.content = None;
  }
}

// ─── Formatting ──────────────────────────────────────────────────────────────

/// Format a byte count with base-1024 units and up to two decimals,
/// e.g. `1536` → `"1.5 KB"`.
pub fn human_size(bytes: u64) -> String {
  const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

  let mut value = bytes as f64;
  let mut unit = 0;
  while value >= 1024.0 && unit < UNITS.len() - 1 {
    value /= 1024.0;
    unit += 1;
  }
  let rounded = (value * 100.0).round() / 100.0;
  format!("{rounded} {}", UNITS[unit])
}
