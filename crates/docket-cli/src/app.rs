//! Application state and command dispatcher.

use std::fmt::Write as _;

use anyhow::Context as _;
use docket_core::{
  admission::AdmissionPolicy,
  document::{Category, CategorySelection, Document, RawContent, RawFile},
  guard::{SubjectGuard, SwitchOutcome},
  provider::SubjectCatalog,
  staging::StagingStore,
  subject::Subject,
};
use docket_store_memory::MemoryBackend;
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use serde::Serialize;
use strum::IntoEnumIterator as _;
use uuid::Uuid;

use crate::{
  command::{Command, HELP},
  ui::{LayoutKind, View, plural},
};

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Catalog and commit sink; also the store's saved-document provider.
  pub backend:     MemoryBackend,
  pub store:       StagingStore<MemoryBackend>,
  pub guard:       SubjectGuard,
  /// All subjects from the catalog, in catalog order.
  pub subjects:    Vec<Subject>,
  pub policy:      AdmissionPolicy,
  pub layout:      LayoutKind,
  pub should_quit: bool,
}

/// JSON dump of the screen state for `show --json`.
#[derive(Serialize)]
struct Snapshot<'a> {
  subject:    Option<&'a Subject>,
  selection:  &'a CategorySelection,
  staged:     usize,
  saved:      usize,
  committing: bool,
  documents:  &'a [Document],
}

impl App {
  pub fn new(backend: MemoryBackend, policy: AdmissionPolicy, layout: LayoutKind) -> Self {
    Self {
      store: StagingStore::new(backend.clone()),
      backend,
      guard: SubjectGuard::new(),
      subjects: Vec::new(),
      policy,
      layout,
      should_quit: false,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  pub async fn load_subjects(&mut self) -> anyhow::Result<()> {
    self.subjects = self
      .backend
      .list_subjects()
      .await
      .context("loading subjects")?;
    Ok(())
  }

  /// Resolve a subject by list number, UUID, or fuzzy name/email match.
  pub fn find_subject(&self, query: &str) -> Option<&Subject> {
    if let Ok(n) = query.parse::<usize>() {
      return n.checked_sub(1).and_then(|i| self.subjects.get(i));
    }
    if let Ok(id) = Uuid::parse_str(query) {
      return self.subjects.iter().find(|s| s.subject_id == id);
    }

    let matcher = SkimMatcherV2::default();
    self
      .subjects
      .iter()
      .filter_map(|s| {
        let score = [Some(s.name.as_str()), Some(s.email.as_str()), s.department.as_deref()]
          .into_iter()
          .flatten()
          .filter_map(|field| matcher.fuzzy_match(field, query))
          .max()?;
        Some((score, s))
      })
      .max_by_key(|(score, _)| *score)
      .map(|(_, s)| s)
  }

  // ── Rendering ─────────────────────────────────────────────────────────────

  fn view(&self) -> View<'_> {
    View {
      subjects:   &self.subjects,
      active:     self.store.active_subject(),
      documents:  self.store.documents(),
      selection:  self.store.category_selection(),
      committing: self.store.is_committing(),
      pending:    self.guard.pending_target(),
    }
  }

  pub fn render(&self) -> String { self.layout.layout().render(&self.view()) }

  // ── Commands ──────────────────────────────────────────────────────────────

  /// Apply `command` and return the text to print.
  ///
  /// Rejected intents (no subject, nothing to commit, ...) are reported in
  /// the output rather than as errors.
  pub async fn handle(&mut self, command: Command) -> anyhow::Result<String> {
    let out = match command {
      Command::Subjects => self.subject_list(),
      Command::Types => category_list(),
      Command::Select(query) => self.select(&query).await,
      Command::Type { category, label } => {
        self.store.set_category_selection(category, label);
        self.render()
      }
      Command::Add { name, size } => {
        self.stage(RawFile::new(name, size, RawContent::new(Vec::new())))
      }
      Command::Attach(path) => match tokio::fs::read(&path).await {
        Ok(bytes) => {
          let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
          self.stage(RawFile::from_bytes(name, bytes))
        }
        Err(e) => format!("cannot read {}: {e}\n", path.display()),
      },
      Command::Remove(target) => self.remove(&target),
      Command::Commit => self.commit().await,
      Command::Confirm => match self.guard.confirm(&mut self.store).await {
        Ok(subject) => format!(
          "Switched to {}. Previous changes were discarded.\n{}",
          subject.name,
          self.render()
        ),
        Err(e) => format!("{e}\n"),
      },
      Command::Cancel => {
        self.guard.cancel();
        self.render()
      }
      Command::Show { json: false } => self.render(),
      Command::Show { json: true } => {
        let snapshot = Snapshot {
          subject:    self.store.active_subject(),
          selection:  self.store.category_selection(),
          staged:     self.store.staged_count(),
          saved:      self.store.saved_count(),
          committing: self.store.is_committing(),
          documents:  self.store.documents(),
        };
        serde_json::to_string_pretty(&snapshot).context("serialising snapshot")? + "\n"
      }
      Command::Layout(kind) => {
        self.layout = kind;
        self.render()
      }
      Command::Help => HELP.to_owned(),
      Command::Quit => {
        self.should_quit = true;
        if self.store.has_pending_changes() {
          format!(
            "Leaving with {} uncommitted.\n",
            plural(self.store.staged_count(), "document")
          )
        } else {
          String::new()
        }
      }
    };
    Ok(out)
  }

  fn subject_list(&self) -> String {
    let mut out = String::new();
    for (i, s) in self.subjects.iter().enumerate() {
      let department = s.department.as_deref().unwrap_or("-");
      let _ = writeln!(out, "{:>2}. {} <{}> ({department})", i + 1, s.name, s.email);
    }
    out
  }

  async fn select(&mut self, query: &str) -> String {
    let Some(target) = self.find_subject(query).cloned() else {
      return format!("no subject matches {query:?}\n");
    };
    // Picking the subject already shown changes nothing, staged work included.
    if self.store.active_subject().map(|s| s.subject_id) == Some(target.subject_id) {
      self.guard.cancel();
      return self.render();
    }

    match self.guard.request_switch(&mut self.store, target).await {
      Ok(SwitchOutcome::Switched) => self.render(),
      Ok(SwitchOutcome::ConfirmationRequired(pending)) => {
        tracing::debug!(staged = pending.staged, "subject switch awaiting confirmation");
        self.render()
      }
      Err(e) => format!("{e}\n"),
    }
  }

  fn stage(&mut self, file: RawFile) -> String {
    if let Err(rejection) = self.policy.check(&file) {
      return format!("rejected {rejection}\n");
    }
    match self.store.add_files([file]) {
      Ok(n) => format!("{} staged.\n{}", plural(n, "file"), self.render()),
      Err(e) => format!("{e}\n"),
    }
  }

  /// Remove by list number, or by a unique prefix of a staged document's id.
  fn remove(&mut self, target: &str) -> String {
    let documents = self.store.documents();
    let by_number = target
      .parse::<usize>()
      .ok()
      .filter(|n| (1..=documents.len()).contains(n))
      .map(|n| documents[n - 1].document_id);

    let id = match by_number {
      Some(id) => Some(id),
      None => {
        let mut matches = self
          .store
          .staged()
          .filter(|d| d.document_id.simple().to_string().starts_with(target));
        match (matches.next(), matches.next()) {
          (Some(doc), None) => Some(doc.document_id),
          (Some(_), Some(_)) => return format!("{target:?} matches several documents\n"),
          (None, _) => None,
        }
      }
    };
    let Some(id) = id else {
      return format!("no document {target:?}\n");
    };

    match self.store.remove_file(id) {
      Ok(doc) => format!("removed {}\n{}", doc.name, self.render()),
      Err(e) => format!("{e}\n"),
    }
  }

  async fn commit(&mut self) -> String {
    match self.store.commit(&self.backend).await {
      Ok(n) => format!("{} saved.\n{}", plural(n, "document"), self.render()),
      Err(e) => {
        tracing::warn!(error = %e, "commit did not complete");
        format!("{e}\n")
      }
    }
  }
}

/// The `types` listing.
fn category_list() -> String {
  let mut out = String::new();
  for category in Category::iter() {
    let _ = writeln!(out, "  {:<18} {}", category.to_string(), category.label());
  }
  out
}
