//! Text rendering — the four interchangeable screen layouts.
//!
//! Every layout renders the same [`View`]; they differ only in arrangement.

mod card_list;
mod side_sheet;
mod split_view;
mod top_input;

use std::fmt::Write as _;

use chrono::Local;
use clap::ValueEnum;
use docket_core::{
  document::{CategorySelection, Category, Document, human_size},
  subject::Subject,
};
use serde::Deserialize;

// ─── Layout selection ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
  /// Stacked cards: subject, category, files, submit.
  #[default]
  CardList,
  /// Subject roster on the left, document sheet on the right.
  SideSheet,
  /// Pending and saved documents side by side.
  SplitView,
  /// Upload controls on top, file list below.
  TopInput,
}

impl LayoutKind {
  pub fn layout(self) -> &'static dyn Layout {
    match self {
      Self::CardList => &card_list::CardList,
      Self::SideSheet => &side_sheet::SideSheet,
      Self::SplitView => &split_view::SplitView,
      Self::TopInput => &top_input::TopInput,
    }
  }
}

/// A screen arrangement.
pub trait Layout: Sync {
  fn render(&self, view: &View<'_>) -> String;
}

// ─── View model ───────────────────────────────────────────────────────────────

/// Everything a layout may show, borrowed from the app state.
pub struct View<'a> {
  pub subjects:   &'a [Subject],
  pub active:     Option<&'a Subject>,
  pub documents:  &'a [Document],
  pub selection:  &'a CategorySelection,
  pub committing: bool,
  /// Target of a switch awaiting confirmation.
  pub pending:    Option<&'a Subject>,
}

impl View<'_> {
  pub fn staged_count(&self) -> usize {
    self.documents.iter().filter(|d| d.is_staged()).count()
  }

  /// Documents with their 1-based position in the store's order.
  pub fn numbered(&self) -> impl Iterator<Item = (usize, &Document)> {
    self.documents.iter().enumerate().map(|(i, d)| (i + 1, d))
  }
}

// ─── Shared pieces ────────────────────────────────────────────────────────────

pub fn plural(count: usize, word: &str) -> String {
  if count == 1 {
    format!("{count} {word}")
  } else {
    format!("{count} {word}s")
  }
}

/// Badge shown while staged documents exist, e.g. `"2 pending"`.
pub fn pending_badge(view: &View<'_>) -> Option<String> {
  let staged = view.staged_count();
  (staged > 0).then(|| format!("{staged} pending"))
}

pub fn subject_line(subject: &Subject) -> String {
  let mut line = format!("[{}] {} <{}>", subject.initials(), subject.name, subject.email);
  if let Some(department) = &subject.department {
    let _ = write!(line, " · {department}");
  }
  line
}

pub fn selection_line(selection: &CategorySelection) -> String {
  match (selection.category, selection.label.as_deref()) {
    (Category::Other, Some(label)) => format!("Type: Other ({label})"),
    (category, _) => format!("Type: {}", category.label()),
  }
}

pub fn document_line(number: usize, doc: &Document) -> String {
  let marker = if doc.is_staged() { "pending" } else { "saved  " };
  let at = doc.uploaded_at.with_timezone(&Local).format("%d %b %Y, %H:%M");
  format!(
    "{number:>3}. [{marker}] {}  {}  {}  {at}  ({})",
    doc.name,
    doc.display_category(),
    human_size(doc.size),
    short_id(doc),
  )
}

pub fn short_id(doc: &Document) -> String {
  doc.document_id.simple().to_string()[..8].to_owned()
}

/// Trailing status lines common to every layout.
pub fn footer(out: &mut String, view: &View<'_>) {
  let staged = view.staged_count();
  if view.committing {
    out.push_str("Saving…\n");
  } else if view.active.is_some() && staged > 0 {
    let _ = writeln!(out, "`commit` to save {}", plural(staged, "document"));
  }
  if let (Some(target), Some(current)) = (view.pending, view.active) {
    let _ = writeln!(
      out,
      "Switch from {} to {}? {} will be discarded. `confirm` or `cancel`",
      current.name,
      target.name,
      plural(staged, "pending document"),
    );
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;

  fn view_parts() -> (Vec<Subject>, Vec<Document>, CategorySelection) {
    let ana = Subject::new(Uuid::from_u128(1), "Ana Silva", "ana@example.com")
      .with_department("Human Resources");
    let mut staged = Document::saved(Uuid::from_u128(10), "x.pdf", Category::Cpf, 1000, Utc::now());
    staged.stage = docket_core::lifecycle::Stage::Staged;
    let saved = Document::saved(Uuid::from_u128(11), "RG.pdf", Category::Rg, 1_024_000, Utc::now());
    (vec![ana], vec![staged, saved], CategorySelection::default())
  }

  #[test]
  fn every_layout_shows_both_documents_and_the_subject() {
    let (subjects, documents, selection) = view_parts();
    let view = View {
      subjects:   &subjects,
      active:     subjects.first(),
      documents:  &documents,
      selection:  &selection,
      committing: false,
      pending:    None,
    };

    for kind in LayoutKind::value_variants() {
      let screen = kind.layout().render(&view);
      assert!(screen.contains("Ana Silva"), "{kind:?}:\n{screen}");
      assert!(screen.contains("x.pdf"), "{kind:?}:\n{screen}");
      assert!(screen.contains("RG.pdf"), "{kind:?}:\n{screen}");
      assert!(screen.contains("1 pending"), "{kind:?}:\n{screen}");
    }
  }

  #[test]
  fn pending_switch_prompt_is_rendered() {
    let (mut subjects, documents, selection) = view_parts();
    subjects.push(Subject::new(Uuid::from_u128(2), "Carlos Santos", "c@example.com"));
    let view = View {
      subjects:   &subjects,
      active:     subjects.first(),
      documents:  &documents,
      selection:  &selection,
      committing: false,
      pending:    subjects.get(1),
    };

    let screen = LayoutKind::CardList.layout().render(&view);
    assert!(screen.contains("Switch from Ana Silva to Carlos Santos?"));
    assert!(screen.contains("1 pending document will be discarded"));
  }

  #[test]
  fn document_line_shows_size_and_category() {
    let (_, documents, _) = view_parts();
    let line = document_line(2, &documents[1]);
    assert!(line.starts_with("  2. [saved  ] RG.pdf  RG  1000 KB"), "{line}");
  }

  #[test]
  fn selection_line_uses_free_text_for_other() {
    let selection = CategorySelection::new(Category::Other, Some("Payslip".into()));
    assert_eq!(selection_line(&selection), "Type: Other (Payslip)");
    assert_eq!(selection_line(&CategorySelection::default()), "Type: RG - Identity");
  }
}
