//! Stacked cards: subject, document type, file list.

use std::fmt::Write as _;

use super::{Layout, View, document_line, footer, pending_badge, selection_line, subject_line};

pub struct CardList;

impl Layout for CardList {
  fn render(&self, view: &View<'_>) -> String {
    let mut out = String::new();

    // Subject card.
    out.push_str("┌─ Subject");
    if let Some(badge) = pending_badge(view) {
      let _ = write!(out, " ── {badge}");
    }
    out.push('\n');
    match view.active {
      Some(subject) => {
        let _ = writeln!(out, "│ {}", subject_line(subject));
      }
      None => out.push_str("│ Select a subject to start (`subjects`, `select`)\n"),
    }

    // Type card.
    let _ = writeln!(out, "├─ {}", selection_line(view.selection));

    // Files card.
    let saved = view.documents.len() - view.staged_count();
    let _ = writeln!(out, "├─ Documents ── {saved} saved");
    if view.active.is_none() {
      out.push_str("│ (locked until a subject is selected)\n");
    } else if view.documents.is_empty() {
      out.push_str("│ No documents yet; `add` or `attach` a file\n");
    }
    for (number, doc) in view.numbered() {
      let _ = writeln!(out, "│{}", document_line(number, doc));
    }
    out.push_str("└─\n");

    footer(&mut out, view);
    out
  }
}
