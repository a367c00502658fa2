//! Upload controls first, the file list underneath.

use std::fmt::Write as _;

use super::{Layout, View, document_line, footer, pending_badge, plural};

pub struct TopInput;

impl Layout for TopInput {
  fn render(&self, view: &View<'_>) -> String {
    let mut out = String::new();
    let subject = view.active.map_or("—", |s| s.name.as_str());
    let label = view.selection.label.as_deref().unwrap_or("");
    let _ = writeln!(
      out,
      "[ {subject} ] [ {} {label} ] [ drop files: add / attach ]",
      view.selection.category,
    );

    let badge = pending_badge(view).map(|b| format!(", {b}")).unwrap_or_default();
    let _ = writeln!(out, "{}{badge}", plural(view.documents.len(), "file"));
    for (number, doc) in view.numbered() {
      let _ = writeln!(out, "{}", document_line(number, doc));
    }

    footer(&mut out, view);
    out
  }
}
