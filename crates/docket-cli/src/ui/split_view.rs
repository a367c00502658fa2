//! Pending and saved documents in two separate panes.

use std::fmt::Write as _;

use super::{Layout, View, document_line, footer, pending_badge, subject_line, selection_line};

pub struct SplitView;

impl Layout for SplitView {
  fn render(&self, view: &View<'_>) -> String {
    let mut out = String::new();
    match view.active {
      Some(subject) => {
        let _ = writeln!(out, "{}", subject_line(subject));
      }
      None => out.push_str("No subject selected\n"),
    }
    let _ = writeln!(out, "{}\n", selection_line(view.selection));

    let badge = pending_badge(view).unwrap_or_else(|| "0 pending".to_owned());
    let _ = writeln!(out, "── Pending ({badge}) ──");
    for (number, doc) in view.numbered().filter(|(_, d)| d.is_staged()) {
      let _ = writeln!(out, "{}", document_line(number, doc));
    }

    let _ = writeln!(out, "── Saved ──");
    for (number, doc) in view.numbered().filter(|(_, d)| !d.is_staged()) {
      let _ = writeln!(out, "{}", document_line(number, doc));
    }

    footer(&mut out, view);
    out
  }
}
