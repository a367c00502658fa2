//! Subject roster with the active subject's documents in a sheet below it.

use std::fmt::Write as _;

use super::{Layout, View, document_line, footer, pending_badge, selection_line};

pub struct SideSheet;

impl Layout for SideSheet {
  fn render(&self, view: &View<'_>) -> String {
    let mut out = String::from("Subjects\n");
    for (i, subject) in view.subjects.iter().enumerate() {
      let active = view
        .active
        .is_some_and(|a| a.subject_id == subject.subject_id);
      let marker = if active { '▸' } else { ' ' };
      let department = subject.department.as_deref().unwrap_or("-");
      let _ = writeln!(out, " {marker} {}. {} ({department})", i + 1, subject.name);
    }

    let Some(subject) = view.active else {
      out.push_str("\nNo subject open.\n");
      footer(&mut out, view);
      return out;
    };

    let _ = write!(out, "\n▌ {} <{}>", subject.name, subject.email);
    if let Some(badge) = pending_badge(view) {
      let _ = write!(out, "  [{badge}]");
    }
    let _ = writeln!(out, "\n▌ {}", selection_line(view.selection));
    for (number, doc) in view.numbered() {
      let _ = writeln!(out, "▌{}", document_line(number, doc));
    }

    footer(&mut out, view);
    out
  }
}
