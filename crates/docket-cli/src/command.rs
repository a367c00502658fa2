//! Parsing of shell input lines into [`Command`]s.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::ValueEnum;
use docket_core::document::Category;

use crate::ui::LayoutKind;

pub const HELP: &str = "\
commands:
  subjects                 list selectable subjects
  select <query>           switch subject (number, id or name)
  type <category> [label]  category for new files; label only for Other
  types                    list categories
  add <name> <bytes>       stage a simulated file
  attach <path>            stage a file from disk
  rm <n | id-prefix>       remove a staged document
  commit                   save all staged documents
  confirm | cancel         answer a pending subject switch
  show [--json]            render the screen (or dump it as JSON)
  layout <name>            card-list, side-sheet, split-view, top-input
  help | quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Subjects,
  Select(String),
  Type {
    category: Category,
    label:    Option<String>,
  },
  Types,
  Add {
    name: String,
    size: u64,
  },
  Attach(PathBuf),
  Remove(String),
  Commit,
  Confirm,
  Cancel,
  Show {
    json: bool,
  },
  Layout(LayoutKind),
  Help,
  Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
  let mut words = line.split_whitespace();
  let Some(verb) = words.next() else {
    return Ok(None);
  };
  let rest: Vec<&str> = words.collect();

  let command = match (verb.to_ascii_lowercase().as_str(), rest.as_slice()) {
    ("subjects" | "ls", []) => Command::Subjects,
    ("select" | "s", [_, ..]) => Command::Select(rest.join(" ")),
    ("type" | "t", [category, label @ ..]) => {
      let category: Category = category
        .parse()
        .map_err(|_| anyhow!("unknown category {category:?}; try `types`"))?;
      let label = (!label.is_empty()).then(|| label.join(" "));
      Command::Type { category, label }
    }
    ("types", []) => Command::Types,
    ("add" | "a", [name, size]) => Command::Add {
      name: (*name).to_owned(),
      size: size
        .parse()
        .with_context(|| format!("invalid byte size {size:?}"))?,
    },
    ("attach", [_, ..]) => Command::Attach(PathBuf::from(rest.join(" "))),
    ("rm" | "remove", [target]) => Command::Remove((*target).to_owned()),
    ("commit" | "submit", []) => Command::Commit,
    ("confirm" | "y", []) => Command::Confirm,
    ("cancel" | "n", []) => Command::Cancel,
    ("show", []) => Command::Show { json: false },
    ("show", ["--json"]) => Command::Show { json: true },
    ("layout", [name]) => Command::Layout(
      LayoutKind::from_str(name, true).map_err(|e| anyhow!("{e}"))?,
    ),
    ("help" | "?", _) => Command::Help,
    ("quit" | "exit" | "q", []) => Command::Quit,
    (verb, _) => bail!("unrecognised input {verb:?}; type `help`"),
  };
  Ok(Some(command))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_line_is_ignored() {
    assert_eq!(parse("   ").unwrap(), None);
  }

  #[test]
  fn parses_add_with_size() {
    assert_eq!(
      parse("add x.pdf 1000").unwrap(),
      Some(Command::Add {
        name: "x.pdf".into(),
        size: 1000,
      })
    );
    assert!(parse("add x.pdf lots").is_err());
  }

  #[test]
  fn parses_type_with_free_text_label() {
    assert_eq!(
      parse("type other Pay slip").unwrap(),
      Some(Command::Type {
        category: Category::Other,
        label:    Some("Pay slip".into()),
      })
    );
    assert_eq!(
      parse("type cpf").unwrap(),
      Some(Command::Type {
        category: Category::Cpf,
        label:    None,
      })
    );
    assert!(parse("type passport").is_err());
  }

  #[test]
  fn select_keeps_the_whole_query() {
    assert_eq!(
      parse("select Carlos Santos").unwrap(),
      Some(Command::Select("Carlos Santos".into()))
    );
  }

  #[test]
  fn parses_layout_names() {
    assert_eq!(
      parse("layout split-view").unwrap(),
      Some(Command::Layout(LayoutKind::SplitView))
    );
    assert!(parse("layout grid").is_err());
  }

  #[test]
  fn show_json_flag() {
    assert_eq!(parse("show --json").unwrap(), Some(Command::Show { json: true }));
  }

  #[test]
  fn unknown_verb_is_an_error() {
    assert!(parse("frobnicate").is_err());
    assert!(parse("commit now").is_err());
  }
}
