//! [`SubjectGuard`] — confirmation before staged work is discarded.
//!
//! The guard is a two-state machine:
//!
//! - `Idle` — nothing pending.
//! - `AwaitingConfirmation` — one target subject recorded.
//!
//! A request made while already awaiting confirmation replaces the recorded
//! target; the most recent request wins.

use serde::Serialize;

use crate::{
  provider::SavedDocumentProvider, staging::StagingStore, subject::Subject,
  Error, Result,
};

/// Which of the two guard states is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
  Idle,
  AwaitingConfirmation,
}

/// What the caller needs to ask the user before discarding staged work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSwitch {
  pub staged:       usize,
  pub current_name: String,
  pub target_name:  String,
}

/// Result of [`SubjectGuard::request_switch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SwitchOutcome {
  /// The store now has the requested subject active.
  Switched,
  /// Nothing changed; confirm or cancel the recorded switch.
  ConfirmationRequired(PendingSwitch),
}

#[derive(Debug, Default)]
pub struct SubjectGuard {
  pending: Option<Subject>,
}

impl SubjectGuard {
  pub fn new() -> Self { Self::default() }

  pub fn state(&self) -> GuardState {
    match self.pending {
      Some(_) => GuardState::AwaitingConfirmation,
      None => GuardState::Idle,
    }
  }

  pub fn pending_target(&self) -> Option<&Subject> { self.pending.as_ref() }

  /// Switch to `target` now if no staged work would be lost, otherwise
  /// record it and ask for confirmation.
  ///
  /// Switching to the subject that is already active always goes through,
  /// exactly like [`StagingStore::select_subject`].
  pub async fn request_switch<P: SavedDocumentProvider>(
    &mut self,
    store: &mut StagingStore<P>,
    target: Subject,
  ) -> Result<SwitchOutcome> {
    let staged = store.staged_count();
    let blocked_by = store
      .active_subject()
      .filter(|current| staged > 0 && current.subject_id != target.subject_id)
      .map(|current| current.name.clone());

    if let Some(current_name) = blocked_by {
      let pending = PendingSwitch {
        staged,
        current_name,
        target_name: target.name.clone(),
      };
      self.pending = Some(target);
      return Ok(SwitchOutcome::ConfirmationRequired(pending));
    }

    store.select_subject(target).await?;
    self.pending = None;
    Ok(SwitchOutcome::Switched)
  }

  /// Carry out the recorded switch, discarding staged documents. Returns the
  /// subject that is now active.
  ///
  /// If loading the target fails the switch stays recorded so it can be
  /// confirmed again.
  pub async fn confirm<P: SavedDocumentProvider>(
    &mut self,
    store: &mut StagingStore<P>,
  ) -> Result<Subject> {
    let target = self.pending.take().ok_or(Error::NoPendingSwitch)?;
    if let Err(e) = store.force_select_subject(target.clone()).await {
      self.pending = Some(target);
      return Err(e);
    }
    Ok(target)
  }

  /// Drop the recorded switch, if any. The store is not touched.
  pub fn cancel(&mut self) { self.pending = None; }
}
