//! Integration tests for `MemoryBackend` driving the staging store and guard.

use std::time::Duration;

use docket_core::{
  Error as CoreError,
  document::{Category, RawContent, RawFile},
  guard::{PendingSwitch, SubjectGuard, SwitchOutcome},
  lifecycle::Stage,
  provider::{CommitSink, SavedDocumentProvider, SubjectCatalog},
  staging::StagingStore,
  subject::Subject,
};
use uuid::Uuid;

use crate::{ANA, CARLOS, Error, JOAO, MARIA, MemoryBackend};

async fn subject(backend: &MemoryBackend, id: Uuid) -> Subject {
  backend
    .get_subject(id)
    .await
    .unwrap()
    .expect("demo subject")
}

fn pdf(name: &str, size: u64) -> RawFile {
  RawFile::new(name, size, RawContent::new(vec![0x25, 0x50, 0x44, 0x46]))
}

/// Ana selected, then one CPF file staged.
async fn staged_for_ana() -> (MemoryBackend, StagingStore<MemoryBackend>) {
  let backend = MemoryBackend::demo();
  let mut store = StagingStore::new(backend.clone());
  store.select_subject(subject(&backend, ANA).await).await.unwrap();
  store.set_category_selection(Category::Cpf, None);
  store.add_files([pdf("x.pdf", 1000)]).unwrap();
  (backend, store)
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn demo_catalog_lists_four_subjects_in_order() {
  let backend = MemoryBackend::demo();
  let subjects = backend.list_subjects().await.unwrap();
  let ids: Vec<_> = subjects.iter().map(|s| s.subject_id).collect();
  assert_eq!(ids, [ANA, CARLOS, MARIA, JOAO]);
  assert_eq!(subjects[0].department.as_deref(), Some("Human Resources"));
}

#[tokio::test]
async fn get_subject_missing_returns_none() {
  let backend = MemoryBackend::demo();
  assert!(backend.get_subject(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn empty_backend_has_no_subjects() {
  let backend = MemoryBackend::new();
  assert!(backend.list_subjects().await.unwrap().is_empty());
  assert!(backend.saved_documents(ANA).await.unwrap().is_empty());
}

#[tokio::test]
async fn insert_subject_replaces_existing_entry() {
  let backend = MemoryBackend::demo();
  let renamed = Subject::new(ANA, "Ana S. Costa", "ana.costa@empresa.com");
  backend.insert_subject(renamed.clone(), Vec::new()).await;

  let subjects = backend.list_subjects().await.unwrap();
  assert_eq!(subjects.len(), 4);
  assert_eq!(subject(&backend, ANA).await, renamed);
  assert!(backend.saved_documents(ANA).await.unwrap().is_empty());
}

#[tokio::test]
async fn demo_saved_documents_per_subject() {
  let backend = MemoryBackend::demo();
  assert_eq!(backend.saved_documents(ANA).await.unwrap().len(), 2);
  assert_eq!(backend.saved_documents(CARLOS).await.unwrap().len(), 1);
  assert!(backend.saved_documents(MARIA).await.unwrap().is_empty());
  let joao = backend.saved_documents(JOAO).await.unwrap();
  assert_eq!(joao[0].category, Category::Cnh);
}

// ─── Walkthrough scenarios ───────────────────────────────────────────────────

#[tokio::test]
async fn select_subject_with_two_saved_documents() {
  let backend = MemoryBackend::demo();
  let mut store = StagingStore::new(backend.clone());
  store.select_subject(subject(&backend, ANA).await).await.unwrap();

  assert_eq!(store.documents().len(), 2);
  assert!(store.documents().iter().all(|d| d.stage == Stage::Saved));
  assert_eq!(store.category_selection().category, Category::Rg);
}

#[tokio::test]
async fn staged_file_lands_first() {
  let (_, store) = staged_for_ana().await;

  assert_eq!(store.documents().len(), 3);
  let first = &store.documents()[0];
  assert_eq!(first.name, "x.pdf");
  assert_eq!(first.stage, Stage::Staged);
  assert_eq!(first.category, Category::Cpf);
}

#[tokio::test]
async fn cancelled_switch_then_commit() {
  let (backend, mut store) = staged_for_ana().await;
  let mut guard = SubjectGuard::new();

  let outcome = guard
    .request_switch(&mut store, subject(&backend, CARLOS).await)
    .await
    .unwrap();
  assert_eq!(
    outcome,
    SwitchOutcome::ConfirmationRequired(PendingSwitch {
      staged:       1,
      current_name: "Ana Silva".into(),
      target_name:  "Carlos Santos".into(),
    })
  );
  assert_eq!(store.documents().len(), 3);

  guard.cancel();
  assert_eq!(store.documents().len(), 3);
  assert_eq!(store.staged_count(), 1);

  let saved = store.commit(&backend).await.unwrap();
  assert_eq!(saved, 1);
  assert_eq!(store.documents().len(), 3);
  assert_eq!(store.staged_count(), 0);
}

#[tokio::test]
async fn confirmed_switch_discards_staged_file() {
  let (backend, mut store) = staged_for_ana().await;
  let mut guard = SubjectGuard::new();

  guard
    .request_switch(&mut store, subject(&backend, CARLOS).await)
    .await
    .unwrap();
  guard.confirm(&mut store).await.unwrap();

  assert_eq!(store.active_subject().map(|s| s.subject_id), Some(CARLOS));
  assert_eq!(store.documents().len(), 1);
  assert_eq!(store.documents()[0].name, "Contrato_Carlos.pdf");

  // Nothing of Ana's staged file reached the backend.
  assert_eq!(backend.saved_documents(ANA).await.unwrap().len(), 2);
}

#[tokio::test]
async fn direct_select_is_blocked_by_staged_work() {
  let (backend, mut store) = staged_for_ana().await;
  let err = store
    .select_subject(subject(&backend, MARIA).await)
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::PendingChangesBlock { staged: 1, .. }));
}

// ─── Saves ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn committed_documents_reappear_after_reselect() {
  let (backend, mut store) = staged_for_ana().await;
  let staged_id = store.documents()[0].document_id;
  store.commit(&backend).await.unwrap();

  let saved = backend.saved_documents(ANA).await.unwrap();
  assert_eq!(saved.len(), 3);
  let last = saved.last().unwrap();
  assert_eq!(last.document_id, staged_id);
  assert_eq!(last.stage, Stage::Saved);
  assert!(last.content.is_none());

  store.select_subject(subject(&backend, CARLOS).await).await.unwrap();
  store.select_subject(subject(&backend, ANA).await).await.unwrap();
  assert_eq!(store.documents().len(), 3);
  assert_eq!(store.staged_count(), 0);
}

#[tokio::test]
async fn injected_failure_preserves_staged_work() {
  let (backend, mut store) = staged_for_ana().await;
  backend.fail_next_saves(1);

  let err = store.commit(&backend).await.unwrap_err();
  match err {
    CoreError::CommitFailed(source) => {
      assert!(source.to_string().contains("save rejected"));
    }
    other => panic!("unexpected error: {other:?}"),
  }
  assert_eq!(store.staged_count(), 1);
  assert_eq!(backend.saved_documents(ANA).await.unwrap().len(), 2);

  assert_eq!(store.commit(&backend).await.unwrap(), 1);
  assert_eq!(backend.saved_documents(ANA).await.unwrap().len(), 3);
}

#[tokio::test]
async fn save_for_unknown_subject_is_rejected() {
  let backend = MemoryBackend::demo();
  let mut store = StagingStore::new(backend.clone());
  let stranger = Subject::new(Uuid::from_u128(77), "Nobody", "n@example.com");
  store.select_subject(stranger).await.unwrap();
  store.add_files([pdf("a.pdf", 1)]).unwrap();

  let ticket = store.begin_commit().unwrap();
  let outcome = backend.save(ticket.batch()).await;
  assert!(matches!(outcome, Err(Error::SubjectNotFound(_))));
  assert!(store.finish_commit(ticket, outcome).is_err());
  assert_eq!(store.staged_count(), 1);
}

#[tokio::test]
async fn staging_keeps_working_during_a_slow_save() {
  let (backend, mut store) = staged_for_ana().await;
  let backend = backend.with_delay(Duration::from_millis(30));

  let ticket = store.begin_commit().unwrap();
  let batch = ticket.batch().clone();
  let sink = backend.clone();
  let save = tokio::spawn(async move { sink.save(&batch).await });

  // The commit is outstanding: a second one is refused, staging is not.
  assert!(matches!(
    store.commit(&backend).await.unwrap_err(),
    CoreError::CommitInProgress
  ));
  store.add_files([pdf("late.pdf", 5)]).unwrap();

  let outcome = save.await.unwrap();
  let saved = store.finish_commit(ticket, outcome).unwrap();
  assert_eq!(saved, 1);
  assert_eq!(store.staged_count(), 1);
  assert_eq!(store.documents()[0].name, "late.pdf");
  assert!(!store.is_committing());
}
