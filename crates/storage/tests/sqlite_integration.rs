use talent_core::model::{AnswerSheet, OptionScore, QuestionBank, QuestionId};
use storage::repository::{ProgressRecord, ProgressRepository, ResultRepository};
use storage::sqlite::SqliteRepository;

fn partial_record() -> ProgressRecord {
    let mut answers = AnswerSheet::new();
    answers.record(QuestionId::new(1), OptionScore::FullMatch);
    answers.record(QuestionId::new(2), OptionScore::PartialMatch);
    answers.record(QuestionId::new(3), OptionScore::NoMatch);
    ProgressRecord {
        current_question_index: 3,
        answers,
    }
}

fn complete_sheet() -> AnswerSheet {
    QuestionBank::builtin()
        .questions()
        .iter()
        .map(|q| (q.id(), OptionScore::StrongMatch))
        .collect()
}

#[tokio::test]
async fn sqlite_progress_roundtrip() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_progress().await.unwrap().is_none());

    let record = partial_record();
    repo.save_progress(&record).await.unwrap();
    assert_eq!(repo.load_progress().await.unwrap(), Some(record));
}

#[tokio::test]
async fn sqlite_progress_save_replaces_the_whole_record() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_replace?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.save_progress(&partial_record()).await.unwrap();

    // A smaller record must not inherit stale answer rows.
    let mut answers = AnswerSheet::new();
    answers.record(QuestionId::new(7), OptionScore::WeakMatch);
    let smaller = ProgressRecord {
        current_question_index: 1,
        answers,
    };
    repo.save_progress(&smaller).await.unwrap();

    let loaded = repo.load_progress().await.unwrap().expect("record");
    assert_eq!(loaded, smaller);
    assert_eq!(loaded.answers.answered_count(), 1);
}

#[tokio::test]
async fn sqlite_clear_progress_removes_the_record() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_clear?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.save_progress(&partial_record()).await.unwrap();
    repo.clear_progress().await.unwrap();
    assert!(repo.load_progress().await.unwrap().is_none());

    // Clearing an empty store stays quiet.
    repo.clear_progress().await.unwrap();
}

#[tokio::test]
async fn sqlite_result_roundtrip_and_clear() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_result?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_result().await.unwrap().is_none());

    let sheet = complete_sheet();
    repo.save_result(&sheet).await.unwrap();
    let loaded = repo.load_result().await.unwrap().expect("sheet");
    assert_eq!(loaded, sheet);
    assert_eq!(loaded.answered_count(), 40);

    repo.clear_result().await.unwrap();
    assert!(repo.load_result().await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_progress_and_result_are_independent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_independent?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.save_progress(&partial_record()).await.unwrap();
    repo.save_result(&complete_sheet()).await.unwrap();

    repo.clear_progress().await.unwrap();
    assert!(repo.load_progress().await.unwrap().is_none());
    assert!(repo.load_result().await.unwrap().is_some());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first run");
    repo.migrate().await.expect("second run");

    repo.save_progress(&partial_record()).await.unwrap();
    assert!(repo.load_progress().await.unwrap().is_some());
}
