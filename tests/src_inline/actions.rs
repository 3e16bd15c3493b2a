use std::fs;

use super::*;
use crate::roster::SeedPolicy;
use crate::storage::FileRosterStorage;

fn demo_store(dir: &tempfile::TempDir) -> RosterStore {
    RosterStore::open(
        Box::new(FileRosterStorage::new(dir.path().join("roster.csv"))),
        50,
        SeedPolicy::Demo,
    )
}

fn run(store: &RosterStore, action: Action) -> Result<String, ActionError> {
    execute(store, &action)
}

#[test]
fn test_parse_score() {
    assert_eq!(parse_score(" 90 ").unwrap(), 90);
    assert!(matches!(parse_score("101"), Err(ActionError::OutOfRange(101))));
    assert!(matches!(parse_score("-1"), Err(ActionError::OutOfRange(-1))));
    assert!(matches!(parse_score("ninety"), Err(ActionError::NotANumber(_))));
    assert!(matches!(parse_score(""), Err(ActionError::NotANumber(_))));
}

#[test]
fn test_parse_score_list() {
    assert_eq!(parse_score_list("90, 85,77").unwrap(), vec![90, 85, 77]);
    assert_eq!(parse_score_list("   ").unwrap(), Vec::<i64>::new());
    assert!(matches!(
        parse_score_list("90, 185"),
        Err(ActionError::OutOfRange(185))
    ));
    assert!(matches!(
        parse_score_list("90,,85"),
        Err(ActionError::NotANumber(_))
    ));
}

#[test]
fn test_add_saves_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let store = demo_store(&dir);
    let msg = run(
        &store,
        Action::Add {
            name: " Dana Scully ".to_string(),
        },
    )
    .unwrap();
    assert_eq!(msg, "Added Dana Scully.\n");

    let text = fs::read_to_string(dir.path().join("roster.csv")).unwrap();
    assert!(text.ends_with("Dana Scully, \n"));
}

#[test]
fn test_add_duplicate_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = demo_store(&dir);
    let err = run(
        &store,
        Action::Add {
            name: "alice smith".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ActionError::Roster(RosterError::Duplicate(_))));
    assert_eq!(store.len(), 3);
}

#[test]
fn test_score_is_strict() {
    let dir = tempfile::tempdir().unwrap();
    let store = demo_store(&dir);
    let err = run(
        &store,
        Action::Score {
            name: "Bob Johnson".to_string(),
            value: "120".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ActionError::OutOfRange(120)));

    run(
        &store,
        Action::Score {
            name: "bob johnson".to_string(),
            value: "88".to_string(),
        },
    )
    .unwrap();
    assert_eq!(store.find_by_name("Bob Johnson").unwrap().scores(), &[72, 88]);
}

#[test]
fn test_set_scores_rejects_whole_list_on_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = demo_store(&dir);
    let err = run(
        &store,
        Action::SetScores {
            name: "Alice Smith".to_string(),
            scores: "100, abc".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ActionError::NotANumber(_)));
    assert_eq!(store.find_by_name("Alice Smith").unwrap().scores(), &[95, 88]);

    run(
        &store,
        Action::SetScores {
            name: "Alice Smith".to_string(),
            scores: "".to_string(),
        },
    )
    .unwrap();
    assert!(store.find_by_name("Alice Smith").unwrap().scores().is_empty());
}

#[test]
fn test_rename_and_remove() {
    let dir = tempfile::tempdir().unwrap();
    let store = demo_store(&dir);
    let msg = run(
        &store,
        Action::Rename {
            name: "charlie brown".to_string(),
            new_name: "Charles Brown".to_string(),
        },
    )
    .unwrap();
    assert_eq!(msg, "Renamed Charlie Brown to Charles Brown.\n");

    run(
        &store,
        Action::Remove {
            name: "Bob Johnson".to_string(),
        },
    )
    .unwrap();
    let names = store
        .snapshot()
        .iter()
        .map(|r| r.name().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Alice Smith", "Charles Brown"]);

    let err = run(
        &store,
        Action::Remove {
            name: "Bob Johnson".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ActionError::NotFound(_)));
}

#[test]
fn test_list_text_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = demo_store(&dir);
    let text = run(&store, Action::List { json: false }).unwrap();
    assert!(text.contains("Alice Smith"));
    assert!(text.contains("N/A"));

    let json = run(&store, Action::List { json: true }).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);
}

#[test]
fn test_save_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = RosterStore::open(
        Box::new(FileRosterStorage::new(dir.path().join("gone").join("roster.csv"))),
        50,
        SeedPolicy::Demo,
    );
    assert!(matches!(
        run(&store, Action::Save),
        Err(ActionError::SaveFailed)
    ));
    // Edits still apply when the immediate save fails.
    run(
        &store,
        Action::Add {
            name: "Eve".to_string(),
        },
    )
    .unwrap();
    assert_eq!(store.len(), 4);
}
