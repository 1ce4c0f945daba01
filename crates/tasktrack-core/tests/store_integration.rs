//! Integration tests for TaskStore.
//!
//! These tests verify that the task store correctly reads and writes to disk.

use std::fs;

use chrono::NaiveDate;
use tasktrack_core::{
    DateInputMode, NewTask, Priority, Status, StoreError, TaskList, TaskStore, TaskUpdate,
};
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_save_and_load_roundtrip() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let tasks_path = temp_dir.path().join("tasks.json");
    let store = TaskStore::with_path(tasks_path.clone());
    let today = date(2024, 3, 15);

    let mut tasks = TaskList::new();
    tasks
        .add(
            NewTask {
                name: "Write report".to_string(),
                due: "20240320".to_string(),
                description: Some("Quarterly numbers".to_string()),
                tag: Some("work".to_string()),
                priority: Some(Priority::High),
            },
            DateInputMode::Strict,
            today,
        )
        .expect("failed to add task");
    tasks
        .update(
            1,
            TaskUpdate {
                status: Some(Status::InProgress),
                ..Default::default()
            },
            DateInputMode::Strict,
            today,
        )
        .expect("failed to update task");

    store.save(&tasks).expect("failed to save tasks");
    assert!(tasks_path.exists(), "task file should exist after save");

    let loaded = store.load().expect("failed to load tasks");
    assert_eq!(loaded, tasks);
}

#[test]
fn test_saved_file_uses_canonical_forms() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = TaskStore::with_path(temp_dir.path().join("tasks.json"));

    let mut tasks = TaskList::new();
    tasks
        .add(
            NewTask {
                name: "Dentist".to_string(),
                due: "20240402".to_string(),
                ..Default::default()
            },
            DateInputMode::Strict,
            date(2024, 3, 15),
        )
        .unwrap();
    store.save(&tasks).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    let task = &raw[0];
    assert_eq!(task["id"], 1);
    assert_eq!(task["due_date"], "2024-04-02");
    assert_eq!(task["priority"], "normal");
    assert_eq!(task["status"], "not started");
    assert_eq!(task["description"], "");
}

#[test]
fn test_load_missing_file_returns_error() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = TaskStore::with_path(temp_dir.path().join("nonexistent.json"));

    let err = store.load().unwrap_err();
    assert!(
        matches!(err, StoreError::ReadError { .. }),
        "error should be a read error: {err}"
    );
}

#[test]
fn test_load_or_default_missing_file_is_empty() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = TaskStore::with_path(temp_dir.path().join("nonexistent.json"));

    let tasks = store.load_or_default().expect("missing file should be empty");
    assert!(tasks.is_empty());
    assert!(!store.exists());
}

#[test]
fn test_load_accepts_minimal_task_records() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let path = temp_dir.path().join("tasks.json");
    fs::write(
        &path,
        r#"[{"id": 4, "name": "Legacy", "due_date": "2023-10-15"}]"#,
    )
    .unwrap();

    let tasks = TaskStore::with_path(&path).load().unwrap();
    let task = tasks.get(4).expect("task 4 should load");
    assert_eq!(task.due_date, date(2023, 10, 15));
    assert_eq!(task.priority, Priority::Normal);
    assert_eq!(task.status, Status::NotStarted);
    assert_eq!(tasks.next_id(), Ok(5));
}

#[test]
fn test_save_overwrites_previous_contents() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = TaskStore::with_path(temp_dir.path().join("tasks.json"));
    let today = date(2024, 3, 15);

    let mut tasks = TaskList::new();
    for name in ["one", "two"] {
        tasks
            .add(
                NewTask {
                    name: name.to_string(),
                    due: "20240401".to_string(),
                    ..Default::default()
                },
                DateInputMode::Strict,
                today,
            )
            .unwrap();
    }
    store.save(&tasks).unwrap();

    tasks.remove(1).unwrap();
    store.save(&tasks).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.get(2).is_some());
}
