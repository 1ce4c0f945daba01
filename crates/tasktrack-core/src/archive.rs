//! Weekly task archiving.
//!
//! An export snapshots every task into `tasks_export_<YYYY-MM-DD>.json` and
//! then drops completed tasks from the active list. [`due_export_dates`]
//! plans which exports an automatic run owes, given the date of the last one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;
use tracing::info;

use crate::date::format_canonical;
use crate::tasks::TaskList;

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors that can occur while writing an export.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The export directory could not be created.
    #[error("failed to create export directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The export file could not be written.
    #[error("failed to write export file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returns the export file name for `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("tasks_export_{}.json", format_canonical(date))
}

/// Returns the most recent Sunday on or before `today`.
///
/// A Sunday maps to itself, not to the Sunday a week earlier, so an export
/// run on a Sunday is dated that same day.
pub fn most_recent_sunday(today: NaiveDate) -> NaiveDate {
    let back = u64::from(today.weekday().num_days_from_sunday());
    today - Days::new(back)
}

/// Plans the exports an automatic run should perform, oldest first.
///
/// With no previous export this is a single export dated on the most recent
/// Sunday. Otherwise there is one export per whole week elapsed since
/// `last`, dated `last + 7`, `last + 14`, and so on. A `last` in the future
/// yields nothing.
pub fn due_export_dates(last: Option<NaiveDate>, today: NaiveDate) -> Vec<NaiveDate> {
    let Some(last) = last else {
        return vec![most_recent_sunday(today)];
    };

    let elapsed = (today - last).num_days();
    if elapsed < 7 {
        return Vec::new();
    }

    (1..=elapsed / 7)
        .filter_map(|week| last.checked_add_days(Days::new(week as u64 * 7)))
        .collect()
}

/// Outcome of a single export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// The file that was written.
    pub path: PathBuf,
    /// Number of tasks written to the file.
    pub exported: usize,
    /// Number of completed tasks removed from the active list.
    pub removed: usize,
}

/// Writes task exports into a directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    /// Creates an exporter that writes into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The export directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file an export dated `date` is written to.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(export_file_name(date))
    }

    /// Exports every task and removes the completed ones from `tasks`.
    ///
    /// An existing file for the same date is overwritten. `tasks` is only
    /// modified once the file has been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the tasks cannot
    /// be serialized, or the file cannot be written.
    pub fn export(&self, tasks: &mut TaskList, date: NaiveDate) -> ArchiveResult<ExportSummary> {
        fs::create_dir_all(&self.dir).map_err(|source| ArchiveError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(date);
        let json = serde_json::to_string_pretty(tasks)?;
        fs::write(&path, json).map_err(|source| ArchiveError::Write {
            path: path.clone(),
            source,
        })?;

        let exported = tasks.len();
        let removed = tasks.drain_completed().len();
        info!(path = %path.display(), exported, removed, "exported tasks");

        Ok(ExportSummary {
            path,
            exported,
            removed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Status, Task};
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_list() -> TaskList {
        let mut done = Task::new(1, "Done", date(2024, 3, 1));
        done.status = Status::Completed;
        let open = Task::new(2, "Open", date(2024, 3, 20));
        let mut review = Task::new(3, "Review", date(2024, 3, 21));
        review.status = Status::Review;
        TaskList::from_tasks(vec![done, open, review])
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(date(2024, 3, 10)),
            "tasks_export_2024-03-10.json"
        );
    }

    #[test]
    fn test_most_recent_sunday() {
        // 2024-03-10 is a Sunday.
        assert_eq!(most_recent_sunday(date(2024, 3, 10)), date(2024, 3, 10));
        assert_eq!(most_recent_sunday(date(2024, 3, 11)), date(2024, 3, 10));
        assert_eq!(most_recent_sunday(date(2024, 3, 16)), date(2024, 3, 10));
        assert_eq!(most_recent_sunday(date(2024, 1, 2)), date(2023, 12, 31));
    }

    #[test]
    fn test_first_run_exports_last_sunday() {
        assert_eq!(
            due_export_dates(None, date(2024, 3, 14)),
            vec![date(2024, 3, 10)]
        );
    }

    #[test]
    fn test_first_run_on_sunday_uses_same_day() {
        assert_eq!(
            due_export_dates(None, date(2024, 3, 10)),
            vec![date(2024, 3, 10)]
        );
    }

    #[test]
    fn test_less_than_a_week_exports_nothing() {
        let last = date(2024, 3, 10);
        assert!(due_export_dates(Some(last), date(2024, 3, 10)).is_empty());
        assert!(due_export_dates(Some(last), date(2024, 3, 16)).is_empty());
    }

    #[test]
    fn test_future_last_export_exports_nothing() {
        assert!(due_export_dates(Some(date(2024, 4, 1)), date(2024, 3, 10)).is_empty());
    }

    #[test]
    fn test_one_export_per_elapsed_week() {
        let last = date(2024, 3, 3);
        assert_eq!(
            due_export_dates(Some(last), date(2024, 3, 10)),
            vec![date(2024, 3, 10)]
        );
        assert_eq!(
            due_export_dates(Some(last), date(2024, 3, 26)),
            vec![date(2024, 3, 10), date(2024, 3, 17), date(2024, 3, 24)]
        );
    }

    #[test]
    fn test_export_writes_all_and_removes_completed() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path().join("archive"));
        let mut tasks = sample_list();

        let summary = exporter.export(&mut tasks, date(2024, 3, 10)).unwrap();

        assert_eq!(summary.exported, 3);
        assert_eq!(summary.removed, 1);
        assert_eq!(
            summary.path,
            dir.path().join("archive").join("tasks_export_2024-03-10.json")
        );

        let written: Vec<Task> =
            serde_json::from_str(&fs::read_to_string(&summary.path).unwrap()).unwrap();
        assert_eq!(written.len(), 3);

        let remaining: Vec<u32> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(remaining, vec![2, 3]);
    }

    #[test]
    fn test_export_fails_when_dir_is_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let exporter = Exporter::new(&blocker);
        let mut tasks = sample_list();
        let err = exporter.export(&mut tasks, date(2024, 3, 10)).unwrap_err();

        assert!(matches!(err, ArchiveError::CreateDir { .. }));
        assert_eq!(tasks.len(), 3);
    }
}
