//! Core of the `tt` task tracker.
//!
//! This crate holds everything that does not touch the terminal: the task
//! model, due-date token resolution, filtering, the JSON task store and the
//! weekly archive.
//!
//! Functions that depend on the current date take `today` explicitly so
//! results are reproducible.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use tasktrack_core::{DateInputMode, NewTask, TaskList};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let mut tasks = TaskList::new();
//!
//! let task = tasks
//!     .add(
//!         NewTask {
//!             name: "Pay rent".to_string(),
//!             due: "01".to_string(),
//!             ..Default::default()
//!         },
//!         DateInputMode::Smart,
//!         today,
//!     )
//!     .unwrap();
//!
//! assert_eq!(task.id, 1);
//! assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
//! ```

pub mod archive;
pub mod date;
pub mod filter;
pub mod models;
pub mod store;
pub mod tasks;

pub use archive::{ArchiveError, ExportSummary, Exporter};
pub use date::DateError;
pub use filter::{DateRange, FilterCriteria, FilterError};
pub use models::{DateInputMode, ParseEnumError, Priority, Status, Task};
pub use store::{StoreError, TaskStore};
pub use tasks::{NewTask, TaskError, TaskList, TaskUpdate};
