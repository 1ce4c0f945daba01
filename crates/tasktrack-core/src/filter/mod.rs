//! Task filtering by due date, priority, name, tag and description.
//!
//! # Due-date Filter Tokens
//!
//! The due criterion accepts richer forms than task input does:
//!
//! - `today` / `tdy` - Tasks due today
//! - `tomorrow` / `tmrw` - Tasks due tomorrow
//! - `overmorrow` / `dat` - Tasks due the day after tomorrow
//! - `jan` .. `dec` (and `sept`) - Tasks due in that month of the current year
//! - `2024` - Tasks due in that year
//! - Anything else is resolved as an exact date using the configured
//!   [`DateInputMode`](crate::DateInputMode)
//!
//! # Other Criteria
//!
//! - priority - exact match
//! - name prefix - case-sensitive `starts_with`
//! - tag - case-insensitive equality
//! - description - case-insensitive substring
//!
//! All present criteria are ANDed together.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use tasktrack_core::filter::{filter_tasks, resolve_filter_range, FilterCriteria};
//! use tasktrack_core::{DateInputMode, Task};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//!
//! let range = resolve_filter_range("feb", DateInputMode::Strict, today).unwrap();
//! assert_eq!(range.end(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
//!
//! let tasks = vec![Task::new(1, "Dentist", today)];
//! let criteria = FilterCriteria {
//!     due: Some("today".to_string()),
//!     ..Default::default()
//! };
//! let matched = filter_tasks(&tasks, &criteria, DateInputMode::Strict, today).unwrap();
//! assert_eq!(matched.len(), 1);
//! ```

mod error;
mod evaluator;
mod range;

pub use error::{FilterError, FilterResult};
pub use evaluator::{filter_tasks, matches, FilterCriteria, FilterEvaluator};
pub use range::{resolve_filter_range, DateRange};
