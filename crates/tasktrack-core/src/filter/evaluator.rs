//! Filter evaluation against tasks.
//!
//! A [`FilterCriteria`] holds the optional predicates a user supplied. Every
//! present predicate must hold for a task to match; absent ones are ignored.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use tasktrack_core::filter::{FilterCriteria, FilterEvaluator};
//! use tasktrack_core::{DateInputMode, Priority, Task};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
//! let mut task = Task::new(1, "Pay rent", NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
//! task.priority = Priority::High;
//!
//! let criteria = FilterCriteria {
//!     due: Some("feb".to_string()),
//!     priority: Some(Priority::High),
//!     ..Default::default()
//! };
//!
//! let evaluator = FilterEvaluator::resolve(&criteria, DateInputMode::Strict, today).unwrap();
//! assert!(evaluator.matches(&task));
//! ```

use chrono::NaiveDate;

use super::error::FilterResult;
use super::range::{resolve_filter_range, DateRange};
use crate::models::{DateInputMode, Priority, Task};

/// Optional predicates a task must satisfy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Due-date filter token (see [`resolve_filter_range`]).
    pub due: Option<String>,
    /// Exact priority.
    pub priority: Option<Priority>,
    /// Case-sensitive prefix of the task name.
    pub name_prefix: Option<String>,
    /// Tag, compared case-insensitively.
    pub tag: Option<String>,
    /// Substring of the description, compared case-insensitively.
    pub description: Option<String>,
}

impl FilterCriteria {
    /// Returns true if no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.due.is_none()
            && self.priority.is_none()
            && self.name_prefix.is_none()
            && self.tag.is_none()
            && self.description.is_none()
    }
}

/// Evaluates [`FilterCriteria`] against tasks.
///
/// The due-date criterion is evaluated through an already resolved
/// [`DateRange`]; the `due` token on the criteria itself is not consulted.
/// Use [`FilterEvaluator::resolve`] to resolve the token and build the
/// evaluator in one step.
#[derive(Debug)]
pub struct FilterEvaluator<'a> {
    criteria: &'a FilterCriteria,
    range: Option<DateRange>,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates an evaluator with an explicit due range.
    pub fn new(criteria: &'a FilterCriteria, range: Option<DateRange>) -> Self {
        Self { criteria, range }
    }

    /// Resolves the due token of `criteria` (if any) and creates an evaluator.
    ///
    /// # Errors
    ///
    /// Returns an error if the due token cannot be resolved.
    pub fn resolve(
        criteria: &'a FilterCriteria,
        mode: DateInputMode,
        today: NaiveDate,
    ) -> FilterResult<Self> {
        let range = criteria
            .due
            .as_deref()
            .map(|token| resolve_filter_range(token, mode, today))
            .transpose()?;
        Ok(Self::new(criteria, range))
    }

    /// The resolved due range, if a due criterion is present.
    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    /// Returns true if the task satisfies every present criterion.
    pub fn matches(&self, task: &Task) -> bool {
        self.due_matches(task)
            && self.priority_matches(task)
            && self.name_matches(task)
            && self.tag_matches(task)
            && self.description_matches(task)
    }

    /// Filters a slice of tasks, preserving their order.
    pub fn filter_tasks<'b>(&self, tasks: &'b [Task]) -> Vec<&'b Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    fn due_matches(&self, task: &Task) -> bool {
        self.range
            .as_ref()
            .map_or(true, |range| range.contains(task.due_date))
    }

    fn priority_matches(&self, task: &Task) -> bool {
        self.criteria
            .priority
            .map_or(true, |priority| task.priority == priority)
    }

    fn name_matches(&self, task: &Task) -> bool {
        self.criteria
            .name_prefix
            .as_deref()
            .map_or(true, |prefix| task.name.starts_with(prefix))
    }

    fn tag_matches(&self, task: &Task) -> bool {
        self.criteria
            .tag
            .as_deref()
            .map_or(true, |tag| task.tag.to_lowercase() == tag.to_lowercase())
    }

    fn description_matches(&self, task: &Task) -> bool {
        self.criteria.description.as_deref().map_or(true, |needle| {
            task.description
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }
}

/// Returns true if `task` satisfies every present criterion.
///
/// `range` stands in for the due criterion; pass `None` to leave due dates
/// unconstrained.
pub fn matches(task: &Task, criteria: &FilterCriteria, range: Option<DateRange>) -> bool {
    FilterEvaluator::new(criteria, range).matches(task)
}

/// Returns the tasks matching `criteria`, in their original order.
///
/// # Errors
///
/// Fails without filtering anything if the due token cannot be resolved.
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    criteria: &FilterCriteria,
    mode: DateInputMode,
    today: NaiveDate,
) -> FilterResult<Vec<&'a Task>> {
    let evaluator = FilterEvaluator::resolve(criteria, mode, today)?;
    Ok(evaluator.filter_tasks(tasks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterError;
    use crate::models::Status;

    // ==================== Test Helpers ====================

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_task(id: u32, name: &str, due: NaiveDate) -> Task {
        Task::new(id, name, due)
    }

    fn sample_tasks() -> Vec<Task> {
        let mut report = make_task(1, "Write report", date(2024, 3, 15));
        report.priority = Priority::High;
        report.tag = "Work".to_string();
        report.description = "Quarterly numbers for the BOARD".to_string();

        let mut groceries = make_task(2, "Groceries", date(2024, 3, 16));
        groceries.tag = "home".to_string();
        groceries.description = "milk, eggs".to_string();

        let mut review = make_task(3, "Write tests", date(2024, 4, 2));
        review.priority = Priority::Low;
        review.tag = "work".to_string();
        review.status = Status::Review;

        vec![report, groceries, review]
    }

    fn ids(tasks: &[&Task]) -> Vec<u32> {
        tasks.iter().map(|t| t.id).collect()
    }

    // ==================== Empty Criteria ====================

    #[test]
    fn test_empty_criteria_matches_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        for task in sample_tasks() {
            assert!(matches(&task, &criteria, None));
        }
    }

    // ==================== Individual Criteria ====================

    #[test]
    fn test_due_range_inclusive() {
        let tasks = sample_tasks();
        let criteria = FilterCriteria::default();
        let range = DateRange::new(date(2024, 3, 15), date(2024, 3, 16));

        assert!(matches(&tasks[0], &criteria, Some(range)));
        assert!(matches(&tasks[1], &criteria, Some(range)));
        assert!(!matches(&tasks[2], &criteria, Some(range)));
    }

    #[test]
    fn test_priority_equality() {
        let tasks = sample_tasks();
        let criteria = FilterCriteria {
            priority: Some(Priority::Normal),
            ..Default::default()
        };
        let evaluator = FilterEvaluator::new(&criteria, None);
        assert_eq!(ids(&evaluator.filter_tasks(&tasks)), vec![2]);
    }

    #[test]
    fn test_name_prefix_is_case_sensitive() {
        let tasks = sample_tasks();
        let criteria = FilterCriteria {
            name_prefix: Some("Write".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ids(&FilterEvaluator::new(&criteria, None).filter_tasks(&tasks)),
            vec![1, 3]
        );

        let lower = FilterCriteria {
            name_prefix: Some("write".to_string()),
            ..Default::default()
        };
        assert!(FilterEvaluator::new(&lower, None)
            .filter_tasks(&tasks)
            .is_empty());
    }

    #[test]
    fn test_name_prefix_must_be_prefix() {
        let tasks = sample_tasks();
        let criteria = FilterCriteria {
            name_prefix: Some("report".to_string()),
            ..Default::default()
        };
        assert!(!matches(&tasks[0], &criteria, None));
    }

    #[test]
    fn test_tag_case_insensitive() {
        let tasks = sample_tasks();
        let criteria = FilterCriteria {
            tag: Some("WORK".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ids(&FilterEvaluator::new(&criteria, None).filter_tasks(&tasks)),
            vec![1, 3]
        );
    }

    #[test]
    fn test_tag_requires_equality() {
        let tasks = sample_tasks();
        let criteria = FilterCriteria {
            tag: Some("wor".to_string()),
            ..Default::default()
        };
        assert!(FilterEvaluator::new(&criteria, None)
            .filter_tasks(&tasks)
            .is_empty());
    }

    #[test]
    fn test_description_substring_case_insensitive() {
        let tasks = sample_tasks();
        let criteria = FilterCriteria {
            description: Some("board".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ids(&FilterEvaluator::new(&criteria, None).filter_tasks(&tasks)),
            vec![1]
        );
    }

    #[test]
    fn test_empty_description_criterion_matches_all() {
        let tasks = sample_tasks();
        let criteria = FilterCriteria {
            description: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            FilterEvaluator::new(&criteria, None)
                .filter_tasks(&tasks)
                .len(),
            3
        );
    }

    // ==================== Combined Criteria ====================

    #[test]
    fn test_criteria_are_conjunctive() {
        let tasks = sample_tasks();
        // Task 3 has tag "work" but low priority.
        let criteria = FilterCriteria {
            tag: Some("work".to_string()),
            priority: Some(Priority::High),
            ..Default::default()
        };
        assert!(matches(&tasks[0], &criteria, None));
        assert!(!matches(&tasks[2], &criteria, None));
    }

    #[test]
    fn test_filter_tasks_resolves_due_token() {
        let tasks = sample_tasks();
        let today = date(2024, 3, 15);
        let criteria = FilterCriteria {
            due: Some("mar".to_string()),
            tag: Some("work".to_string()),
            ..Default::default()
        };

        let result = filter_tasks(&tasks, &criteria, DateInputMode::Strict, today).unwrap();
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_filter_tasks_keeps_original_order() {
        let mut tasks = sample_tasks();
        tasks.reverse();
        let result = filter_tasks(
            &tasks,
            &FilterCriteria::default(),
            DateInputMode::Strict,
            date(2024, 3, 15),
        )
        .unwrap();
        assert_eq!(ids(&result), vec![3, 2, 1]);
    }

    #[test]
    fn test_filter_tasks_fails_on_bad_due_token() {
        let tasks = sample_tasks();
        let criteria = FilterCriteria {
            due: Some("someday".to_string()),
            ..Default::default()
        };

        let err = filter_tasks(&tasks, &criteria, DateInputMode::Smart, date(2024, 3, 15))
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidToken { ref token, .. } if token == "someday"));
    }

    #[test]
    fn test_resolve_without_due_has_no_range() {
        let criteria = FilterCriteria {
            tag: Some("home".to_string()),
            ..Default::default()
        };
        let evaluator =
            FilterEvaluator::resolve(&criteria, DateInputMode::Strict, date(2024, 3, 15)).unwrap();
        assert!(evaluator.range().is_none());
    }
}
