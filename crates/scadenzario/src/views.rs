//! Derived views of the store used by the dashboard panels.
//!
//! Due dates are YYYY-MM-DD strings, so plain string comparison gives
//! chronological order.

use std::collections::BTreeMap;

use crate::store::AssignmentStore;
use crate::types::{Assignment, Course};

/// Placeholder shown when a panel has nothing to list
pub const EMPTY_PLACEHOLDER: &str = "No assignments found.";

/// Which course groups the course panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseFilter {
    #[default]
    All,
    Only(Course),
}

impl CourseFilter {
    /// Parse a select value: "All" or a course name
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Some(CourseFilter::All);
        }
        value.parse::<Course>().ok().map(CourseFilter::Only)
    }

    pub fn value(&self) -> &'static str {
        match self {
            CourseFilter::All => "All",
            CourseFilter::Only(course) => course.as_str(),
        }
    }

    fn accepts(&self, course: Course) -> bool {
        match self {
            CourseFilter::All => true,
            CourseFilter::Only(selected) => *selected == course,
        }
    }
}

/// Incomplete assignments, earliest due date first
pub fn upcoming(store: &AssignmentStore) -> Vec<&Assignment> {
    let mut items: Vec<&Assignment> = store.iter().filter(|a| !a.completed).collect();
    items.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    items
}

/// Completed assignments in store order
pub fn completed(store: &AssignmentStore) -> Vec<&Assignment> {
    store.iter().filter(|a| a.completed).collect()
}

/// Incomplete assignments grouped by course, restricted by the filter.
/// Groups follow course order; items inside a group follow store order.
pub fn by_course(
    store: &AssignmentStore,
    filter: CourseFilter,
) -> BTreeMap<Course, Vec<&Assignment>> {
    let mut groups: BTreeMap<Course, Vec<&Assignment>> = BTreeMap::new();
    for assignment in store.iter().filter(|a| !a.completed) {
        if filter.accepts(assignment.course) {
            groups.entry(assignment.course).or_default().push(assignment);
        }
    }
    groups
}

/// True when an incomplete assignment's due date is strictly before `today`
pub fn is_overdue(assignment: &Assignment, today: &str) -> bool {
    !assignment.completed && assignment.due_date.as_str() < today
}

/// Today's local date as YYYY-MM-DD
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
