//! Client-side selection of courses and assignments.

use chrono::{DateTime, Utc};
use log::warn;

use crate::due_date::parse_due_at;
use crate::models::{AssignmentNode, Course};

/// Term name Canvas gives to sandbox and non-term courses.
pub const DEFAULT_TERM: &str = "Default Term";

/// Term whose courses count as active unless overridden.
pub const ACTIVE_TERM: &str = "Spring 2024";

/// Which side of the active/non-active split to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    Active,
    Inactive,
}

impl ListFilter {
    /// Fold the `--active`/`--no-active` flags; `--no-active` wins when both
    /// are given and listing active items is the default.
    #[must_use]
    pub fn from_flags(active: bool, no_active: bool) -> Self {
        match (active, no_active) {
            (_, true) => Self::Inactive,
            (_, false) => Self::Active,
        }
    }

    fn keeps(self, is_active: bool) -> bool {
        match self {
            Self::Active => is_active,
            Self::Inactive => !is_active,
        }
    }
}

/// Names of the courses on the requested side of the term split.
///
/// Courses without a name or term name, and courses in [`DEFAULT_TERM`], are
/// never listed.
#[must_use]
pub fn select_courses<'a>(
    courses: &'a [Course],
    filter: ListFilter,
    active_term: &str,
) -> Vec<&'a str> {
    courses
        .iter()
        .filter_map(|course| Some((course.name.as_deref()?, course.term_name()?)))
        .filter(|(_, term)| *term != DEFAULT_TERM)
        .filter(|(_, term)| filter.keeps(*term == active_term))
        .map(|(name, _)| name)
        .collect()
}

/// Result of looking a course up by name fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseMatch<'a> {
    NotFound,
    Ambiguous(Vec<&'a str>),
    MissingId { name: &'a str },
    Unique { name: &'a str, id: &'a str },
}

/// Find the single course whose name contains `needle`, ignoring case.
#[must_use]
pub fn resolve_course<'a>(courses: &'a [Course], needle: &str) -> CourseMatch<'a> {
    let needle = needle.to_lowercase();
    let matches: Vec<&Course> = courses
        .iter()
        .filter(|c| {
            c.name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect();
    match matches.as_slice() {
        [] => CourseMatch::NotFound,
        [course] => {
            let course: &'a Course = *course;
            let name = course.name.as_deref().unwrap_or_default();
            course
                .id
                .as_deref()
                .map_or(CourseMatch::MissingId { name }, |id| CourseMatch::Unique {
                    name,
                    id,
                })
        }
        many => CourseMatch::Ambiguous(
            many.iter()
                .copied()
                .filter_map(|c: &'a Course| c.name.as_deref())
                .collect(),
        ),
    }
}

/// An assignment that survived the due-date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueAssignment<'a> {
    pub name: &'a str,
    /// The timestamp exactly as the server sent it.
    pub due_at: &'a str,
}

/// Assignments due at or after `now` ([`ListFilter::Active`]) or strictly
/// before it ([`ListFilter::Inactive`]), in source order.
///
/// Nodes missing a name or due date are skipped; unparseable due dates are
/// logged and skipped.
#[must_use]
pub fn select_assignments(
    nodes: &[AssignmentNode],
    filter: ListFilter,
    now: DateTime<Utc>,
) -> Vec<DueAssignment<'_>> {
    nodes
        .iter()
        .filter_map(|node| {
            let name = node.name.as_deref()?;
            let due_at = node.due_at.as_deref()?;
            match parse_due_at(due_at) {
                Ok(due) => filter
                    .keeps(due >= now)
                    .then_some(DueAssignment { name, due_at }),
                Err(e) => {
                    warn!("failed to parse due date '{due_at}' for {name}: {e}");
                    None
                }
            }
        })
        .collect()
}
