//! Command execution for `canvasgraphql`.
//!
//! Each command fetches from the client, filters client-side and writes the
//! surviving lines to the supplied writer. Failures are returned to `main`,
//! which decides the exit status.

use std::io::Write;

use chrono::{DateTime, Utc};
use log::{debug, error};

use crate::api::CanvasClient;
use crate::filters::{CourseMatch, ListFilter, resolve_course, select_assignments, select_courses};
use crate::graphql_queries::{assignments_payload, courses_query};
use crate::models::{AssignmentData, AssignmentNode, Course, CourseData};
use crate::printer::{
    NO_COURSE_ID_MSG, NOT_FOUND_MSG, write_ambiguous, write_assignments, write_course_names,
    write_message,
};
use crate::CanvasError;

/// Settings fixed once per invocation and passed to the command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub filter: ListFilter,
    /// Reference instant for due-date comparisons.
    pub now: DateTime<Utc>,
    pub active_term: String,
}

impl CommandContext {
    /// Context for the given filter, with "now" captured at the call.
    #[must_use]
    pub fn new(filter: ListFilter, active_term: impl Into<String>) -> Self {
        Self {
            filter,
            now: Utc::now(),
            active_term: active_term.into(),
        }
    }
}

/// Fetch every course visible to the token.
///
/// # Errors
///
/// Returns a [`CanvasError`] for transport failures, non-2xx responses and
/// malformed bodies.
pub async fn fetch_courses(client: &CanvasClient) -> Result<Vec<Course>, CanvasError> {
    let body = client.send_course_query(&courses_query()).await?.into_body()?;
    let data = CourseData::parse(&body).inspect_err(|e| {
        error!("failed to parse course listing: {e}");
    })?;
    Ok(data.into_courses())
}

/// Fetch the assignment nodes of the course with `course_id`.
///
/// # Errors
///
/// Returns a [`CanvasError`] for transport failures, non-2xx responses and
/// malformed bodies.
pub async fn fetch_assignments(
    client: &CanvasClient,
    course_id: &str,
) -> Result<Vec<AssignmentNode>, CanvasError> {
    let body = client
        .send_assignment_query(&assignments_payload(course_id))
        .await?
        .into_body()?;
    let data = AssignmentData::parse(&body).inspect_err(|e| {
        error!("failed to parse assignment listing: {e}");
    })?;
    Ok(data.into_nodes())
}

/// `list-courses`: print the names of active (or non-active) courses.
///
/// # Errors
///
/// Propagates fetch failures and output errors.
pub async fn run_list_courses<W: Write>(
    client: &CanvasClient,
    ctx: &CommandContext,
    out: W,
) -> Result<(), CanvasError> {
    let courses = fetch_courses(client).await?;
    let names = select_courses(&courses, ctx.filter, &ctx.active_term);
    debug!("{} of {} courses selected", names.len(), courses.len());
    write_course_names(out, &names)?;
    Ok(())
}

/// `list-assignments`: resolve `course` by name fragment, then print its
/// assignments on the requested side of "now".
///
/// Resolution that finds no course, several courses or a course without an id
/// prints a message and sends no assignment request.
///
/// # Errors
///
/// Propagates fetch failures and output errors.
pub async fn run_list_assignments<W: Write>(
    client: &CanvasClient,
    course: &str,
    ctx: &CommandContext,
    mut out: W,
) -> Result<(), CanvasError> {
    let courses = fetch_courses(client).await?;
    let id = match resolve_course(&courses, course) {
        CourseMatch::NotFound => {
            write_message(&mut out, NOT_FOUND_MSG)?;
            return Ok(());
        }
        CourseMatch::Ambiguous(names) => {
            write_ambiguous(&mut out, &names)?;
            return Ok(());
        }
        CourseMatch::MissingId { name } => {
            debug!("course {name} matched '{course}' but has no id");
            write_message(&mut out, NO_COURSE_ID_MSG)?;
            return Ok(());
        }
        CourseMatch::Unique { name, id } => {
            debug!("'{course}' resolved to {name} ({id})");
            id
        }
    };

    let nodes = fetch_assignments(client, id).await?;
    let due = select_assignments(&nodes, ctx.filter, ctx.now);
    write_assignments(out, &due)?;
    Ok(())
}
