//! Data structures for Canvas GraphQL responses.
//!
//! Every nesting level is optional. A missing or `null` level means "no
//! items", which the `into_*` accessors resolve explicitly; only malformed
//! JSON is an error.

use log::warn;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::CanvasError;
use crate::api::{BODY_SNIPPET_LEN, snippet};

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GraphQLError {
    #[serde(default)]
    pub message: String,
}

/// `{ data: { allCourses: [Course] } }`
#[derive(Debug, Deserialize, Default)]
pub struct CourseData {
    pub data: Option<CourseList>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CourseList {
    pub all_courses: Option<Vec<Option<Course>>>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Course {
    pub name: Option<String>,
    pub id: Option<String>,
    pub term: Option<Term>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Term {
    pub name: Option<String>,
}

impl Course {
    #[must_use]
    pub fn term_name(&self) -> Option<&str> {
        self.term.as_ref().and_then(|t| t.name.as_deref())
    }
}

/// `{ data: { course: { assignmentsConnection: { nodes: [Node] } } } }`
#[derive(Debug, Deserialize, Default)]
pub struct AssignmentData {
    pub data: Option<AssignmentCourseData>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AssignmentCourseData {
    pub course: Option<AssignmentCourse>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentCourse {
    pub assignments_connection: Option<AssignmentConnection>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AssignmentConnection {
    pub nodes: Option<Vec<Option<AssignmentNode>>>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentNode {
    pub name: Option<String>,
    pub due_at: Option<String>,
}

impl CourseData {
    /// Deserialize a course listing body.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::BadResponseSerde`] when `body` is not valid JSON
    /// of the expected shape.
    pub fn parse(body: &str) -> Result<Self, CanvasError> {
        let parsed: Self = parse_body(body)?;
        log_graphql_errors(parsed.errors.as_deref());
        Ok(parsed)
    }

    /// The listed courses in source order, skipping `null` entries.
    #[must_use]
    pub fn into_courses(self) -> Vec<Course> {
        let Some(list) = self.data else {
            return Vec::new();
        };
        let Some(courses) = list.all_courses else {
            return Vec::new();
        };
        courses.into_iter().flatten().collect()
    }
}

impl AssignmentData {
    /// Deserialize an assignment listing body.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::BadResponseSerde`] when `body` is not valid JSON
    /// of the expected shape.
    pub fn parse(body: &str) -> Result<Self, CanvasError> {
        let parsed: Self = parse_body(body)?;
        log_graphql_errors(parsed.errors.as_deref());
        Ok(parsed)
    }

    /// The assignment nodes in source order, skipping `null` entries.
    #[must_use]
    pub fn into_nodes(self) -> Vec<AssignmentNode> {
        let Some(data) = self.data else {
            return Vec::new();
        };
        let Some(course) = data.course else {
            return Vec::new();
        };
        let Some(connection) = course.assignments_connection else {
            return Vec::new();
        };
        let Some(nodes) = connection.nodes else {
            return Vec::new();
        };
        nodes.into_iter().flatten().collect()
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, CanvasError> {
    let bad_response = |message: String| CanvasError::BadResponseSerde {
        message,
        snippet: snippet(body, BODY_SNIPPET_LEN),
    };
    let mut de = serde_json::Deserializer::from_str(body);
    let parsed = serde_path_to_error::deserialize(&mut de).map_err(|e| {
        let path = e.path().to_string();
        bad_response(format!("{} at {path}", e.into_inner()))
    })?;
    de.end().map_err(|e| bad_response(e.to_string()))?;
    Ok(parsed)
}

fn log_graphql_errors(errors: Option<&[GraphQLError]>) {
    let Some(errors) = errors.filter(|e| !e.is_empty()) else {
        return;
    };
    let msg = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    warn!("GraphQL errors: {msg}");
}
