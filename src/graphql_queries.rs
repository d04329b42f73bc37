//! GraphQL documents and request envelopes sent to the Canvas endpoint.

use serde_json::json;

use crate::api::{Payload, Query};

pub const COURSES_QUERY: &str = r"query MyQuery {
  allCourses {
    name
    id
    term {
      name
    }
  }
}
";

pub const ASSIGNMENTS_QUERY: &str = r"query CourseAssignments($id: ID!) {
  course(id: $id) {
    assignmentsConnection {
      nodes {
        dueAt
        name
      }
    }
  }
}
";

/// The document listing every course visible to the token.
#[must_use]
pub fn courses_query() -> Query {
    Query::from(COURSES_QUERY)
}

/// Envelope for the assignments of `course_id`.
///
/// The id travels as a GraphQL variable, so quote characters in it cannot
/// corrupt the request body.
#[must_use]
pub fn assignments_payload(course_id: &str) -> Payload {
    Payload::new(json!({
        "query": ASSIGNMENTS_QUERY,
        "variables": { "id": course_id },
    }))
}
