//! Line-oriented rendering of command results.

use std::io::{self, Write};

use crate::filters::DueAssignment;

pub const NOT_FOUND_MSG: &str = "Course could not be found with the course substring entered.";
pub const NOT_UNIQUE_MSG: &str = "Matches are not unique";
pub const NO_COURSE_ID_MSG: &str = "No course ID found.";

/// Write one course name per line.
pub fn write_course_names<W: Write>(mut out: W, names: &[&str]) -> io::Result<()> {
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

/// Write `<name> due at <raw dueAt>` for each assignment.
pub fn write_assignments<W: Write>(mut out: W, assignments: &[DueAssignment<'_>]) -> io::Result<()> {
    for a in assignments {
        writeln!(out, "{} due at {}", a.name, a.due_at)?;
    }
    Ok(())
}

/// Explain that several courses matched, then list them.
pub fn write_ambiguous<W: Write>(mut out: W, names: &[&str]) -> io::Result<()> {
    writeln!(out, "{NOT_UNIQUE_MSG}")?;
    write_course_names(out, names)
}

pub fn write_message<W: Write>(mut out: W, msg: &str) -> io::Result<()> {
    writeln!(out, "{msg}")
}
