use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Courses an assignment can belong to.
///
/// Declaration order is the order course groups are displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Course {
    Math,
    Science,
    History,
    English,
}

impl Course {
    pub const ALL: [Course; 4] = [Course::Math, Course::Science, Course::History, Course::English];

    pub fn as_str(&self) -> &'static str {
        match self {
            Course::Math => "Math",
            Course::Science => "Science",
            Course::History => "History",
            Course::English => "English",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Course {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Course::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// Stable identifier assigned to an assignment when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId(Uuid);

impl AssignmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AssignmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for AssignmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A tracked homework assignment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    pub id: AssignmentId,

    /// What has to be done
    pub name: String,

    pub course: Course,

    /// Due date in YYYY-MM-DD format
    pub due_date: String,

    pub completed: bool,
}

impl Assignment {
    /// Build the form buffer for editing this assignment
    pub fn to_draft(&self) -> AssignmentDraft {
        AssignmentDraft {
            name: self.name.clone(),
            course: self.course.to_string(),
            due_date: self.due_date.clone(),
        }
    }
}

/// Raw add/edit form contents, kept exactly as typed until committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDraft {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub course: String,

    #[serde(default)]
    pub due_date: String,
}

impl AssignmentDraft {
    #[cfg(test)]
    pub fn new(name: &str, course: &str, due_date: &str) -> Self {
        Self {
            name: name.to_string(),
            course: course.to_string(),
            due_date: due_date.to_string(),
        }
    }
}
