//! In-memory assignment storage
//!
//! The store keeps assignments in insertion order and owns every mutation:
//! - adding from a validated draft
//! - editing fields while preserving completion
//! - deleting
//! - marking as completed (one way)

use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::types::{Assignment, AssignmentDraft, AssignmentId, Course};

/// Required form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Course,
    DueDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "name",
            Field::Course => "course",
            Field::DueDate => "due date",
        })
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("the {0} field is required")]
    MissingField(Field),

    #[error("unknown course: {0}")]
    UnknownCourse(String),

    #[error("no assignment with id {0}")]
    NotFound(AssignmentId),
}

/// Validated draft fields
struct Fields {
    name: String,
    course: Course,
    due_date: String,
}

fn validate(draft: &AssignmentDraft) -> Result<Fields, StoreError> {
    if draft.name.trim().is_empty() {
        return Err(StoreError::MissingField(Field::Name));
    }
    if draft.course.trim().is_empty() {
        return Err(StoreError::MissingField(Field::Course));
    }
    if draft.due_date.trim().is_empty() {
        return Err(StoreError::MissingField(Field::DueDate));
    }

    let course = draft.course.parse::<Course>().map_err(StoreError::UnknownCourse)?;

    Ok(Fields {
        name: draft.name.trim().to_string(),
        course,
        due_date: draft.due_date.trim().to_string(),
    })
}

#[derive(Debug, Default, Clone)]
pub struct AssignmentStore {
    assignments: Vec<Assignment>,
}

impl AssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new, not yet completed assignment
    pub fn add(&mut self, draft: &AssignmentDraft) -> Result<AssignmentId, StoreError> {
        let fields = validate(draft)?;
        let id = AssignmentId::new();

        self.assignments.push(Assignment {
            id,
            name: fields.name,
            course: fields.course,
            due_date: fields.due_date,
            completed: false,
        });

        debug!(id = %id, total = self.assignments.len(), "Assignment added");
        Ok(id)
    }

    /// Overwrite name, course and due date. The completed flag is kept.
    pub fn edit(&mut self, id: AssignmentId, draft: &AssignmentDraft) -> Result<(), StoreError> {
        let fields = validate(draft)?;
        let assignment = self.get_mut(id)?;

        assignment.name = fields.name;
        assignment.course = fields.course;
        assignment.due_date = fields.due_date;

        debug!(id = %id, "Assignment edited");
        Ok(())
    }

    /// Remove an assignment; the rest keep their relative order
    pub fn delete(&mut self, id: AssignmentId) -> Result<Assignment, StoreError> {
        let pos = self
            .assignments
            .iter()
            .position(|a| a.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = self.assignments.remove(pos);
        debug!(id = %id, total = self.assignments.len(), "Assignment deleted");
        Ok(removed)
    }

    /// Set the completed flag. There is no way back.
    pub fn mark_completed(&mut self, id: AssignmentId) -> Result<(), StoreError> {
        let assignment = self.get_mut(id)?;
        if !assignment.completed {
            assignment.completed = true;
            debug!(id = %id, "Assignment completed");
        }
        Ok(())
    }

    pub fn get(&self, id: AssignmentId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == id)
    }

    fn get_mut(&mut self, id: AssignmentId) -> Result<&mut Assignment, StoreError> {
        self.assignments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// All assignments in store order
    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter()
    }

    pub fn as_slice(&self) -> &[Assignment] {
        &self.assignments
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
