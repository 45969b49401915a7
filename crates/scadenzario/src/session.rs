//! Login gate and dashboard view state.
//!
//! Every user interaction becomes an [`Action`] applied to the [`Dashboard`].
//! Destructive actions go through a two-step protocol: a request records a
//! [`PendingConfirmation`], and only a following [`Action::Confirm`] mutates
//! the store.

use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::store::{AssignmentStore, StoreError};
use crate::types::{AssignmentDraft, AssignmentId};
use crate::views::CourseFilter;

/// Dashboard panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Menu {
    #[default]
    Upcoming,
    Course,
    Completed,
    Add,
}

impl Menu {
    pub const ALL: [Menu; 4] = [Menu::Upcoming, Menu::Course, Menu::Completed, Menu::Add];

    /// Path segment used in `/menu/{menu}`
    pub fn slug(&self) -> &'static str {
        match self {
            Menu::Upcoming => "upcoming",
            Menu::Course => "course",
            Menu::Completed => "completed",
            Menu::Add => "add",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Menu::Upcoming => "Upcoming Assignments",
            Menu::Course => "Course Assignments",
            Menu::Completed => "Completed Assignments",
            Menu::Add => "Add Assignment",
        }
    }

    /// Whether this panel renders assignment lists (and so can host an edit)
    pub fn shows_list(&self) -> bool {
        !matches!(self, Menu::Add)
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Menu {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Menu::ALL
            .into_iter()
            .find(|m| m.slug() == s)
            .ok_or_else(|| format!("unknown menu: {s}"))
    }
}

/// An assignment currently being edited, with its form buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: AssignmentId,
    pub draft: AssignmentDraft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Delete(AssignmentId),
    Complete(AssignmentId),
}

/// A destructive action waiting for the user's yes/no answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub action: PendingAction,
}

impl PendingConfirmation {
    pub fn message(&self) -> &'static str {
        match self.action {
            PendingAction::Delete(_) => "Are you sure you want to delete this assignment?",
            PendingAction::Complete(_) => "Mark this assignment as completed?",
        }
    }
}

/// Feedback line shown above the active panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub active_menu: Menu,
    pub selected_course: CourseFilter,
    pub editing: Option<EditSession>,
    pub pending: Option<PendingConfirmation>,

    /// Add form buffer, kept across failed submissions
    pub add_draft: AssignmentDraft,

    pub notice: Option<Notice>,
}

/// User interactions on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectMenu(Menu),
    SelectCourse(CourseFilter),
    Add(AssignmentDraft),
    BeginEdit(AssignmentId),
    SaveEdit(AssignmentDraft),
    CancelEdit,
    ClearAdd,
    RequestDelete(AssignmentId),
    RequestComplete(AssignmentId),
    Confirm,
    Dismiss,
}

/// Result of applying an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed (view state, store, or both)
    Applied,
    /// Nothing happened
    Ignored,
    /// A store mutation was rejected; state is otherwise unchanged
    Rejected(StoreError),
}

/// The logged-in dashboard: one store plus its view state
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub username: String,
    pub store: AssignmentStore,
    pub view: ViewState,
}

impl Dashboard {
    pub fn new(username: String) -> Self {
        Self {
            username,
            store: AssignmentStore::new(),
            view: ViewState::default(),
        }
    }

    pub fn apply(&mut self, action: Action) -> Outcome {
        self.view.notice = None;

        match action {
            Action::SelectMenu(menu) => {
                self.view.active_menu = menu;
                self.view.editing = None;
                self.view.pending = None;
                Outcome::Applied
            }
            Action::SelectCourse(filter) => {
                self.view.selected_course = filter;
                Outcome::Applied
            }
            Action::Add(draft) => match self.store.add(&draft) {
                Ok(_) => {
                    self.view.add_draft = AssignmentDraft::default();
                    let message = format!("Added \"{}\".", draft.name.trim());
                    self.view.notice = Some(Notice::Info(message));
                    Outcome::Applied
                }
                Err(e) => {
                    debug!(error = %e, "Add rejected");
                    self.view.notice = Some(Notice::Error(capitalize(&e.to_string())));
                    self.view.add_draft = draft;
                    Outcome::Rejected(e)
                }
            },
            Action::BeginEdit(id) => {
                if !self.view.active_menu.shows_list() {
                    return Outcome::Ignored;
                }
                let Some(assignment) = self.store.get(id) else {
                    return Outcome::Ignored;
                };
                self.view.editing = Some(EditSession {
                    id,
                    draft: assignment.to_draft(),
                });
                Outcome::Applied
            }
            Action::SaveEdit(draft) => {
                let Some(session) = self.view.editing.take() else {
                    return Outcome::Ignored;
                };
                match self.store.edit(session.id, &draft) {
                    Ok(()) => Outcome::Applied,
                    Err(StoreError::NotFound(id)) => Outcome::Rejected(StoreError::NotFound(id)),
                    Err(e) => {
                        debug!(error = %e, "Edit rejected");
                        self.view.notice = Some(Notice::Error(capitalize(&e.to_string())));
                        self.view.editing = Some(EditSession { id: session.id, draft });
                        Outcome::Rejected(e)
                    }
                }
            }
            Action::CancelEdit => match self.view.editing.take() {
                Some(_) => Outcome::Applied,
                None => Outcome::Ignored,
            },
            Action::ClearAdd => {
                self.view.add_draft = AssignmentDraft::default();
                Outcome::Applied
            }
            Action::RequestDelete(id) => self.request(PendingAction::Delete(id), id),
            Action::RequestComplete(id) => self.request(PendingAction::Complete(id), id),
            Action::Confirm => {
                let Some(pending) = self.view.pending.take() else {
                    return Outcome::Ignored;
                };
                let result = match pending.action {
                    PendingAction::Delete(id) => self.store.delete(id).map(|removed| {
                        if self.view.editing.as_ref().is_some_and(|e| e.id == id) {
                            self.view.editing = None;
                        }
                        info!(name = %removed.name, "Assignment deleted");
                    }),
                    PendingAction::Complete(id) => self.store.mark_completed(id),
                };
                match result {
                    Ok(()) => Outcome::Applied,
                    Err(e) => Outcome::Rejected(e),
                }
            }
            Action::Dismiss => match self.view.pending.take() {
                Some(_) => Outcome::Applied,
                None => Outcome::Ignored,
            },
        }
    }

    fn request(&mut self, action: PendingAction, id: AssignmentId) -> Outcome {
        if self.store.get(id).is_none() {
            return Outcome::Ignored;
        }
        self.view.pending = Some(PendingConfirmation { action });
        Outcome::Applied
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Application state: logged out, or a dashboard for one user
#[derive(Debug, Clone, Default)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(Dashboard),
}

impl Session {
    /// Unlock the dashboard. Blank names are ignored, and so is a login
    /// while a dashboard is already open.
    pub fn login(&mut self, username: &str) -> bool {
        if username.trim().is_empty() {
            return false;
        }
        if let Session::LoggedIn(dashboard) = self {
            debug!(username = %dashboard.username, "Already logged in");
            return false;
        }
        info!(username = %username, "User logged in");
        *self = Session::LoggedIn(Dashboard::new(username.to_string()));
        true
    }

    /// Drop the dashboard and everything in it
    pub fn logout(&mut self) {
        if let Session::LoggedIn(dashboard) = self {
            info!(username = %dashboard.username, "User logged out");
        }
        *self = Session::LoggedOut;
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            Session::LoggedIn(dashboard) => Some(dashboard),
            Session::LoggedOut => None,
        }
    }

    /// Apply a dashboard action; ignored while logged out
    pub fn apply(&mut self, action: Action) -> Outcome {
        match self {
            Session::LoggedIn(dashboard) => dashboard.apply(action),
            Session::LoggedOut => Outcome::Ignored,
        }
    }
}
