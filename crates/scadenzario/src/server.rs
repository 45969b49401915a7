use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::html;
use crate::session::{Action, Menu, Outcome, Session};
use crate::types::{Assignment, AssignmentDraft, AssignmentId};
use crate::views::{self, CourseFilter};

/// Application state shared across requests
#[derive(Default)]
pub struct AppState {
    pub session: RwLock<Session>,
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    #[serde(default)]
    username: String,
}

#[derive(Debug, Deserialize)]
struct CourseForm {
    #[serde(default)]
    course: String,
}

/// Start the web server
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::default());
    let app = router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(url = %format!("http://{}", addr), "Server running");

    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/menu/{menu}", post(menu_handler))
        .route("/course", post(course_handler))
        .route("/assignments", post(add_handler))
        .route("/assignments/{id}/edit", post(begin_edit_handler))
        .route("/assignments/{id}/delete", post(request_delete_handler))
        .route("/assignments/{id}/complete", post(request_complete_handler))
        .route("/edit/save", post(save_edit_handler))
        .route("/edit/cancel", post(cancel_edit_handler))
        .route("/add/cancel", post(clear_add_handler))
        .route("/confirm", post(confirm_handler))
        .route("/dismiss", post(dismiss_handler))
        .route("/api/assignments", get(assignments_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Apply one dashboard action and send the browser back to the dashboard
async fn dispatch(state: &AppState, action: Action) -> Redirect {
    let mut session = state.session.write().await;
    let label = format!("{:?}", action);

    match session.apply(action) {
        Outcome::Applied => debug!(action = %label, "Action applied"),
        Outcome::Ignored => debug!(action = %label, "Action ignored"),
        Outcome::Rejected(e) => info!(action = %label, error = %e, "Action rejected"),
    }

    Redirect::to("/")
}

fn parse_id(raw: &str) -> Option<AssignmentId> {
    match raw.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            debug!(id = %raw, error = %e, "Malformed assignment id");
            None
        }
    }
}

/// Serve the login page or the dashboard
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = state.session.read().await;
    let markup = match session.dashboard() {
        Some(dashboard) => html::render_dashboard(dashboard, &views::today()),
        None => html::render_login_page(),
    };
    Html(markup.into_string())
}

async fn login_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Redirect {
    let mut session = state.session.write().await;
    if !session.login(&form.username) {
        debug!("Login ignored");
    }
    Redirect::to("/")
}

async fn logout_handler(State(state): State<Arc<AppState>>) -> Redirect {
    state.session.write().await.logout();
    Redirect::to("/")
}

async fn menu_handler(State(state): State<Arc<AppState>>, Path(menu): Path<String>) -> Redirect {
    match menu.parse::<Menu>() {
        Ok(menu) => dispatch(&state, Action::SelectMenu(menu)).await,
        Err(e) => {
            debug!(error = %e, "Ignoring menu selection");
            Redirect::to("/")
        }
    }
}

async fn course_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CourseForm>,
) -> Redirect {
    match CourseFilter::parse(&form.course) {
        Some(filter) => dispatch(&state, Action::SelectCourse(filter)).await,
        None => {
            debug!(course = %form.course, "Ignoring unknown course filter");
            Redirect::to("/")
        }
    }
}

async fn add_handler(
    State(state): State<Arc<AppState>>,
    Form(draft): Form<AssignmentDraft>,
) -> Redirect {
    dispatch(&state, Action::Add(draft)).await
}

async fn begin_edit_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Redirect {
    match parse_id(&id) {
        Some(id) => dispatch(&state, Action::BeginEdit(id)).await,
        None => Redirect::to("/"),
    }
}

async fn save_edit_handler(
    State(state): State<Arc<AppState>>,
    Form(draft): Form<AssignmentDraft>,
) -> Redirect {
    dispatch(&state, Action::SaveEdit(draft)).await
}

async fn cancel_edit_handler(State(state): State<Arc<AppState>>) -> Redirect {
    dispatch(&state, Action::CancelEdit).await
}

async fn clear_add_handler(State(state): State<Arc<AppState>>) -> Redirect {
    dispatch(&state, Action::ClearAdd).await
}

async fn request_delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Redirect {
    match parse_id(&id) {
        Some(id) => dispatch(&state, Action::RequestDelete(id)).await,
        None => Redirect::to("/"),
    }
}

async fn request_complete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Redirect {
    match parse_id(&id) {
        Some(id) => dispatch(&state, Action::RequestComplete(id)).await,
        None => Redirect::to("/"),
    }
}

async fn confirm_handler(State(state): State<Arc<AppState>>) -> Redirect {
    dispatch(&state, Action::Confirm).await
}

async fn dismiss_handler(State(state): State<Arc<AppState>>) -> Redirect {
    dispatch(&state, Action::Dismiss).await
}

/// Return the current assignments as JSON
async fn assignments_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Assignment>> {
    let session = state.session.read().await;
    let assignments = session
        .dashboard()
        .map(|d| d.store.as_slice().to_vec())
        .unwrap_or_default();
    Json(assignments)
}
