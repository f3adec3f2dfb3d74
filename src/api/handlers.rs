//! HTTP endpoint handlers
//!
//! Each handler maps one intent onto the tracker. Intents that don't apply
//! still answer 200 with status "ignored"; only a broken state lock is a 500.

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::error;

use crate::state::{AppState, ElementId, IntentResult, ProjectId, StateError, TimerTransition};
use super::responses::{ApiResponse, HealthResponse, NameRequest, StatusResponse};

fn internal_error(action: &str, e: StateError) -> StatusCode {
    error!("Failed to {}: {}", action, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

fn respond<T>(
    result: IntentResult<T>,
    applied: impl FnOnce(&T) -> Option<String>,
    ignored: &str,
) -> Json<ApiResponse> {
    match applied(&result.outcome) {
        Some(message) => Json(ApiResponse::applied(message, result.tracker)),
        None => Json(ApiResponse::ignored(ignored.to_string(), result.tracker)),
    }
}

/// Handle POST /projects - Create a project
pub async fn create_project_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NameRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state
        .create_project(&body.name)
        .map_err(|e| internal_error("create project", e))?;

    Ok(respond(
        result,
        |id| id.map(|id| format!("Project {} created", id)),
        "Project name is empty",
    ))
}

/// Handle POST /projects/:project_id/elements - Create an element
pub async fn create_element_handler(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<u64>,
    Json(body): Json<NameRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let project_id = ProjectId::new(project_id);
    let result = state
        .create_element(project_id, &body.name)
        .map_err(|e| internal_error("create element", e))?;

    Ok(respond(
        result,
        |id| id.map(|id| format!("Element {} created in project {}", id, project_id)),
        "Element name is empty or project does not exist",
    ))
}

fn toggle_timer(
    state: &AppState,
    project_id: ProjectId,
    element_id: Option<ElementId>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state
        .start_or_stop_timer(project_id, element_id)
        .map_err(|e| internal_error("toggle timer", e))?;

    Ok(respond(
        result,
        |transition| match *transition {
            TimerTransition::Started { target } => Some(format!("Timer started for {}", target)),
            TimerTransition::Stopped { target, committed } => {
                Some(format!("Timer stopped for {}, {}s committed", target, committed))
            }
            TimerTransition::Switched {
                previous,
                committed,
                target,
            } => Some(format!(
                "Timer switched from {} ({}s committed) to {}",
                previous, committed, target
            )),
            TimerTransition::Ignored => None,
        },
        "Timer target does not exist",
    ))
}

/// Handle POST /projects/:project_id/timer - Start or stop the project-level timer
pub async fn project_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<u64>,
) -> Result<Json<ApiResponse>, StatusCode> {
    toggle_timer(&state, ProjectId::new(project_id), None)
}

/// Handle POST /projects/:project_id/elements/:element_id/timer - Start or stop an element timer
pub async fn element_timer_handler(
    State(state): State<Arc<AppState>>,
    Path((project_id, element_id)): Path<(u64, u64)>,
) -> Result<Json<ApiResponse>, StatusCode> {
    toggle_timer(&state, ProjectId::new(project_id), Some(ElementId::new(element_id)))
}

/// Handle DELETE /projects/:project_id - Delete a project
pub async fn delete_project_handler(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<u64>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let project_id = ProjectId::new(project_id);
    let result = state
        .delete_project(project_id)
        .map_err(|e| internal_error("delete project", e))?;

    Ok(respond(
        result,
        |deletion| {
            deletion.as_ref().map(|d| match d.discarded_ticks {
                Some(ticks) => format!("Project {} deleted, {}s of running time discarded", project_id, ticks),
                None => format!("Project {} deleted", project_id),
            })
        },
        "Project does not exist",
    ))
}

/// Handle DELETE /projects/:project_id/elements/:element_id - Delete an element
pub async fn delete_element_handler(
    State(state): State<Arc<AppState>>,
    Path((project_id, element_id)): Path<(u64, u64)>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let element_id = ElementId::new(element_id);
    let result = state
        .delete_element(ProjectId::new(project_id), element_id)
        .map_err(|e| internal_error("delete element", e))?;

    Ok(respond(
        result,
        |deletion| {
            deletion.as_ref().map(|d| match d.discarded_ticks {
                Some(ticks) => format!(
                    "Element {} deleted, {}s subtracted, {}s of running time discarded",
                    element_id, d.subtracted, ticks
                ),
                None => format!("Element {} deleted, {}s subtracted", element_id, d.subtracted),
            })
        },
        "Element does not exist",
    ))
}

/// Handle POST /projects/:project_id/toggle - Flip the expanded flag
pub async fn toggle_expanded_handler(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<u64>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let project_id = ProjectId::new(project_id);
    let result = state
        .toggle_expanded(project_id)
        .map_err(|e| internal_error("toggle project", e))?;

    Ok(respond(
        result,
        |expanded| {
            expanded.map(|expanded| {
                format!(
                    "Project {} {}",
                    project_id,
                    if expanded { "expanded" } else { "collapsed" }
                )
            })
        },
        "Project does not exist",
    ))
}

/// Handle GET /status - Return the tracker snapshot and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let tracker = state.get_view().map_err(|e| internal_error("get tracker view", e))?;
    let timer = state
        .get_timer_state()
        .map_err(|e| internal_error("get timer state", e))?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        tracker,
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
