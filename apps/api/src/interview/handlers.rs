//! Axum route handlers for the Interview API.
//!
//! Handlers are thin: claim the session, run one operation, return its view.
//! Commands run on their own task so a dropped connection cannot leave a
//! session halfway through a transition. Reads wait for a running command.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::OwnedMutexGuard;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::interview::machine::{InterviewState, Outcome};
use crate::interview::session::{Command, InterviewSession, SessionView};
use crate::layout::{paginate, FontFamily, Page, PageConfig};
use crate::models::report::Report;
use crate::render::export::{
    report_json, transcript_text, REPORT_FILE_NAME, TRANSCRIPT_FILE_NAME,
};
use crate::render::{report_sections, ReportSection};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DocumentQuery {
    #[serde(default)]
    pub font: FontFamily,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub font: FontFamily,
    pub page_count: usize,
    pub pages: Vec<Page>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews
///
/// Creates a session and returns it with the opening question in place.
pub async fn handle_create_interview(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let session = InterviewSession::start(
        &state.gateway,
        state.config.question_cap,
        state.config.cap_increment,
    )
    .await?;
    let view = session.view();
    state.sessions.insert(session).await;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.read(id).await?;
    Ok(Json(session.view()))
}

/// POST /api/v1/interviews/:id/answers
///
/// Blank text is accepted and changes nothing.
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(req): AppJson<TextRequest>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.claim(id).await?;
    run(session, Command::Answer(req.text), &state).await
}

/// POST /api/v1/interviews/:id/improvise
///
/// Returns the refined draft. The transcript is never touched.
pub async fn handle_improvise(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(req): AppJson<TextRequest>,
) -> Result<Json<TextResponse>, AppError> {
    let session = state.sessions.claim(id).await?;
    let text = session.improvise(&req.text, &state.gateway).await;
    Ok(Json(TextResponse { text }))
}

/// POST /api/v1/interviews/:id/continue
pub async fn handle_ask_more(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.claim(id).await?;
    run(session, Command::AskMore, &state).await
}

/// POST /api/v1/interviews/:id/finalize
///
/// Runs report synthesis. The returned view is `done` or `failed`.
pub async fn handle_finalize(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.claim(id).await?;
    run(session, Command::Finalize, &state).await
}

/// GET /api/v1/interviews/:id/report
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Report>, AppError> {
    let session = state.sessions.read(id).await?;
    let report = ready_report(&session)?.clone();
    Ok(Json(report))
}

/// GET /api/v1/interviews/:id/report/sections
pub async fn handle_get_report_sections(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReportSection>>, AppError> {
    let session = state.sessions.read(id).await?;
    let sections = report_sections(ready_report(&session)?);
    Ok(Json(sections))
}

/// GET /api/v1/interviews/:id/export/transcript
///
/// Available in every state, including after a failed synthesis.
pub async fn handle_export_transcript(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.read(id).await?;
    let body = transcript_text(session.transcript());
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, attachment(TRANSCRIPT_FILE_NAME)),
        ],
        body,
    ))
}

/// GET /api/v1/interviews/:id/export/report.json
pub async fn handle_export_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.read(id).await?;
    let body = report_json(ready_report(&session)?)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("report serialization failed: {e}")))?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, attachment(REPORT_FILE_NAME)),
        ],
        body,
    ))
}

/// GET /api/v1/interviews/:id/export/document?font=sans|serif
///
/// Lays the report out on A4 pages.
pub async fn handle_export_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DocumentQuery>,
) -> Result<Json<DocumentResponse>, AppError> {
    let session = state.sessions.read(id).await?;
    let sections = report_sections(ready_report(&session)?);
    drop(session);

    let config = PageConfig::a4(query.font);
    // CPU-bound wrapping runs off the async executor.
    let pages = tokio::task::spawn_blocking(move || paginate(&sections, &config))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in pagination: {e}"))
        })?;

    Ok(Json(DocumentResponse {
        font: query.font,
        page_count: pages.len(),
        pages,
    }))
}

/// DELETE /api/v1/interviews/:id
pub async fn handle_delete_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    info!(
        "Interview {id} discarded ({} still active)",
        state.sessions.len().await
    );
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn run(
    session: OwnedMutexGuard<InterviewSession>,
    command: Command,
    state: &AppState,
) -> Result<Json<SessionView>, AppError> {
    let view = InterviewSession::spawn_command(session, command, state.gateway.clone())
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("interview task failed: {e}")))??;
    Ok(Json(view))
}

fn ready_report(session: &InterviewSession) -> Result<&Report, AppError> {
    match session.interview().state() {
        InterviewState::Done(Outcome::Ready(report)) => Ok(report.as_ref()),
        InterviewState::Done(Outcome::Failed) => Err(AppError::ReportUnavailable(
            "Report synthesis failed; start a new interview".to_string(),
        )),
        other => Err(AppError::ReportUnavailable(format!(
            "No report yet: interview is {}",
            other.name()
        ))),
    }
}

fn attachment(file_name: &str) -> String {
    format!("attachment; filename=\"{file_name}\"")
}
