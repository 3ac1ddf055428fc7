//! Interview session: drives the pure state machine against the gateway.
//!
//! Each public operation feeds one user event into the machine, then executes the
//! effects it asks for until it settles. Gateway failures never escape: questions
//! fall back to fixed text and a failed synthesis becomes the terminal `failed` state.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::OwnedMutexGuard;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::gateway::Gateway;
use crate::interview::machine::{Effect, Event, Interview, TransitionError};
use crate::models::transcript::{display_number, Role, Transcript};

/// A user action that moves the interview forward.
#[derive(Debug, Clone)]
pub enum Command {
    Answer(String),
    AskMore,
    Finalize,
}

pub struct InterviewSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    interview: Interview,
}

impl InterviewSession {
    /// Creates a session and fetches its opening question.
    pub async fn start(
        gateway: &Gateway,
        cap: u32,
        cap_increment: u32,
    ) -> Result<Self, TransitionError> {
        let mut session = Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            interview: Interview::new(cap, cap_increment),
        };
        session.dispatch(Event::Start, gateway).await?;
        info!("Interview {} started (cap={cap})", session.id);
        Ok(session)
    }

    pub fn interview(&self) -> &Interview {
        &self.interview
    }

    pub fn transcript(&self) -> &Transcript {
        self.interview.transcript()
    }

    /// Blank text is accepted and ignored.
    pub async fn submit_answer(
        &mut self,
        text: String,
        gateway: &Gateway,
    ) -> Result<(), TransitionError> {
        self.dispatch(Event::AnswerSubmitted(text), gateway).await
    }

    pub async fn ask_more(&mut self, gateway: &Gateway) -> Result<(), TransitionError> {
        self.dispatch(Event::AskMore, gateway).await?;
        info!(
            "Interview {} extended to {} questions",
            self.id,
            self.interview.cap()
        );
        Ok(())
    }

    /// Runs report synthesis on whatever has been said so far, however short.
    pub async fn finalize(&mut self, gateway: &Gateway) -> Result<(), TransitionError> {
        info!(
            "Interview {} finalizing after {} answers",
            self.id,
            self.interview.answered_count()
        );
        self.dispatch(Event::Finalize, gateway).await
    }

    /// Runs `command` on a task that owns the session lock and returns the
    /// resulting view. Dropping the handle does not stop the task: a transition
    /// that has started always reaches its settled state.
    pub fn spawn_command(
        mut session: OwnedMutexGuard<Self>,
        command: Command,
        gateway: Gateway,
    ) -> JoinHandle<Result<SessionView, TransitionError>> {
        tokio::spawn(async move {
            match command {
                Command::Answer(text) => session.submit_answer(text, &gateway).await?,
                Command::AskMore => session.ask_more(&gateway).await?,
                Command::Finalize => session.finalize(&gateway).await?,
            }
            Ok(session.view())
        })
    }

    /// Refines a draft answer. The transcript is not touched.
    pub async fn improvise(&self, draft: &str, gateway: &Gateway) -> String {
        gateway.improvise(draft).await
    }

    async fn dispatch(&mut self, event: Event, gateway: &Gateway) -> Result<(), TransitionError> {
        let mut pending = self.interview.apply(event)?;

        while let Some(effect) = pending {
            let outcome = match effect {
                Effect::FetchQuestion(transcript) => {
                    Event::QuestionReady(gateway.next_question(&transcript).await)
                }
                Effect::SynthesizeReport(transcript) => {
                    match gateway.synthesize_report(&transcript).await {
                        Ok(report) => Event::ReportReady(Box::new(report)),
                        Err(_) => Event::ReportFailed,
                    }
                }
            };
            pending = self.interview.apply(outcome)?;
        }

        Ok(())
    }

    pub fn view(&self) -> SessionView {
        let interview = &self.interview;
        SessionView {
            id: self.id,
            state: interview.state().name(),
            question_cap: interview.cap(),
            answered: interview.answered_count(),
            cap_reached: interview.cap_reached(),
            report_ready: interview.report().is_some(),
            turns: interview
                .transcript()
                .turns()
                .iter()
                .enumerate()
                .map(|(index, turn)| TurnView {
                    number: display_number(index),
                    role: turn.role,
                    content: turn.content.clone(),
                })
                .collect(),
            created_at: self.created_at,
        }
    }
}

/// What clients see of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub state: &'static str,
    pub question_cap: u32,
    pub answered: usize,
    pub cap_reached: bool,
    pub report_ready: bool,
    pub turns: Vec<TurnView>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnView {
    pub number: usize,
    pub role: Role,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::Mutex;

    use crate::gateway::prompts::{FALLBACK_QUESTION, OPENING_QUESTION};
    use crate::gateway::testing::ScriptedBackend;
    use crate::llm_client::{LlmError, ModelBackend};
    use crate::models::report::sample_report;

    fn scripted() -> (Arc<ScriptedBackend>, Gateway) {
        let backend = Arc::new(ScriptedBackend::default());
        let gateway = Gateway::new(Some(backend.clone() as Arc<dyn ModelBackend>));
        (backend, gateway)
    }

    #[tokio::test]
    async fn test_start_uses_opening_question_without_model_call() {
        let (backend, gateway) = scripted();
        let session = InterviewSession::start(&gateway, 30, 5).await.unwrap();

        let view = session.view();
        assert_eq!(view.state, "in_progress");
        assert_eq!(view.turns.len(), 1);
        assert_eq!(view.turns[0].content, OPENING_QUESTION);
        assert_eq!(view.turns[0].number, 1);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_answer_appends_answer_and_next_question() {
        let (backend, gateway) = scripted();
        backend.push_text(Ok("Why Porto?".to_string()));
        let mut session = InterviewSession::start(&gateway, 30, 5).await.unwrap();

        session
            .submit_answer("Porto".to_string(), &gateway)
            .await
            .unwrap();

        let view = session.view();
        assert_eq!(view.turns.len(), 3);
        assert_eq!(view.turns[1].role, Role::Respondent);
        assert_eq!(view.turns[2].content, "Why Porto?");
        assert_eq!(view.turns[2].number, 2);
        assert_eq!(view.answered, 1);
    }

    #[tokio::test]
    async fn test_question_failure_keeps_interview_moving() {
        let (backend, gateway) = scripted();
        backend.push_text(Err(LlmError::EmptyContent));
        let mut session = InterviewSession::start(&gateway, 30, 5).await.unwrap();

        session
            .submit_answer("Porto".to_string(), &gateway)
            .await
            .unwrap();

        assert_eq!(session.view().turns[2].content, FALLBACK_QUESTION);
        assert_eq!(session.view().state, "in_progress");
    }

    #[tokio::test]
    async fn test_blank_answer_changes_nothing() {
        let (backend, gateway) = scripted();
        let mut session = InterviewSession::start(&gateway, 30, 5).await.unwrap();

        session.submit_answer("   ".to_string(), &gateway).await.unwrap();

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_thirty_answers_reach_cap_then_ask_more() {
        let (backend, gateway) = scripted();
        let mut session = InterviewSession::start(&gateway, 30, 5).await.unwrap();

        for i in 1..=30 {
            backend.push_text(Ok(format!("Question {}", i + 1)));
            session
                .submit_answer(format!("Answer {i}"), &gateway)
                .await
                .unwrap();
        }

        let view = session.view();
        assert_eq!(view.state, "cap_reached");
        assert!(view.cap_reached);
        assert_eq!(view.answered, 30);
        // Only 29 follow-ups were fetched; the 30th answer hit the cap.
        assert_eq!(backend.calls(), 29);

        session.ask_more(&gateway).await.unwrap();

        let view = session.view();
        assert_eq!(view.state, "in_progress");
        assert_eq!(view.question_cap, 35);
        assert_eq!(session.transcript().asker_count(), 31);
        assert_eq!(session.transcript().last_role(), Some(Role::Asker));
        assert_eq!(backend.calls(), 30);
    }

    #[tokio::test]
    async fn test_answer_at_cap_rejected() {
        let (backend, gateway) = scripted();
        let mut session = InterviewSession::start(&gateway, 1, 5).await.unwrap();
        session.submit_answer("A1".to_string(), &gateway).await.unwrap();
        assert_eq!(session.view().state, "cap_reached");

        let result = session.submit_answer("A2".to_string(), &gateway).await;

        assert!(result.is_err());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_finalize_success_stores_report() {
        let (backend, gateway) = scripted();
        backend.push_structured(Ok(serde_json::to_value(sample_report()).unwrap()));
        let mut session = InterviewSession::start(&gateway, 30, 5).await.unwrap();

        session.finalize(&gateway).await.unwrap();

        assert_eq!(session.view().state, "done");
        assert!(session.view().report_ready);
        assert_eq!(session.interview().report(), Some(&sample_report()));
    }

    #[tokio::test]
    async fn test_finalize_without_credential_fails_terminally() {
        let gateway = Gateway::new(None);
        let mut session = InterviewSession::start(&gateway, 30, 5).await.unwrap();

        session.finalize(&gateway).await.unwrap();

        assert_eq!(session.view().state, "failed");
        assert!(session.interview().report().is_none());
        assert!(session.finalize(&gateway).await.is_err());
    }

    #[tokio::test]
    async fn test_improvise_leaves_transcript_alone() {
        let (backend, gateway) = scripted();
        backend.push_text(Ok("I am drawn to cartography.".to_string()));
        let session = InterviewSession::start(&gateway, 30, 5).await.unwrap();

        let refined = session.improvise("i like maps", &gateway).await;

        assert_eq!(refined, "I am drawn to cartography.");
        assert_eq!(session.transcript().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_answer_still_settles() {
        let backend = Arc::new(ScriptedBackend::with_delay(Duration::from_secs(5)));
        backend.push_text(Ok("Why Porto?".to_string()));
        let gateway = Gateway::new(Some(backend.clone() as Arc<dyn ModelBackend>));
        let session = InterviewSession::start(&gateway, 30, 5).await.unwrap();
        let shared = Arc::new(Mutex::new(session));

        let task = InterviewSession::spawn_command(
            shared.clone().lock_owned().await,
            Command::Answer("Porto".to_string()),
            gateway.clone(),
        );
        assert!(tokio::time::timeout(Duration::from_millis(20), task)
            .await
            .is_err());

        let session = shared.lock().await;
        let view = session.view();
        assert_eq!(view.state, "in_progress");
        assert_eq!(view.turns.len(), 3);
        assert_eq!(view.turns[2].content, "Why Porto?");
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_finalize_still_reaches_done() {
        let backend = Arc::new(ScriptedBackend::with_delay(Duration::from_secs(5)));
        backend.push_structured(Ok(serde_json::to_value(sample_report()).unwrap()));
        let gateway = Gateway::new(Some(backend.clone() as Arc<dyn ModelBackend>));
        let session = InterviewSession::start(&gateway, 30, 5).await.unwrap();
        let shared = Arc::new(Mutex::new(session));

        let task = InterviewSession::spawn_command(
            shared.clone().lock_owned().await,
            Command::Finalize,
            gateway.clone(),
        );
        assert!(tokio::time::timeout(Duration::from_millis(20), task)
            .await
            .is_err());

        let session = shared.lock().await;
        assert_eq!(session.view().state, "done");
        assert_eq!(session.interview().report(), Some(&sample_report()));
    }

    #[tokio::test]
    async fn test_spawned_command_returns_view() {
        let (backend, gateway) = scripted();
        backend.push_text(Ok("Why Porto?".to_string()));
        let session = InterviewSession::start(&gateway, 30, 5).await.unwrap();
        let shared = Arc::new(Mutex::new(session));

        let view = InterviewSession::spawn_command(
            shared.clone().lock_owned().await,
            Command::Answer("Porto".to_string()),
            gateway,
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(view.answered, 1);
        assert!(!shared.try_lock().unwrap().transcript().is_empty());
    }
}
