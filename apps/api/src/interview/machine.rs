//! Interview state machine: pure transitions from (state, event) to (state, effect).
//!
//! Nothing here performs I/O. An `Effect` names the single external request the
//! caller must make next; its result comes back in as another `Event`. This keeps
//! every turn-cap and ordering rule testable without a gateway.
//!
//! States: AwaitingFirstQuestion → InProgress ⇄ CapReached → Finalizing → Done

use thiserror::Error;
use tracing::debug;

use crate::models::report::Report;
use crate::models::transcript::{Role, Transcript};

#[derive(Debug, Clone, PartialEq)]
pub enum InterviewState {
    AwaitingFirstQuestion,
    InProgress,
    CapReached,
    Finalizing,
    Done(Outcome),
}

/// How report synthesis ended. `Failed` is terminal: the only way out is a new session.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ready(Box<Report>),
    Failed,
}

impl InterviewState {
    pub fn name(&self) -> &'static str {
        match self {
            InterviewState::AwaitingFirstQuestion => "awaiting_first_question",
            InterviewState::InProgress => "in_progress",
            InterviewState::CapReached => "cap_reached",
            InterviewState::Finalizing => "finalizing",
            InterviewState::Done(Outcome::Ready(_)) => "done",
            InterviewState::Done(Outcome::Failed) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Kick off the interview by requesting the opening question.
    Start,
    QuestionReady(String),
    AnswerSubmitted(String),
    /// "Ask more": raise the cap and fetch one more question.
    AskMore,
    Finalize,
    ReportReady(Box<Report>),
    ReportFailed,
}

impl Event {
    fn name(&self) -> &'static str {
        match self {
            Event::Start => "start",
            Event::QuestionReady(_) => "question",
            Event::AnswerSubmitted(_) => "answer",
            Event::AskMore => "ask_more",
            Event::Finalize => "finalize",
            Event::ReportReady(_) => "report_ready",
            Event::ReportFailed => "report_failed",
        }
    }
}

/// The one external request a transition asks for. Each carries the transcript as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchQuestion(Transcript),
    SynthesizeReport(Transcript),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("'{event}' is not allowed while the interview is {state}")]
    NotAllowed {
        event: &'static str,
        state: &'static str,
    },

    #[error("the next question has not arrived yet")]
    QuestionPending,

    #[error("the current question has not been answered yet")]
    AnswerPending,
}

#[derive(Debug, Clone)]
pub struct Interview {
    state: InterviewState,
    transcript: Transcript,
    cap: u32,
    cap_increment: u32,
}

impl Interview {
    pub fn new(cap: u32, cap_increment: u32) -> Self {
        Self {
            state: InterviewState::AwaitingFirstQuestion,
            transcript: Transcript::new(),
            cap,
            cap_increment,
        }
    }

    pub fn state(&self) -> &InterviewState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    pub fn answered_count(&self) -> usize {
        self.transcript.respondent_count()
    }

    pub fn cap_reached(&self) -> bool {
        self.state == InterviewState::CapReached
    }

    pub fn report(&self) -> Option<&Report> {
        match &self.state {
            InterviewState::Done(Outcome::Ready(report)) => Some(report.as_ref()),
            _ => None,
        }
    }

    /// Applies one event. On error the interview is left untouched.
    pub fn apply(&mut self, event: Event) -> Result<Option<Effect>, TransitionError> {
        let event_name = event.name();
        let from = self.state.name();

        let effect = match (&self.state, event) {
            (InterviewState::AwaitingFirstQuestion, Event::Start) => {
                Some(Effect::FetchQuestion(self.transcript.clone()))
            }

            (InterviewState::AwaitingFirstQuestion, Event::QuestionReady(question)) => {
                self.transcript.push(Role::Asker, question);
                self.state = InterviewState::InProgress;
                None
            }

            (InterviewState::InProgress, Event::QuestionReady(question)) => {
                if self.transcript.last_role() != Some(Role::Respondent) {
                    return Err(TransitionError::AnswerPending);
                }
                self.transcript.push(Role::Asker, question);
                None
            }

            // Blank answers are ignored wherever they arrive.
            (_, Event::AnswerSubmitted(text)) if text.trim().is_empty() => None,

            (InterviewState::InProgress, Event::AnswerSubmitted(text)) => {
                if self.transcript.last_role() != Some(Role::Asker) {
                    return Err(TransitionError::QuestionPending);
                }
                self.transcript.push(Role::Respondent, text);

                if self.transcript.asker_count() >= self.cap as usize {
                    self.state = InterviewState::CapReached;
                    None
                } else {
                    Some(Effect::FetchQuestion(self.transcript.clone()))
                }
            }

            (InterviewState::CapReached, Event::AskMore) => {
                self.cap += self.cap_increment;
                self.state = InterviewState::InProgress;
                Some(Effect::FetchQuestion(self.transcript.clone()))
            }

            (InterviewState::InProgress | InterviewState::CapReached, Event::Finalize) => {
                self.state = InterviewState::Finalizing;
                Some(Effect::SynthesizeReport(self.transcript.clone()))
            }

            (InterviewState::Finalizing, Event::ReportReady(report)) => {
                self.state = InterviewState::Done(Outcome::Ready(report));
                None
            }

            (InterviewState::Finalizing, Event::ReportFailed) => {
                self.state = InterviewState::Done(Outcome::Failed);
                None
            }

            _ => {
                return Err(TransitionError::NotAllowed {
                    event: event_name,
                    state: from,
                })
            }
        };

        debug!(
            "Interview transition: {} --{}--> {} (turns={}, cap={})",
            from,
            event_name,
            self.state.name(),
            self.transcript.len(),
            self.cap
        );

        Ok(effect)
    }
}
