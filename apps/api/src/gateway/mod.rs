//! Model Gateway: the three request types the interview makes to the external model.
//!
//! - `next_question`: deterministic bootstrap for an empty transcript, otherwise a
//!   high-temperature follow-up. Failures fall back to a fixed question.
//! - `improvise`: non-destructive rewrite of a draft answer. Failures return the draft.
//! - `synthesize_report`: schema-bound report generation. Failures are total.
//!
//! The gateway keeps no conversational state. The full transcript is resent on every call.

pub mod prompts;
#[cfg(test)]
pub mod testing;

use std::sync::{Arc, OnceLock};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::gateway::prompts::*;
use crate::llm_client::prompts::{NO_CLICHE_INSTRUCTION, STRUCTURED_OUTPUT_INSTRUCTION};
use crate::llm_client::{
    ChatMessage, CompletionRequest, LlmClient, LlmError, ModelBackend, StructuredOutput,
};
use crate::models::report::Report;
use crate::models::transcript::{Role, Transcript};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("model credential is not configured")]
    CredentialMissing,

    #[error("model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("model returned a blank reply")]
    BlankReply,

    #[error("report payload violated the schema: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Constructed once per process and shared by reference with every session.
///
/// `backend` is `None` when no credential was configured; each operation then
/// degrades on its own terms instead of failing the whole process.
#[derive(Clone)]
pub struct Gateway {
    backend: Option<Arc<dyn ModelBackend>>,
}

impl Gateway {
    pub fn new(backend: Option<Arc<dyn ModelBackend>>) -> Self {
        Self { backend }
    }

    /// Builds the production gateway over the Anthropic client.
    pub fn from_credential(api_key: Option<String>) -> Self {
        let backend = api_key.map(|key| Arc::new(LlmClient::new(key)) as Arc<dyn ModelBackend>);
        Self::new(backend)
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    fn backend(&self) -> Result<&dyn ModelBackend, GatewayError> {
        self.backend.as_deref().ok_or(GatewayError::CredentialMissing)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Operations
    // ────────────────────────────────────────────────────────────────────────

    /// Returns the next interviewer question. Never fails.
    pub async fn next_question(&self, transcript: &Transcript) -> String {
        if transcript.is_empty() {
            return OPENING_QUESTION.to_string();
        }

        match self.generate_question(transcript).await {
            Ok(question) => question,
            Err(e) => {
                warn!(
                    "Question generation failed after {} turns, using fallback: {e}",
                    transcript.len()
                );
                FALLBACK_QUESTION.to_string()
            }
        }
    }

    async fn generate_question(&self, transcript: &Transcript) -> Result<String, GatewayError> {
        let backend = self.backend()?;
        let reply = backend.complete(&question_request(transcript)).await?;
        let question = reply.trim();
        if question.is_empty() {
            return Err(GatewayError::BlankReply);
        }
        Ok(question.to_string())
    }

    /// Rewrites a draft answer. Returns `draft` untouched on blank input,
    /// missing credential, or any failure.
    pub async fn improvise(&self, draft: &str) -> String {
        if draft.trim().is_empty() {
            return draft.to_string();
        }

        let backend = match self.backend() {
            Ok(b) => b,
            Err(_) => {
                debug!("Improvise skipped: no model credential");
                return draft.to_string();
            }
        };

        match backend.complete(&improvise_request(draft)).await {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => {
                warn!("Improvise returned a blank reply, keeping the draft");
                draft.to_string()
            }
            Err(e) => {
                warn!("Improvise failed, keeping the draft: {e}");
                draft.to_string()
            }
        }
    }

    /// Produces a complete report or nothing. A payload that does not deserialize
    /// into `Report` in full is a failure; partial reports never leave this function.
    pub async fn synthesize_report(&self, transcript: &Transcript) -> Result<Report, GatewayError> {
        let result = self.generate_report(transcript).await;
        match &result {
            Ok(_) => info!("Report synthesized from {} turns", transcript.len()),
            Err(e) => error!("Report synthesis failed ({} turns): {e}", transcript.len()),
        }
        result
    }

    async fn generate_report(&self, transcript: &Transcript) -> Result<Report, GatewayError> {
        let backend = self.backend()?;
        let payload = backend
            .complete_structured(&report_request(transcript), report_contract())
            .await?;
        serde_json::from_value(payload).map_err(GatewayError::Schema)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request shaping
// ────────────────────────────────────────────────────────────────────────────

fn transcript_messages(transcript: &Transcript) -> impl Iterator<Item = ChatMessage> + '_ {
    transcript.turns().iter().map(|turn| match turn.role {
        Role::Asker => ChatMessage::assistant(turn.content.clone()),
        Role::Respondent => ChatMessage::user(turn.content.clone()),
    })
}

/// Directive, then the whole transcript, then the follow-up instruction.
fn question_request(transcript: &Transcript) -> CompletionRequest {
    let mut messages = Vec::with_capacity(transcript.len() + 2);
    messages.push(ChatMessage::user(INTERVIEW_DIRECTIVE));
    messages.extend(transcript_messages(transcript));
    messages.push(ChatMessage::user(FOLLOW_UP_INSTRUCTION));

    CompletionRequest {
        system: None,
        messages,
        temperature: Some(QUESTION_TEMPERATURE),
        max_tokens: None,
    }
}

fn improvise_request(draft: &str) -> CompletionRequest {
    CompletionRequest {
        system: None,
        messages: vec![ChatMessage::user(
            IMPROVISE_PROMPT_TEMPLATE.replace("{text}", draft),
        )],
        temperature: Some(IMPROVISE_TEMPERATURE),
        max_tokens: Some(IMPROVISE_MAX_TOKENS),
    }
}

fn report_request(transcript: &Transcript) -> CompletionRequest {
    let prompt = REPORT_PROMPT_TEMPLATE
        .replace("{no_cliche_instruction}", NO_CLICHE_INSTRUCTION)
        .replace(
            "{structured_output_instruction}",
            STRUCTURED_OUTPUT_INSTRUCTION,
        )
        .replace("{transcript}", &transcript.flatten());

    CompletionRequest {
        system: Some(REPORT_SYSTEM.to_string()),
        messages: vec![ChatMessage::user(prompt)],
        temperature: Some(REPORT_TEMPERATURE),
        max_tokens: Some(REPORT_MAX_TOKENS),
    }
}

/// The structured-output contract, derived from `Report` so the two cannot drift.
fn report_contract() -> &'static StructuredOutput {
    static CONTRACT: OnceLock<StructuredOutput> = OnceLock::new();
    CONTRACT.get_or_init(|| StructuredOutput {
        name: REPORT_TOOL_NAME.to_string(),
        description: REPORT_TOOL_DESCRIPTION.to_string(),
        schema: report_schema(),
    })
}

fn report_schema() -> Value {
    let mut schema = schemars::schema_for!(Report).to_value();
    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
    }
    schema
}
