//! The interview transcript: an ordered, append-only list of turns.
//!
//! Ordering is the only memory the interview has. Turns are never edited or removed;
//! the only way to change a transcript is to append to it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The interviewer (the model).
    Asker,
    /// The person being interviewed.
    Respondent,
}

impl Role {
    /// Upper-case label used in flattened transcripts and text exports.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Asker => "MODEL",
            Role::Respondent => "USER",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last_role(&self) -> Option<Role> {
        self.turns.last().map(|t| t.role)
    }

    pub(crate) fn push(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(Turn {
            role,
            content: content.into(),
        });
    }

    /// Number of questions asked so far.
    pub fn asker_count(&self) -> usize {
        self.count(Role::Asker)
    }

    /// Number of answers given so far.
    pub fn respondent_count(&self) -> usize {
        self.count(Role::Respondent)
    }

    fn count(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role == role).count()
    }

    /// `ROLE: content` lines joined by newlines, as embedded in the report prompt.
    pub fn flatten(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}: {}", t.role.label(), t.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Each (question, answer) pair is one logical question; turn `index` belongs to
/// question `index / 2 + 1`.
pub fn display_number(index: usize) -> usize {
    index / 2 + 1
}
