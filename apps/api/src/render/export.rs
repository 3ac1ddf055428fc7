//! Downloadable artifacts: the plain-text transcript and the report JSON.

use crate::models::report::Report;
use crate::models::transcript::Transcript;

pub const TRANSCRIPT_FILE_NAME: &str = "interview_transcript.txt";
pub const REPORT_FILE_NAME: &str = "life_strategy.json";

const TURN_SEPARATOR: &str = "\n----------------------------------------\n\n";

/// Renders each turn as `[ROLE]\n<content>\n`, separated by a dashed rule.
pub fn transcript_text(transcript: &Transcript) -> String {
    transcript
        .turns()
        .iter()
        .map(|turn| format!("[{}]\n{}\n", turn.role.label(), turn.content))
        .collect::<Vec<_>>()
        .join(TURN_SEPARATOR)
}

pub fn report_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
