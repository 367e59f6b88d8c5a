//! Reply parsing for answer and suggestion calls

use super::types::RawReply;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// `candidates[0].content.parts[0].text` is missing (or blank, for answers)
    #[error("Reply has no text payload")]
    MalformedReply,
    /// Text is present but is not a JSON array of strings
    #[error("Suggestion payload is not a string array: {0}")]
    InvalidSuggestionFormat(String),
}

/// Extract the raw answer text, rejecting blank payloads
pub fn answer_text(reply: &RawReply) -> Result<&str, ParseError> {
    reply
        .first_text()
        .filter(|text| !text.trim().is_empty())
        .ok_or(ParseError::MalformedReply)
}

/// Split the answer into trimmed, non-empty lines in their original order
pub fn parse_answer(reply: &RawReply) -> Result<Vec<String>, ParseError> {
    let text = answer_text(reply)?;
    Ok(split_lines(text))
}

/// Decode the structured suggestion list
pub fn parse_suggestions(reply: &RawReply) -> Result<Vec<String>, ParseError> {
    let text = reply.first_text().ok_or(ParseError::MalformedReply)?;
    serde_json::from_str::<Vec<String>>(text)
        .map_err(|e| ParseError::InvalidSuggestionFormat(e.to_string()))
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
