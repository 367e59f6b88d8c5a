//! Request construction for the two call types
//!
//! Both builders are pure. Callers reject blank prompts before building.

use super::types::{Content, GenerateRequest, GenerationConfig, ResponseSchema};
use crate::persona::Persona;

const JSON_MIME_TYPE: &str = "application/json";

/// Free-text answer to `prompt`, in the voice of `persona`
pub fn build_answer_request(prompt: &str, persona: Persona) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content::text(prompt)],
        system_instruction: Some(Content::text(persona.instruction())),
        generation_config: None,
    }
}

/// Follow-up questions for the exchange `(prompt, answer)`, as a JSON array
/// of strings
pub fn build_suggestion_request(prompt: &str, answer: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content::text(suggestion_prompt(prompt, answer))],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_mime_type: JSON_MIME_TYPE.to_string(),
            response_schema: ResponseSchema::array_of(ResponseSchema::string()),
        }),
    }
}

fn suggestion_prompt(prompt: &str, answer: &str) -> String {
    format!(
        "Based on the last question (\"{prompt}\") and its answer (\"{answer}\"), generate three short and relevant follow-up questions a user might ask."
    )
}
