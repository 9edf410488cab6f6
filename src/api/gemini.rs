/// Gemini `generateContent` wire format
///
/// Request payload construction and interpretation of the raw HTTP
/// answer into an `EstimationResult`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::EstimateError;
use crate::state::data::EstimationResult;

/// Instruction sent alongside every photo
pub const PROMPT: &str = "Analyze this food image. Provide a brief description of the food and estimate its calorie content. If you cannot determine the food, set description to 'Cannot determine food type' and calories to 'N/A'.";

/// Fallback when an error body carries no message
const UNKNOWN_ERROR: &str = "Unknown error";

// ========== Request ==========

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

impl GenerateContentRequest {
    /// Build the estimation payload for one encoded photo
    pub fn for_photo(mime_type: &str, base64_data: String) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::Text {
                        text: PROMPT.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: base64_data,
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: estimation_schema(),
            },
        }
    }
}

/// The answer must be an object with two required string fields
fn estimation_schema() -> Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "description": { "type": "STRING" },
            "calories": { "type": "STRING" }
        },
        "required": ["description", "calories"]
    })
}

// ========== Response ==========

#[derive(Deserialize, Debug, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    message: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if any
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

/// Turn a raw HTTP answer into the outcome of an estimation cycle
pub fn interpret_response(status: u16, body: &str) -> Result<EstimationResult, EstimateError> {
    if !(200..300).contains(&status) {
        let message = error_message(body);
        warn!("API returned HTTP {}: {}", status, message);
        return Err(EstimateError::Api { status, message });
    }

    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(EstimateError::MalformedResponse)?;

    let Some(text) = response.first_text() else {
        debug!("No candidate text in API response");
        return Ok(EstimationResult::no_content());
    };

    let parsed: Value = serde_json::from_str(text).map_err(|source| EstimateError::Parse {
        source,
        raw: text.to_string(),
    })?;

    match (field_text(&parsed, "description"), field_text(&parsed, "calories")) {
        (Some(description), Some(calories)) => Ok(EstimationResult::new(
            description.trim(),
            calories.trim(),
        )),
        _ => {
            debug!("Answer lacks description or calories: {}", text);
            Ok(EstimationResult::unparsed_fields())
        }
    }
}

/// Human-readable message from an error body, or "Unknown error"
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .and_then(|detail| detail.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

/// A field's text if it is present and truthy
///
/// Null, false, zero and the empty string count as missing. Other
/// non-string values are rendered as their JSON text.
fn field_text(parsed: &Value, key: &str) -> Option<String> {
    match parsed.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str) -> String {
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
        .to_string()
    }

    #[test]
    fn test_request_matches_wire_format() {
        let request = GenerateContentRequest::for_photo("image/png", "iVBORw0KGgo=".to_string());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], PROMPT);
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["data"], "iVBORw0KGgo=");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            json["generationConfig"]["responseSchema"]["properties"]["calories"]["type"],
            "STRING"
        );
        assert_eq!(
            json["generationConfig"]["responseSchema"]["required"],
            serde_json::json!(["description", "calories"])
        );
    }

    #[test]
    fn test_success_values_are_trimmed() {
        let body = answer(r#"{"description": "  Grilled salmon with rice \n", "calories": " 520 kcal "}"#);
        let result = interpret_response(200, &body).unwrap();
        assert_eq!(result, EstimationResult::new("Grilled salmon with rice", "520 kcal"));
    }

    #[test]
    fn test_server_error_carries_status_and_message() {
        let err = interpret_response(500, r#"{"error":{"message":"overloaded"}}"#).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("overloaded"));
    }

    #[test]
    fn test_server_error_without_message_is_unknown() {
        let err = interpret_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to estimate calories: API error: 502 - Unknown error"
        );

        let err = interpret_response(400, r#"{"error":{}}"#).unwrap_err();
        assert!(err.to_string().ends_with("400 - Unknown error"));
    }

    #[test]
    fn test_empty_candidates_is_no_content() {
        let result = interpret_response(200, r#"{"candidates": []}"#).unwrap();
        assert_eq!(result, EstimationResult::no_content());

        let result = interpret_response(200, "{}").unwrap();
        assert_eq!(result, EstimationResult::no_content());
    }

    #[test]
    fn test_missing_parts_or_text_is_no_content() {
        let result = interpret_response(200, r#"{"candidates": [{"content": {"parts": []}}]}"#).unwrap();
        assert_eq!(result, EstimationResult::no_content());

        let result = interpret_response(200, r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(result, EstimationResult::no_content());

        let result = interpret_response(200, &answer("")).unwrap();
        assert_eq!(result, EstimationResult::no_content());
    }

    #[test]
    fn test_invalid_json_text_is_parse_error_with_raw_text() {
        let err = interpret_response(200, &answer("not valid json")).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Failed to parse JSON response:"));
        assert!(message.contains("Raw response: not valid json"));
    }

    #[test]
    fn test_missing_or_falsy_fields_are_placeholder() {
        for text in [
            r#"{"description": "Soup"}"#,
            r#"{"calories": "200"}"#,
            r#"{"description": "", "calories": "200"}"#,
            r#"{"description": "Soup", "calories": null}"#,
            r#"{"description": "Soup", "calories": 0}"#,
            r#"["Soup", "200"]"#,
        ] {
            let result = interpret_response(200, &answer(text)).unwrap();
            assert_eq!(result, EstimationResult::unparsed_fields(), "for {text}");
        }
    }

    #[test]
    fn test_numeric_calories_are_rendered() {
        let result = interpret_response(200, &answer(r#"{"description": "Apple", "calories": 95}"#)).unwrap();
        assert_eq!(result, EstimationResult::new("Apple", "95"));
    }

    #[test]
    fn test_success_body_that_is_not_json_is_malformed() {
        let err = interpret_response(200, "upstream timeout").unwrap_err();
        assert!(matches!(err, EstimateError::MalformedResponse(_)));
    }
}
