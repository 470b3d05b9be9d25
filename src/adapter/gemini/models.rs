//! Gemini API Models
//!
//! generateContent APIのレスポンスモデルとテキスト抽出

use serde::Deserialize;

use super::client::GenerativeApiError;

/// Finish reasons that still carry usable text
const ACCEPTED_FINISH_REASONS: [&str; 2] = ["STOP", "MAX_TOKENS"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub message: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text` を取り出す
    ///
    /// 空文字のテキストはテキストなしとして扱う
    pub fn into_text(self) -> Result<String, GenerativeApiError> {
        let candidate = self.candidates.into_iter().next();

        if let Some(reason) = candidate.as_ref().and_then(|c| c.finish_reason.as_deref()) {
            if reason == "SAFETY" {
                return Err(GenerativeApiError::Blocked);
            }
            if !ACCEPTED_FINISH_REASONS.contains(&reason) {
                return Err(GenerativeApiError::UnexpectedFinish(reason.to_string()));
            }
        }

        let finish_reason = candidate.as_ref().and_then(|c| c.finish_reason.clone());
        let text = candidate
            .and_then(|c| c.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .filter(|text| !text.is_empty());

        match (text, finish_reason) {
            (Some(text), _) => Ok(text),
            (None, Some(reason)) => Err(GenerativeApiError::EmptyResponse(reason)),
            (None, None) => Err(GenerativeApiError::InvalidStructure),
        }
    }
}

/// Build the error message for a non-2xx response
///
/// Uses `error.message` from the body when present, otherwise the first 200 characters
pub fn http_error_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.error.message)
        .unwrap_or_else(|| body.chars().take(200).collect());
    format!("HTTP error! status: {}, message: {}", status, detail)
}
