use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: i64,
    pub selected_option_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<Answer>,
}

/// Grading result returned by the submit endpoint. Only the commonly
/// present fields are typed; everything else is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, alias = "totalQuestions", alias = "maxScore")]
    pub total: Option<f64>,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, JsonValue>,
}

impl SubmissionResult {
    pub fn percentage(&self) -> Option<f64> {
        self.percentage.or(match (self.score, self.total) {
            (Some(score), Some(total)) if total > 0.0 => Some(score * 100.0 / total),
            _ => None,
        })
    }
}
