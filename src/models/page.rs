use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::FormErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// One-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn new(level: FlashLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Submitted values (passwords excluded) and their errors, for re-display.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FormState {
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    pub errors: FormErrors,
}

/// A rendered view: the template the front end should draw and its context.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Page {
    pub template: String,
    #[schema(value_type = Object)]
    pub context: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormState>,
    pub messages: Vec<FlashMessage>,
}
