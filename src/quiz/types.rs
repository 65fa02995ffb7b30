//! Quiz types

use serde::{Deserialize, Serialize};

/// Default number of quiz items
pub const DEFAULT_MAX_ITEMS: usize = 12;

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

/// Quiz generation request
#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    /// Source text, typically the joined extraction output
    pub text: String,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

/// Quiz item kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizItemType {
    /// True/false
    Tf,
    /// Multiple choice
    Mcq,
    /// Short answer
    Short,
}

/// Single quiz item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    #[serde(rename = "type")]
    pub kind: QuizItemType,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    pub answer: String,
    pub explanation: String,
    /// Source sentences the item was built from
    #[serde(default)]
    pub evidence: Vec<String>,
}

/// Generated quiz
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub items: Vec<QuizItem>,
}
