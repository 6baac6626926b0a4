//! Question/answer records produced from model output

use serde::{Deserialize, Serialize};

/// A single question-answer pair as written to the dataset files
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Ordered sequence of pairs; one per document plus one combined per run
pub type QaDataset = Vec<QaPair>;
