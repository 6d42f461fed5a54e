//! Score results returned to the chat collaborator.

use serde::{Deserialize, Serialize};

/// Qualitative band for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    Excellent,
    Good,
    Decent,
    NeedsDevelopment,
}

impl FeedbackTier {
    pub const EXCELLENT_MIN: u8 = 85;
    pub const GOOD_MIN: u8 = 70;
    pub const DECENT_MIN: u8 = 55;

    /// Band for a clamped 0..=100 score.
    #[must_use]
    pub fn for_score(score: u8) -> Self {
        if score >= Self::EXCELLENT_MIN {
            FeedbackTier::Excellent
        } else if score >= Self::GOOD_MIN {
            FeedbackTier::Good
        } else if score >= Self::DECENT_MIN {
            FeedbackTier::Decent
        } else {
            FeedbackTier::NeedsDevelopment
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackTier::Excellent => "excellent",
            FeedbackTier::Good => "good",
            FeedbackTier::Decent => "decent",
            FeedbackTier::NeedsDevelopment => "needs_development",
        }
    }
}

/// Outcome of scoring one response. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    score: u8,
    feedback: String,
    suggestions: Vec<String>,
    strengths: Vec<String>,
}

impl ScoreResult {
    /// Hard cap on returned suggestions; extras are dropped in generation
    /// order.
    pub const MAX_SUGGESTIONS: usize = 3;

    /// Build a result, clamping the score to 100 and truncating suggestions
    /// to [`Self::MAX_SUGGESTIONS`].
    #[must_use]
    pub fn new(
        score: u8,
        feedback: impl Into<String>,
        mut suggestions: Vec<String>,
        strengths: Vec<String>,
    ) -> Self {
        suggestions.truncate(Self::MAX_SUGGESTIONS);
        Self {
            score: score.min(100),
            feedback: feedback.into(),
            suggestions,
            strengths,
        }
    }

    /// Final score, always within 0..=100.
    #[must_use]
    pub fn score(&self) -> u8 {
        self.score
    }

    /// Qualitative band the score falls into.
    #[must_use]
    pub fn tier(&self) -> FeedbackTier {
        FeedbackTier::for_score(self.score)
    }

    /// One qualitative feedback sentence.
    #[must_use]
    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Improvement suggestions, at most [`Self::MAX_SUGGESTIONS`], in
    /// generation order.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// What the answer already does well.
    #[must_use]
    pub fn strengths(&self) -> &[String] {
        &self.strengths
    }
}
