//! Core domain types for the interview coach.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod activity;
mod lexical;
mod score;
mod star;
mod tuning;

pub use activity::{ActivityKind, ActivityRecord, SessionId};
pub use lexical::TextSignals;
pub use score::{FeedbackTier, ScoreResult};
pub use star::StarComponents;
pub use tuning::{
    BaseScore, BonusWeights, LengthThresholds, ScoringTuning, ThresholdError, TurnThreshold,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// NonEmpty String Types
// ============================================================================

/// A string guaranteed to be non-empty (after trimming).
///
/// Prompts handed back to the chat collaborator use this type, so "the
/// selector returned nothing to say" is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

#[derive(Debug, Error)]
#[error("text content must not be empty")]
pub struct EmptyStringError;

impl NonEmptyString {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyStringError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyStringError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::ops::Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compile-time checked non-empty static string.
///
/// Prompt banks are built from these so an empty bank entry fails at
/// `const` evaluation instead of at selection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonEmptyStaticStr(&'static str);

impl NonEmptyStaticStr {
    #[must_use]
    pub const fn new(value: &'static str) -> Self {
        assert!(!value.is_empty(), "NonEmptyStaticStr must not be empty");
        Self(value)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl TryFrom<NonEmptyStaticStr> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: NonEmptyStaticStr) -> Result<Self, Self::Error> {
        Self::new(value.0)
    }
}

// ============================================================================
// Interview Stage
// ============================================================================

/// Phases of a simulated interview, in conversation order.
///
/// `Technical` and `Behavioral` are siblings: both are reachable from
/// `Introduction` and both rank equally, so moving between the branch arms
/// is lateral rather than a regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStage {
    #[default]
    Greeting,
    Introduction,
    Technical,
    Behavioral,
    Leadership,
    Closing,
}

impl InterviewStage {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStage::Greeting => "greeting",
            InterviewStage::Introduction => "introduction",
            InterviewStage::Technical => "technical",
            InterviewStage::Behavioral => "behavioral",
            InterviewStage::Leadership => "leadership",
            InterviewStage::Closing => "closing",
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            InterviewStage::Greeting => "Greeting",
            InterviewStage::Introduction => "Introduction",
            InterviewStage::Technical => "Technical",
            InterviewStage::Behavioral => "Behavioral",
            InterviewStage::Leadership => "Leadership",
            InterviewStage::Closing => "Closing",
        }
    }

    /// Position in the forward ordering. `Technical` and `Behavioral` share
    /// a rank so the branch choice is not a regression in either direction.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            InterviewStage::Greeting => 0,
            InterviewStage::Introduction => 1,
            InterviewStage::Technical | InterviewStage::Behavioral => 2,
            InterviewStage::Leadership => 3,
            InterviewStage::Closing => 4,
        }
    }

    /// Whether the interview has reached its absorbing final stage.
    #[must_use]
    pub fn is_closing(&self) -> bool {
        matches!(self, InterviewStage::Closing)
    }

    /// Parse a stage from its lowercase wire name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "greeting" => Some(InterviewStage::Greeting),
            "introduction" | "intro" => Some(InterviewStage::Introduction),
            "technical" => Some(InterviewStage::Technical),
            "behavioral" | "behavioural" => Some(InterviewStage::Behavioral),
            "leadership" => Some(InterviewStage::Leadership),
            "closing" => Some(InterviewStage::Closing),
            _ => None,
        }
    }

    /// All stages in conversation order.
    #[must_use]
    pub fn all() -> &'static [InterviewStage] {
        &[
            InterviewStage::Greeting,
            InterviewStage::Introduction,
            InterviewStage::Technical,
            InterviewStage::Behavioral,
            InterviewStage::Leadership,
            InterviewStage::Closing,
        ]
    }
}

impl std::fmt::Display for InterviewStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Question Category
// ============================================================================

/// Curated practice-question categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Behavioral,
    Technical,
    Leadership,
    Situational,
}

impl QuestionCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::Behavioral => "behavioral",
            QuestionCategory::Technical => "technical",
            QuestionCategory::Leadership => "leadership",
            QuestionCategory::Situational => "situational",
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            QuestionCategory::Behavioral => "Behavioral",
            QuestionCategory::Technical => "Technical",
            QuestionCategory::Leadership => "Leadership",
            QuestionCategory::Situational => "Situational",
        }
    }

    /// Category a scored turn is attributed to. The greeting, introduction,
    /// and closing phases have no dedicated bank; they file under
    /// `Situational`.
    #[must_use]
    pub fn for_stage(stage: InterviewStage) -> Self {
        match stage {
            InterviewStage::Technical => QuestionCategory::Technical,
            InterviewStage::Behavioral => QuestionCategory::Behavioral,
            InterviewStage::Leadership => QuestionCategory::Leadership,
            InterviewStage::Greeting
            | InterviewStage::Introduction
            | InterviewStage::Closing => QuestionCategory::Situational,
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "behavioral" | "behavioural" => Some(QuestionCategory::Behavioral),
            "technical" => Some(QuestionCategory::Technical),
            "leadership" => Some(QuestionCategory::Leadership),
            "situational" => Some(QuestionCategory::Situational),
            _ => None,
        }
    }

    #[must_use]
    pub fn all() -> &'static [QuestionCategory] {
        &[
            QuestionCategory::Behavioral,
            QuestionCategory::Technical,
            QuestionCategory::Leadership,
            QuestionCategory::Situational,
        ]
    }
}

impl std::fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
