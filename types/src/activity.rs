//! Activity records handed to the persistence collaborator.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{InterviewStage, QuestionCategory};

/// Opaque identifier for one interview session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Mint a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of practice produced an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    AiInterview,
    CodingChallenge,
    PracticeSession,
}

impl ActivityKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::AiInterview => "ai_interview",
            ActivityKind::CodingChallenge => "coding_challenge",
            ActivityKind::PracticeSession => "practice_session",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ai_interview" => Some(ActivityKind::AiInterview),
            "coding_challenge" => Some(ActivityKind::CodingChallenge),
            "practice_session" => Some(ActivityKind::PracticeSession),
            _ => None,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracked activity entry, shaped for the activity store as-is.
///
/// Field names serialize in the store's camelCase convention so the
/// collaborator can persist the record without transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub session_id: SessionId,
    pub kind: ActivityKind,
    pub category: QuestionCategory,
    pub stage: InterviewStage,
    pub message_count: u32,
    pub score: u8,
    pub duration_secs: u64,
    pub recorded_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Record a scored interview turn.
    #[must_use]
    pub fn interview_turn(
        session_id: SessionId,
        stage: InterviewStage,
        message_count: u32,
        score: u8,
        duration_secs: u64,
    ) -> Self {
        Self {
            session_id,
            kind: ActivityKind::AiInterview,
            category: QuestionCategory::for_stage(stage),
            stage,
            message_count,
            score: score.min(100),
            duration_secs,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivityKind, ActivityRecord, SessionId};
    use crate::InterviewStage;

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn activity_kind_parse_roundtrips() {
        for kind in [
            ActivityKind::AiInterview,
            ActivityKind::CodingChallenge,
            ActivityKind::PracticeSession,
        ] {
            assert_eq!(ActivityKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ActivityKind::parse("swimming"), None);
    }

    #[test]
    fn interview_turn_clamps_score() {
        let record = ActivityRecord::interview_turn(
            SessionId::generate(),
            InterviewStage::Behavioral,
            3,
            200,
            45,
        );
        assert_eq!(record.score, 100);
    }

    #[test]
    fn record_serializes_in_store_shape() {
        let record = ActivityRecord::interview_turn(
            SessionId::generate(),
            InterviewStage::Technical,
            5,
            76,
            120,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("sessionId").is_some());
        assert_eq!(json["messageCount"], 5);
        assert_eq!(json["score"], 76);
        assert_eq!(json["stage"], "technical");
        assert_eq!(json["category"], "technical");
        assert_eq!(json["kind"], "ai_interview");
        assert!(json.get("durationSecs").is_some());
    }
}
