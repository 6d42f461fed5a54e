//! Interview-coach engine: scoring, stage progression, and prompt selection.
//!
//! One [`Session`] per conversation. Each call to [`Session::respond`] runs
//! the turn pipeline over a single lexical analysis of the answer:
//!
//! 1. score the answer against the stage its question was asked in,
//! 2. advance the stage machine,
//! 3. select the next prompt, keyed by the stage being entered.
//!
//! The pipeline is synchronous, total over arbitrary string input, and
//! deterministic for a fixed selector seed. Remote text generation lives in
//! `coach-providers` and substitutes for the selected prompt at the outer
//! surface; nothing in this crate awaits.

use std::time::Duration;

mod config;
mod questions;
mod scoring;
mod selector;
mod session_state;
mod stage;

pub use config::{
    CoachConfig, ConfigError, GenerationSection, ScoringSection, config_path, expand_env_vars,
};
pub use questions::questions_for;
pub use scoring::Scorer;
pub use selector::PromptSelector;
pub use session_state::{SessionSnapshot, SnapshotError, SpeakerRole, TranscriptEntry};
pub use stage::ConversationState;

// Re-export the domain types the outer surface needs.
pub use coach_types::{
    ActivityKind, ActivityRecord, BaseScore, BonusWeights, EmptyStringError, FeedbackTier,
    InterviewStage, LengthThresholds, NonEmptyStaticStr, NonEmptyString, QuestionCategory,
    ScoreResult, ScoringTuning, SessionId, StarComponents, TextSignals, ThresholdError,
    TurnThreshold,
};

// ============================================================================
// TurnOutcome
// ============================================================================

/// Everything one submitted answer produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Score and feedback for the answer, judged against the stage whose
    /// question it answered.
    pub score: ScoreResult,
    /// The coach's next line.
    pub reply: NonEmptyString,
    /// Stage the answer was given in.
    pub previous_stage: InterviewStage,
    /// Stage the conversation is in now.
    pub stage: InterviewStage,
    /// Completed question count after this turn.
    pub question_count: u8,
}

impl TurnOutcome {
    /// Whether this turn moved the interview into a new stage.
    #[must_use]
    pub fn stage_changed(&self) -> bool {
        self.previous_stage != self.stage
    }
}

// ============================================================================
// Session
// ============================================================================

/// One interview conversation: stage machine, scorer, selector, transcript.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    state: ConversationState,
    scorer: Scorer,
    selector: PromptSelector,
    tuning: ScoringTuning,
    history: Vec<TranscriptEntry>,
}

impl Session {
    /// Fresh session at the greeting stage, selector seeded from entropy.
    #[must_use]
    pub fn new(tuning: ScoringTuning) -> Self {
        Self {
            id: SessionId::generate(),
            state: ConversationState::new(),
            scorer: Scorer::new(tuning),
            selector: PromptSelector::new(tuning.lengths),
            tuning,
            history: Vec::new(),
        }
    }

    /// Fresh session with a fixed selector seed, for reproducible
    /// transcripts.
    #[must_use]
    pub fn seeded(tuning: ScoringTuning, seed: u64) -> Self {
        Self {
            id: SessionId::generate(),
            state: ConversationState::new(),
            scorer: Scorer::new(tuning),
            selector: PromptSelector::seeded(seed, tuning.lengths),
            tuning,
            history: Vec::new(),
        }
    }

    /// Rebuild a session from a snapshot. The stage machine and transcript
    /// resume exactly; the selector reseeds from entropy since the random
    /// stream is not part of the snapshot.
    #[must_use]
    pub fn resume(snapshot: SessionSnapshot, tuning: ScoringTuning) -> Self {
        Self {
            id: snapshot.session_id,
            state: ConversationState::resume(snapshot.stage, snapshot.question_count),
            scorer: Scorer::new(tuning),
            selector: PromptSelector::new(tuning.lengths),
            tuning,
            history: snapshot.history,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn stage(&self) -> InterviewStage {
        self.state.stage()
    }

    #[must_use]
    pub fn question_count(&self) -> u8 {
        self.state.question_count()
    }

    /// Full transcript, candidate and coach lines interleaved.
    #[must_use]
    pub fn history(&self) -> &[TranscriptEntry] {
        &self.history
    }

    /// Process one submitted answer: score it, advance the stage, select
    /// the next prompt, and append both lines to the transcript.
    pub fn respond(&mut self, text: &str) -> TurnOutcome {
        let signals = TextSignals::analyze(text);
        let previous_stage = self.state.stage();
        let score = self.scorer.score_signals(&signals, previous_stage);

        self.state = self.state.advance(&signals, self.tuning.closing);
        let stage = self.state.stage();
        let reply = self.selector.select(stage, &signals);

        self.history
            .push(TranscriptEntry::candidate(text, score.score()));
        self.history.push(TranscriptEntry::coach(reply.as_str()));

        tracing::debug!(
            session = %self.id,
            score = score.score(),
            from = %previous_stage,
            to = %stage,
            question_count = self.state.question_count(),
            "turn completed"
        );

        TurnOutcome {
            score,
            reply,
            previous_stage,
            stage,
            question_count: self.state.question_count(),
        }
    }

    /// Draw a practice question for a category from the curated bank, using
    /// the session's random stream.
    pub fn question_for(&mut self, category: QuestionCategory) -> NonEmptyString {
        self.selector.pick(questions_for(category))
    }

    /// Mean score over the candidate's answers so far.
    #[must_use]
    pub fn average_score(&self) -> Option<u8> {
        let scores: Vec<u8> = self
            .history
            .iter()
            .filter_map(|entry| entry.score)
            .collect();
        if scores.is_empty() {
            return None;
        }
        let sum: u32 = scores.iter().map(|s| u32::from(*s)).sum();
        let mean = f64::from(sum) / scores.len() as f64;
        Some(mean.round() as u8)
    }

    /// Snapshot the session for persistence.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(
            self.id,
            self.state.stage(),
            self.state.question_count(),
            self.history.clone(),
        )
    }

    /// Activity entry summarizing the session so far, in the shape the
    /// activity store consumes.
    #[must_use]
    pub fn activity_record(&self, duration: Duration) -> ActivityRecord {
        let answers = self
            .history
            .iter()
            .filter(|entry| entry.score.is_some())
            .count() as u32;
        ActivityRecord::interview_turn(
            self.id,
            self.state.stage(),
            answers,
            self.average_score().unwrap_or(0),
            duration.as_secs(),
        )
    }
}
