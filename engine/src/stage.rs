//! Interview stage progression.
//!
//! The interview walks forward through a fixed set of stages. The only
//! branch is the split after the introduction, where the response's own
//! vocabulary chooses between the technical and behavioral tracks:
//!
//! ```text
//! greeting -> introduction -> technical  --\
//!                        \                  +-> leadership -> closing
//!                         -> behavioral --/
//! ```
//!
//! `closing` is absorbing: once the completed-turn count reaches the
//! closing threshold, every later turn stays there no matter what the
//! candidate says. Transitions never move backwards; the branch arms share
//! a rank, so switching tracks is lateral rather than a regression.

use coach_types::{InterviewStage, TextSignals, TurnThreshold};

/// Vocabulary that steers the introduction branch onto the technical track.
const TECHNICAL_BRANCH_KEYWORDS: &[&str] = &["project", "code", "develop"];

/// Where one conversation currently sits: its stage plus how many turns the
/// candidate has completed.
///
/// A plain value. [`ConversationState::advance`] consumes the old position
/// and returns the next one, so identical transcripts always yield
/// identical trajectories and nothing is shared between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationState {
    stage: InterviewStage,
    question_count: u8,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    /// A fresh conversation: greeting stage, nothing answered yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: InterviewStage::Greeting,
            question_count: 0,
        }
    }

    /// Rebuild a position captured earlier, e.g. from a session snapshot.
    #[must_use]
    pub fn resume(stage: InterviewStage, question_count: u8) -> Self {
        Self {
            stage,
            question_count,
        }
    }

    #[must_use]
    pub fn stage(&self) -> InterviewStage {
        self.stage
    }

    /// Turns the candidate has completed so far.
    #[must_use]
    pub fn question_count(&self) -> u8 {
        self.question_count
    }

    /// Fold one user turn into the position.
    ///
    /// The transition decision reads the pre-increment turn count; the
    /// count then advances by exactly one.
    #[must_use]
    pub fn advance(self, signals: &TextSignals, closing: TurnThreshold) -> Self {
        Self {
            stage: next_stage(self.stage, self.question_count, signals, closing),
            question_count: self.question_count.saturating_add(1),
        }
    }
}

/// Transition decision for one turn, rules in precedence order.
fn next_stage(
    stage: InterviewStage,
    question_count: u8,
    signals: &TextSignals,
    closing: TurnThreshold,
) -> InterviewStage {
    if question_count >= closing.as_u8() {
        return InterviewStage::Closing;
    }

    match stage {
        InterviewStage::Greeting => InterviewStage::Introduction,
        InterviewStage::Introduction if question_count >= 1 => {
            if signals.contains_any(TECHNICAL_BRANCH_KEYWORDS) {
                InterviewStage::Technical
            } else {
                InterviewStage::Behavioral
            }
        }
        InterviewStage::Technical | InterviewStage::Behavioral if question_count >= 3 => {
            InterviewStage::Leadership
        }
        _ => stage,
    }
}

#[cfg(test)]
mod tests {
    use coach_types::{InterviewStage, TextSignals, TurnThreshold};

    use super::ConversationState;

    fn signals(text: &str) -> TextSignals {
        TextSignals::analyze(text)
    }

    fn advance(state: ConversationState, text: &str) -> ConversationState {
        state.advance(&signals(text), TurnThreshold::default())
    }

    #[test]
    fn greeting_advances_to_introduction_unconditionally() {
        let next = advance(ConversationState::new(), "hi");
        assert_eq!(next.stage(), InterviewStage::Introduction);
        assert_eq!(next.question_count(), 1);
    }

    #[test]
    fn introduction_branches_to_technical_on_keywords() {
        let state = ConversationState::resume(InterviewStage::Introduction, 1);
        let next = advance(state, "I develop backend services for a logistics company");
        assert_eq!(next.stage(), InterviewStage::Technical);
    }

    #[test]
    fn introduction_defaults_to_behavioral() {
        let state = ConversationState::resume(InterviewStage::Introduction, 1);
        let next = advance(state, "I have spent six years working with logistics teams");
        assert_eq!(next.stage(), InterviewStage::Behavioral);
    }

    #[test]
    fn introduction_waits_for_a_completed_turn_before_branching() {
        // Reachable only through resume; the branch rule requires at least
        // one completed turn, so the position holds at introduction.
        let state = ConversationState::resume(InterviewStage::Introduction, 0);
        let next = advance(state, "I write code for a living");
        assert_eq!(next.stage(), InterviewStage::Introduction);
        assert_eq!(next.question_count(), 1);
    }

    #[test]
    fn branch_stages_move_to_leadership_after_third_turn() {
        for stage in [InterviewStage::Technical, InterviewStage::Behavioral] {
            let early = advance(ConversationState::resume(stage, 2), "an answer");
            assert_eq!(early.stage(), stage, "turn count 2 should hold at {stage}");

            let late = advance(ConversationState::resume(stage, 3), "an answer");
            assert_eq!(late.stage(), InterviewStage::Leadership);
        }
    }

    #[test]
    fn closing_threshold_overrides_every_other_rule() {
        for stage in InterviewStage::all() {
            let state = ConversationState::resume(*stage, 4);
            let next = advance(state, "I develop project code");
            assert_eq!(next.stage(), InterviewStage::Closing);
        }
    }

    #[test]
    fn closing_is_absorbing_below_the_threshold_too() {
        let state = ConversationState::resume(InterviewStage::Closing, 2);
        let next = advance(state, "one more thing about the project");
        assert_eq!(next.stage(), InterviewStage::Closing);
    }

    #[test]
    fn custom_threshold_closes_earlier() {
        let state = ConversationState::resume(InterviewStage::Introduction, 2);
        let next = state.advance(
            &signals("still going strong"),
            TurnThreshold::new(2).unwrap(),
        );
        assert_eq!(next.stage(), InterviewStage::Closing);
    }

    #[test]
    fn stage_never_regresses() {
        let texts = [
            "",
            "hello",
            "I develop project code",
            "the team led a difficult conflict",
        ];
        for stage in InterviewStage::all() {
            for count in 0..6 {
                for text in texts {
                    let next = advance(ConversationState::resume(*stage, count), text);
                    assert!(
                        next.stage().rank() >= stage.rank(),
                        "{stage} regressed to {} on count {count} with {text:?}",
                        next.stage()
                    );
                }
            }
        }
    }

    #[test]
    fn full_transcript_walks_the_expected_trajectory() {
        let transcript = [
            "Hello, thanks for having me today",
            "I build and develop project code for a trading platform",
            "We migrated the platform to an event driven design last year",
            "I enjoy pairing with teammates on hard problems",
            "Managing the rollout taught me a lot about planning",
        ];

        let mut state = ConversationState::new();
        let mut trajectory = Vec::new();
        for text in transcript {
            state = advance(state, text);
            trajectory.push(state.stage());
        }

        assert_eq!(
            trajectory,
            vec![
                InterviewStage::Introduction,
                InterviewStage::Technical,
                InterviewStage::Technical,
                InterviewStage::Leadership,
                InterviewStage::Closing,
            ]
        );
        assert_eq!(state.question_count(), 5);
    }

    #[test]
    fn identical_transcripts_produce_identical_trajectories() {
        let transcript = ["hi there", "I worked on a big project", "then another"];
        let run = |texts: &[&str]| {
            let mut state = ConversationState::new();
            texts
                .iter()
                .map(|text| {
                    state = advance(state, text);
                    state.stage()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(&transcript), run(&transcript));
    }
}
