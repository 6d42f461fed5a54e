//! Follow-up prompt selection.
//!
//! Given the lexical signals of the candidate's last answer and the stage the
//! conversation is in, pick the coach's next line. Four rules apply in a
//! fixed order, and only the first match fires:
//!
//! 1. Very short input (fewer than five words) gets a request to elaborate.
//!    Exact conversational openers ("hi", "hello", ...) get a canned warm
//!    reply instead, since asking someone to elaborate on "hi" reads as
//!    hostile.
//! 2. Off-topic small talk gets redirected back to the interview.
//! 3. Unusually long answers get a deep-dive probe drawn from a dedicated
//!    bank, rewarding detail with a harder follow-up.
//! 4. Everything else gets a uniform-random pick from the bank keyed by the
//!    stage being entered.
//!
//! Every stage bank is non-empty and every bank entry is checked at `const`
//! evaluation, so selection is total: some prompt always comes back. The
//! random source is owned by the selector and seedable, which keeps
//! transcripts reproducible under test.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use coach_types::{
    InterviewStage, LengthThresholds, NonEmptyString, NonEmptyStaticStr, TextSignals,
};

// ============================================================================
// Rule keywords
// ============================================================================

/// Word count below which an answer is too short to follow up on.
const SHORT_WORDS: usize = 5;

/// Small-talk vocabulary that pulls the conversation off the interview.
const OFF_TOPIC_KEYWORDS: &[&str] = &["weather", "sports", "movie"];

// ============================================================================
// Fixed prompts
// ============================================================================

const ELABORATE_PROMPT: NonEmptyStaticStr =
    NonEmptyStaticStr::new("I'd like to hear more about your experience. Could you elaborate on that?");

const REDIRECT_PROMPT: NonEmptyStaticStr = NonEmptyStaticStr::new(
    "Let's keep the focus on your professional experience. Could you tell me about a recent project or challenge from your work?",
);

/// Canned replies for exact conversational openers, keyed by the trimmed
/// lowercase input.
const OPENER_REPLIES: &[(&str, NonEmptyStaticStr)] = &[
    (
        "hello",
        NonEmptyStaticStr::new(
            "Hello! I'm here to help you practice for your technical interviews. Could you tell me about your background in software development?",
        ),
    ),
    (
        "hi",
        NonEmptyStaticStr::new(
            "Hi there! I'm your interview coach. Could you share a bit about your experience in software development?",
        ),
    ),
    (
        "hey",
        NonEmptyStaticStr::new(
            "Hey! I'm here to help you prepare for technical interviews. What's your background in software development?",
        ),
    ),
    (
        "how",
        NonEmptyStaticStr::new(
            "I'd like to understand your experience better. Could you tell me about your background in software development?",
        ),
    ),
    (
        "what",
        NonEmptyStaticStr::new(
            "I'm interested in learning more about your experience. Could you share your background in software development?",
        ),
    ),
    (
        "whats",
        NonEmptyStaticStr::new(
            "I'd like to know more about your experience. Could you tell me about your background in software development?",
        ),
    ),
];

// ============================================================================
// Prompt banks
// ============================================================================

const GREETING_BANK: &[NonEmptyStaticStr] = &[
    NonEmptyStaticStr::new(
        "Thanks for sharing! I'd like to learn more about your technical background. Can you walk me through a recent project you're particularly proud of?",
    ),
    NonEmptyStaticStr::new(
        "Great to meet you. Before we dig in, how would you describe your background in software development?",
    ),
    NonEmptyStaticStr::new(
        "Let's get started. Tell me a little about yourself and the kind of role you're preparing for.",
    ),
];

const INTRODUCTION_BANK: &[NonEmptyStaticStr] = &[
    NonEmptyStaticStr::new(
        "That's interesting! Could you tell me more about your role in that project and what technologies you used?",
    ),
    NonEmptyStaticStr::new(
        "How did you first get into software development, and what keeps you motivated today?",
    ),
    NonEmptyStaticStr::new(
        "Which accomplishment from the last few years are you proudest of, and why?",
    ),
];

const TECHNICAL_BANK: &[NonEmptyStaticStr] = &[
    NonEmptyStaticStr::new(
        "Thanks for sharing that. How do you stay current with new technologies? Can you give me an example of something new you learned recently?",
    ),
    NonEmptyStaticStr::new(
        "Walk me through a technical decision you made recently. What alternatives did you weigh?",
    ),
    NonEmptyStaticStr::new(
        "Tell me about a system you designed or significantly changed. What would you do differently now?",
    ),
];

const BEHAVIORAL_BANK: &[NonEmptyStaticStr] = &[
    NonEmptyStaticStr::new(
        "I appreciate that perspective. Could you tell me about a time when you had to work with a difficult team member? How did you handle it?",
    ),
    NonEmptyStaticStr::new(
        "Describe a situation where you had to meet a tight deadline. How did you organize the work?",
    ),
    NonEmptyStaticStr::new(
        "Tell me about a mistake you made at work and how you handled it.",
    ),
];

const LEADERSHIP_BANK: &[NonEmptyStaticStr] = &[
    NonEmptyStaticStr::new(
        "That's insightful. Have you ever had to make a difficult technical decision? How did you approach it?",
    ),
    NonEmptyStaticStr::new(
        "How do you motivate a team member who is underperforming?",
    ),
    NonEmptyStaticStr::new(
        "Describe your approach to giving constructive feedback to a peer.",
    ),
];

const CLOSING_BANK: &[NonEmptyStaticStr] = &[
    NonEmptyStaticStr::new(
        "Thank you for sharing. What questions do you have about the role or the company?",
    ),
    NonEmptyStaticStr::new(
        "We're near the end. Is there anything you'd like to revisit or add to an earlier answer?",
    ),
    NonEmptyStaticStr::new(
        "Before we wrap up, what would you want an interviewer to remember about you?",
    ),
];

/// Probing follow-ups for answers long enough to dig into.
const DEEP_DIVE_BANK: &[NonEmptyStaticStr] = &[
    NonEmptyStaticStr::new(
        "That's a thorough answer. What was the hardest trade-off you had to make in that situation?",
    ),
    NonEmptyStaticStr::new(
        "You've given me a lot of detail. If you had to do it all again, what would you change?",
    ),
    NonEmptyStaticStr::new(
        "Interesting. What did you learn from that experience that you still apply today?",
    ),
    NonEmptyStaticStr::new(
        "Let's go deeper. Which part of that story best shows how you think through problems?",
    ),
];

fn bank_for(stage: InterviewStage) -> &'static [NonEmptyStaticStr] {
    match stage {
        InterviewStage::Greeting => GREETING_BANK,
        InterviewStage::Introduction => INTRODUCTION_BANK,
        InterviewStage::Technical => TECHNICAL_BANK,
        InterviewStage::Behavioral => BEHAVIORAL_BANK,
        InterviewStage::Leadership => LEADERSHIP_BANK,
        InterviewStage::Closing => CLOSING_BANK,
    }
}

// ============================================================================
// Selector
// ============================================================================

/// Picks the coach's next line from the curated banks.
///
/// Owns its random source. [`PromptSelector::seeded`] fixes the seed for
/// reproducible transcripts; [`PromptSelector::new`] seeds from entropy.
#[derive(Debug)]
pub struct PromptSelector {
    rng: StdRng,
    deep_dive_words: usize,
}

impl PromptSelector {
    #[must_use]
    pub fn new(lengths: LengthThresholds) -> Self {
        Self::seeded(rand::random::<u64>(), lengths)
    }

    #[must_use]
    pub fn seeded(seed: u64, lengths: LengthThresholds) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            deep_dive_words: lengths.deep_dive_words(),
        }
    }

    /// Select the next prompt for an answer with the given signals, keyed by
    /// the stage the conversation is entering.
    pub fn select(&mut self, stage: InterviewStage, signals: &TextSignals) -> NonEmptyString {
        if signals.word_count() < SHORT_WORDS {
            if let Some(reply) = opener_reply(signals.lower()) {
                return reply;
            }
            return fixed_prompt(ELABORATE_PROMPT);
        }
        if signals.contains_any(OFF_TOPIC_KEYWORDS) {
            return fixed_prompt(REDIRECT_PROMPT);
        }
        if signals.word_count() > self.deep_dive_words {
            return self.pick(DEEP_DIVE_BANK);
        }
        self.pick(bank_for(stage))
    }

    /// Uniform-random pick from a bank. Shared with the question banks so
    /// the session draws everything from one random stream.
    pub(crate) fn pick(&mut self, bank: &'static [NonEmptyStaticStr]) -> NonEmptyString {
        let choice = bank[self.rng.random_range(0..bank.len())];
        fixed_prompt(choice)
    }
}

fn opener_reply(lower: &str) -> Option<NonEmptyString> {
    OPENER_REPLIES
        .iter()
        .find(|(opener, _)| *opener == lower)
        .map(|(_, reply)| fixed_prompt(*reply))
}

fn fixed_prompt(text: NonEmptyStaticStr) -> NonEmptyString {
    // Bank entries are non-empty at const evaluation and none is
    // whitespace-only; the totality test below walks every entry.
    NonEmptyString::try_from(text).expect("curated prompts are non-empty")
}
