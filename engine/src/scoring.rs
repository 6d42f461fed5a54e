//! Heuristic response scoring.
//!
//! One response in, one [`ScoreResult`] out: a bounded 0-100 score, a
//! qualitative feedback sentence, at most three improvement suggestions, and
//! the strengths the answer already shows. The rules are shallow lexical
//! heuristics layered in a fixed order: length band, stage-specific
//! vocabulary (technology keywords, STAR coverage, leadership signals), then
//! general quality (sentence flow, first-person usage, metrics, examples).
//! Deterministic and total: the same text at the same stage always produces
//! the same result, and no input can fail.

use coach_types::{
    FeedbackTier, InterviewStage, ScoreResult, ScoringTuning, StarComponents, TextSignals,
};

// ============================================================================
// Keyword sets
// ============================================================================

/// Technology and project vocabulary rewarded in the introduction and
/// technical stages.
const TECH_KEYWORDS: &[&str] = &[
    "project",
    "built",
    "platform",
    "code",
    "develop",
    "design",
    "architecture",
    "system",
];

/// Leadership signal groups. Each group that matches at all earns one fixed
/// bonus; repeats within a group do not stack.
const LEADERSHIP_GROUPS: &[&[&str]] = &[
    &["team", "led", "managed"],
    &["influence", "motivate", "inspire"],
    &["conflict", "challenge", "difficult"],
];

/// Vocabulary counted as an explicit example for the specificity bonus.
const EXAMPLE_KEYWORDS: &[&str] = &["example", "instance"];

// ============================================================================
// Fixed feedback texts
// ============================================================================

const BRIEF_SUGGESTION: &str =
    "This answer is too brief - expand it into a few full sentences with specific detail";
const EXPAND_SUGGESTION: &str = "Provide more detail and specific examples";
const CONCISE_SUGGESTION: &str = "Try to be more concise while keeping key details";
const LENGTH_STRENGTH: &str = "Appropriate response length - detailed yet concise";

const SITUATION_SUGGESTION: &str = "Start by setting the context or situation";
const TASK_SUGGESTION: &str = "Clarify your specific role and responsibilities";
const ACTION_SUGGESTION: &str = "Describe the specific actions you took";
const RESULT_SUGGESTION: &str = "Always conclude with the outcome or impact";

const SITUATION_STRENGTH: &str = "Clearly sets the context and situation";
const TASK_STRENGTH: &str = "Defines responsibilities and objectives well";
const ACTION_STRENGTH: &str = "Describes specific actions taken";
const RESULT_STRENGTH: &str = "Mentions outcomes and results";

const TECH_SUGGESTION: &str = "Mention technologies used";
const TECH_STRENGTH: &str = "Demonstrates strong technical skills with action words";
const LEADERSHIP_SUGGESTION: &str = "Show how you influenced others";
const LEADERSHIP_STRENGTH: &str = "Demonstrates strong leadership skills with action words";

const STRUCTURE_STRENGTH: &str = "Well-structured with multiple supporting points";
const FIRST_PERSON_SUGGESTION: &str = "Use more personal examples with \"I\" statements";
const FIRST_PERSON_STRENGTH: &str = "Uses first-person examples effectively";
const METRICS_SUGGESTION: &str = "Consider adding specific numbers or metrics when possible";
const METRICS_STRENGTH: &str = "Includes quantifiable results and metrics";
const EXAMPLE_SUGGESTION: &str = "Include a specific example to illustrate your point";
const EXAMPLE_STRENGTH: &str = "Supports the answer with a concrete example";

/// One qualitative sentence per tier.
fn feedback_for(tier: FeedbackTier) -> &'static str {
    match tier {
        FeedbackTier::Excellent => {
            "Outstanding response! Your answer demonstrates exceptional interview skills \
             with clear structure, specific examples, and strong communication."
        }
        FeedbackTier::Good => {
            "Strong response with good structure and relevant examples. With minor \
             refinements, this could be an excellent answer."
        }
        FeedbackTier::Decent => {
            "Your response shows promise but needs more development. Focus on providing \
             specific examples and using the STAR method."
        }
        FeedbackTier::NeedsDevelopment => {
            "This response needs significant development. Consider using the STAR method \
             and providing specific, detailed examples."
        }
    }
}

// ============================================================================
// Scorer
// ============================================================================

/// The scoring engine: a tuning bundle plus the fixed rule set.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    tuning: ScoringTuning,
}

impl Scorer {
    #[must_use]
    pub fn new(tuning: ScoringTuning) -> Self {
        Self { tuning }
    }

    /// Score a raw response against the stage its question was asked in.
    #[must_use]
    pub fn score(&self, text: &str, stage: InterviewStage) -> ScoreResult {
        self.score_signals(&TextSignals::analyze(text), stage)
    }

    /// Score pre-analyzed signals. The session layer reuses one analysis
    /// pass for scoring, the stage transition, and prompt selection.
    #[must_use]
    pub fn score_signals(&self, signals: &TextSignals, stage: InterviewStage) -> ScoreResult {
        let weights = self.tuning.weights;
        let lengths = self.tuning.lengths;

        let mut points = i32::from(self.tuning.base.as_u8());
        // Suggestions are kept in two buckets: structural ones (length, STAR,
        // stage vocabulary) always survive, polish ones (first person,
        // metrics, examples) are dropped at the top tier.
        let mut structural: Vec<String> = Vec::new();
        let mut polish: Vec<String> = Vec::new();
        let mut strengths: Vec<String> = Vec::new();

        // Length band. The brief/expand ceilings clamp the final score after
        // every bonus, so keyword stuffing cannot buy a short answer out of
        // its band.
        let words = signals.word_count();
        let mut ceiling: Option<u8> = None;
        if words < lengths.brief_words() {
            ceiling = Some(weights.brief_cap);
            structural.push(BRIEF_SUGGESTION.to_string());
        } else if words < lengths.expand_words() {
            ceiling = Some(weights.expand_cap);
            structural.push(EXPAND_SUGGESTION.to_string());
        } else if (lengths.bonus_min_words()..=lengths.bonus_max_words()).contains(&words) {
            points += i32::from(weights.length_bonus);
            strengths.push(LENGTH_STRENGTH.to_string());
        } else if words > lengths.long_max_words() {
            points -= i32::from(weights.long_penalty);
            structural.push(CONCISE_SUGGESTION.to_string());
        } else if words > lengths.bonus_max_words() {
            points += i32::from(weights.long_bonus);
        }

        // Stage-specific vocabulary.
        let star = StarComponents::detect(signals);
        match stage {
            InterviewStage::Introduction | InterviewStage::Technical => {
                let matched = signals.matching_count(TECH_KEYWORDS);
                let earned =
                    (matched as i32 * i32::from(weights.tech_keyword)).min(i32::from(weights.tech_cap));
                points += earned;
                if matched > 0 {
                    strengths.push(TECH_STRENGTH.to_string());
                } else {
                    structural.push(TECH_SUGGESTION.to_string());
                }
            }
            InterviewStage::Behavioral => {
                points += i32::from(star.present_count()) * i32::from(weights.star_component);
                for (present, strength, suggestion) in [
                    (star.situation, SITUATION_STRENGTH, SITUATION_SUGGESTION),
                    (star.task, TASK_STRENGTH, TASK_SUGGESTION),
                    (star.action, ACTION_STRENGTH, ACTION_SUGGESTION),
                    (star.result, RESULT_STRENGTH, RESULT_SUGGESTION),
                ] {
                    if present {
                        strengths.push(strength.to_string());
                    } else {
                        structural.push(suggestion.to_string());
                    }
                }
            }
            InterviewStage::Leadership => {
                let matched = LEADERSHIP_GROUPS
                    .iter()
                    .filter(|group| signals.contains_any(group))
                    .count();
                points += matched as i32 * i32::from(weights.leadership_signal);
                if matched > 0 {
                    strengths.push(LEADERSHIP_STRENGTH.to_string());
                } else {
                    structural.push(LEADERSHIP_SUGGESTION.to_string());
                }
            }
            InterviewStage::Greeting | InterviewStage::Closing => {}
        }

        // General quality.
        if signals.sentence_count() >= 3 {
            points += i32::from(weights.sentence_flow);
            strengths.push(STRUCTURE_STRENGTH.to_string());
        }
        if signals.first_person_count() >= 3 {
            points += i32::from(weights.first_person);
            strengths.push(FIRST_PERSON_STRENGTH.to_string());
        } else {
            polish.push(FIRST_PERSON_SUGGESTION.to_string());
        }
        if signals.has_digit() {
            points += i32::from(weights.metrics);
            strengths.push(METRICS_STRENGTH.to_string());
        } else {
            polish.push(METRICS_SUGGESTION.to_string());
        }
        if signals.contains_any(EXAMPLE_KEYWORDS) {
            points += i32::from(weights.example);
            strengths.push(EXAMPLE_STRENGTH.to_string());
        } else {
            polish.push(EXAMPLE_SUGGESTION.to_string());
        }

        if let Some(ceiling) = ceiling {
            points = points.min(i32::from(ceiling));
        }
        let score = points.clamp(0, 100) as u8;
        let tier = FeedbackTier::for_score(score);

        let mut suggestions = structural;
        if tier != FeedbackTier::Excellent {
            suggestions.append(&mut polish);
        }

        tracing::debug!(
            score,
            stage = %stage,
            word_count = words,
            star_components = star.present_count(),
            "scored response"
        );

        ScoreResult::new(score, feedback_for(tier), suggestions, strengths)
    }
}

#[cfg(test)]
mod tests {
    use coach_types::{
        BaseScore, BonusWeights, FeedbackTier, InterviewStage, ScoreResult, ScoringTuning,
    };

    use super::Scorer;

    fn score(text: &str, stage: InterviewStage) -> ScoreResult {
        Scorer::new(ScoringTuning::default()).score(text, stage)
    }

    /// 20 neutral filler words: no digits, no "i " tokens, no scoring
    /// keywords, a single sentence.
    fn neutral_filler() -> String {
        "the work moved along at a steady pace over several months and everyone \
         stayed focused on shipping the planned pieces"
            .to_string()
    }

    mod length_bands {
        use super::{FeedbackTier, InterviewStage, score};

        #[test]
        fn empty_input_lands_in_the_lowest_band() {
            let result = score("", InterviewStage::Introduction);
            assert!(result.score() <= 25);
            assert_eq!(result.tier(), FeedbackTier::NeedsDevelopment);
            assert!(result.suggestions()[0].contains("too brief"));
        }

        #[test]
        fn brief_ceiling_holds_even_with_keyword_stuffing() {
            // Nine words, every one a STAR keyword hit.
            let stuffed = "situation task action result goal did improved outcome success";
            let result = score(stuffed, InterviewStage::Behavioral);
            assert_eq!(result.score(), 25);
        }

        #[test]
        fn expand_band_caps_at_forty() {
            let result = score(
                "we shipped the release together and everyone was pleased with it overall that quarter",
                InterviewStage::Greeting,
            );
            assert_eq!(result.score(), 40);
            assert!(
                result
                    .suggestions()
                    .iter()
                    .any(|s| s.contains("more detail"))
            );
        }

        #[test]
        fn well_developed_band_earns_the_length_bonus() {
            let text = "detail ".repeat(30);
            let result = score(&text, InterviewStage::Greeting);
            assert_eq!(result.score(), 80);
            assert!(result.strengths().iter().any(|s| s.contains("length")));
        }

        #[test]
        fn long_answers_get_the_smaller_bonus() {
            let text = "detail ".repeat(175);
            let result = score(&text, InterviewStage::Greeting);
            assert_eq!(result.score(), 70);
        }

        #[test]
        fn excessive_length_is_penalized() {
            let text = "detail ".repeat(230);
            let result = score(&text, InterviewStage::Greeting);
            assert_eq!(result.score(), 50);
            assert!(result.suggestions().iter().any(|s| s.contains("concise")));
        }

        #[test]
        fn the_gap_band_gets_no_adjustment() {
            let result = score(&super::neutral_filler(), InterviewStage::Greeting);
            assert_eq!(result.score(), 60);
        }
    }

    mod stage_bonuses {
        use super::{InterviewStage, score};

        #[test]
        fn technology_keywords_score_per_match() {
            let text = format!("{} about the project code", super::neutral_filler());
            let result = score(&text, InterviewStage::Technical);
            assert_eq!(result.score(), 68);
            assert!(result.strengths().iter().any(|s| s.contains("technical")));
        }

        #[test]
        fn technology_bonus_is_capped() {
            let text = format!(
                "{} project built platform code develop design",
                super::neutral_filler()
            );
            let result = score(&text, InterviewStage::Technical);
            // Six matches at +4 would be +24; the cap holds it at +16.
            assert_eq!(result.score(), 76);
        }

        #[test]
        fn introduction_scans_the_same_vocabulary() {
            let text = format!("{} about the project code", super::neutral_filler());
            assert_eq!(
                score(&text, InterviewStage::Introduction).score(),
                score(&text, InterviewStage::Technical).score()
            );
        }

        #[test]
        fn missing_technology_vocabulary_suggests_naming_it() {
            let result = score(&super::neutral_filler(), InterviewStage::Technical);
            assert!(
                result
                    .suggestions()
                    .iter()
                    .any(|s| s.contains("technologies"))
            );
        }

        #[test]
        fn behavioral_scores_each_star_component() {
            let text = "When the situation demanded it our task was clear so we took action \
                        and the result spoke for itself in the end";
            let result = score(text, InterviewStage::Behavioral);
            // 22 words (neutral band) + four STAR components.
            assert_eq!(result.score(), 92);
            assert_eq!(
                result
                    .strengths()
                    .iter()
                    .filter(|s| {
                        s.contains("situation")
                            || s.contains("responsibilities")
                            || s.contains("actions")
                            || s.contains("outcomes")
                    })
                    .count(),
                4
            );
        }

        #[test]
        fn behavioral_missing_components_use_the_fixed_texts() {
            let text = "The result was a faster pipeline and a happier customer base across \
                        every region we served last quarter by a wide margin";
            let result = score(text, InterviewStage::Behavioral);
            assert_eq!(result.score(), 68);
            assert_eq!(
                result.suggestions(),
                &[
                    "Start by setting the context or situation".to_string(),
                    "Clarify your specific role and responsibilities".to_string(),
                    "Describe the specific actions you took".to_string(),
                ]
            );
        }

        #[test]
        fn leadership_groups_score_once_each() {
            let text = "We faced a difficult conflict when I led and managed the team while \
                        trying to motivate and inspire everyone involved daily";
            let result = score(text, InterviewStage::Leadership);
            // All three groups matched: 60 + 18.
            assert_eq!(result.score(), 78);
            assert!(result.strengths().iter().any(|s| s.contains("leadership")));
        }

        #[test]
        fn leadership_without_signals_suggests_influence() {
            let result = score(&super::neutral_filler(), InterviewStage::Leadership);
            assert_eq!(result.score(), 60);
            assert!(
                result
                    .suggestions()
                    .iter()
                    .any(|s| s.contains("influenced others"))
            );
        }

        #[test]
        fn greeting_and_closing_skip_stage_vocabulary() {
            let text = format!("{} project built platform code", super::neutral_filler());
            assert_eq!(score(&text, InterviewStage::Greeting).score(), 60);
            assert_eq!(score(&text, InterviewStage::Closing).score(), 60);
        }
    }

    mod general_quality {
        use super::{InterviewStage, score};

        #[test]
        fn three_sentences_earn_the_structure_bonus() {
            let text = "We shipped the release on time. The customers were happy with it. \
                        The rollout went smoothly for everyone involved there.";
            let result = score(text, InterviewStage::Greeting);
            assert_eq!(result.score(), 68);
            assert!(
                result
                    .strengths()
                    .iter()
                    .any(|s| s.contains("Well-structured"))
            );
        }

        #[test]
        fn repeated_first_person_is_rewarded() {
            let text = "I planned the work. I wrote every module myself. I shipped it all \
                        by Friday evening with room to spare.";
            let result = score(text, InterviewStage::Greeting);
            // Three sentences and three first-person uses.
            assert_eq!(result.score(), 76);
            assert!(
                result
                    .strengths()
                    .iter()
                    .any(|s| s.contains("first-person"))
            );
        }

        #[test]
        fn digits_earn_the_metrics_bonus() {
            let text = format!("{} and throughput rose 40 percent", super::neutral_filler());
            let result = score(&text, InterviewStage::Greeting);
            assert_eq!(result.score(), 68);
            assert!(
                result
                    .strengths()
                    .iter()
                    .any(|s| s.contains("quantifiable"))
            );
        }

        #[test]
        fn missing_metrics_are_suggested() {
            let result = score(&super::neutral_filler(), InterviewStage::Greeting);
            assert!(
                result
                    .suggestions()
                    .iter()
                    .any(|s| s.contains("numbers or metrics"))
            );
        }

        #[test]
        fn explicit_examples_earn_the_specificity_bonus() {
            let text = format!("{} for example during the rollout", super::neutral_filler());
            let result = score(&text, InterviewStage::Greeting);
            assert_eq!(result.score(), 70);
        }

        #[test]
        fn top_tier_suppresses_polish_suggestions() {
            // Full STAR, three sentences, three first-person uses, a digit,
            // but no explicit example: the example nudge must not appear at
            // this score.
            let text = "When the situation turned bad I owned the task fully. I implemented \
                        the fix the same week and the action steadied the team. I tracked \
                        the result until uptime improved to 99 percent.";
            let result = score(text, InterviewStage::Behavioral);
            assert!(result.score() >= 85);
            assert!(result.suggestions().is_empty());
        }

        #[test]
        fn star_suggestions_survive_the_top_tier() {
            // Task, action, and result without any situation vocabulary, plus
            // enough general quality to clear the excellent threshold.
            let text = "My task was to stabilize the rollout after a rough launch week. \
                        I implemented the fix myself and I verified every deploy. I kept at \
                        it until the result improved to 99 percent uptime across the fleet \
                        and the on-call load dropped to almost nothing for the whole group.";
            let result = score(text, InterviewStage::Behavioral);
            assert!(result.score() >= 85, "score was {}", result.score());
            assert_eq!(
                result.suggestions(),
                &["Start by setting the context or situation".to_string()]
            );
        }
    }

    mod bounds {
        use super::{BaseScore, BonusWeights, InterviewStage, Scorer, ScoringTuning, score};

        #[test]
        fn score_is_clamped_to_one_hundred() {
            let text = "When the situation turned bad I owned the task fully. I implemented \
                        the fix the same week and the action steadied the team. I tracked \
                        the result for instance until uptime improved to 99 percent.";
            let result = score(text, InterviewStage::Behavioral);
            assert_eq!(result.score(), 100);
        }

        #[test]
        fn score_is_floored_at_zero() {
            let tuning = ScoringTuning {
                base: BaseScore::new(0).unwrap(),
                weights: BonusWeights {
                    long_penalty: 30,
                    ..BonusWeights::default()
                },
                ..ScoringTuning::default()
            };
            let text = "detail ".repeat(230);
            let result = Scorer::new(tuning).score(&text, InterviewStage::Greeting);
            assert_eq!(result.score(), 0);
        }

        #[test]
        fn scoring_is_deterministic() {
            let text = "I led a team of five engineers, and as a result we shipped the \
                        project two weeks early, improving deployment time by 30%.";
            let first = score(text, InterviewStage::Behavioral);
            let second = score(text, InterviewStage::Behavioral);
            assert_eq!(first, second);
        }

        #[test]
        fn full_star_outscores_no_star_at_equal_length() {
            // Both strings sit in the 20-29 word gap band, so the only
            // difference is the four STAR hits.
            let with_star = "situation task action result and some more words to fill the \
                             line out to a steady twenty words overall now";
            let without = "we kept things moving and some more words to fill the line out \
                           to a steady twenty words overall now";
            let star_score = score(with_star, InterviewStage::Behavioral).score();
            let plain_score = score(without, InterviewStage::Behavioral).score();
            assert!(star_score > plain_score);
        }
    }
}
