//! Scoring and conversation tuning parameters.
//!
//! The heuristics accumulated several inconsistent tunings across the
//! product's page variants. These types pin one canonical set while keeping
//! every knob swappable, and they guarantee usable values by construction.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ThresholdError {
    #[error("base score ({0}) must be at most 100")]
    BaseScoreTooLarge(u8),
    #[error("closing threshold must be at least {} turn", TurnThreshold::MIN_TURNS)]
    ClosingThresholdTooSmall,
    #[error("length bands must be ordered: brief < expand <= bonus range <= long max")]
    LengthBandsOutOfOrder,
    #[error("deep dive threshold must be at least 1 word")]
    DeepDiveThresholdZero,
}

/// Starting score before any adjustment, validated to the 0..=100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseScore(u8);

impl BaseScore {
    pub fn new(value: u8) -> Result<Self, ThresholdError> {
        if value > 100 {
            return Err(ThresholdError::BaseScoreTooLarge(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl Default for BaseScore {
    fn default() -> Self {
        Self(60)
    }
}

/// Number of completed turns after which the interview closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnThreshold(u8);

impl TurnThreshold {
    pub const MIN_TURNS: u8 = 1;

    pub fn new(value: u8) -> Result<Self, ThresholdError> {
        if value < Self::MIN_TURNS {
            return Err(ThresholdError::ClosingThresholdTooSmall);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl Default for TurnThreshold {
    fn default() -> Self {
        Self(4)
    }
}

/// Word-count band edges used by the scorer and the selector.
///
/// Invariant, guaranteed by construction:
/// `brief < expand <= bonus_min <= bonus_max <= long_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthThresholds {
    brief_words: usize,
    expand_words: usize,
    bonus_min_words: usize,
    bonus_max_words: usize,
    long_max_words: usize,
    deep_dive_words: usize,
}

impl LengthThresholds {
    pub fn new(
        brief_words: usize,
        expand_words: usize,
        bonus_min_words: usize,
        bonus_max_words: usize,
        long_max_words: usize,
        deep_dive_words: usize,
    ) -> Result<Self, ThresholdError> {
        let ordered = brief_words < expand_words
            && expand_words <= bonus_min_words
            && bonus_min_words <= bonus_max_words
            && bonus_max_words <= long_max_words;
        if !ordered {
            return Err(ThresholdError::LengthBandsOutOfOrder);
        }
        if deep_dive_words == 0 {
            return Err(ThresholdError::DeepDiveThresholdZero);
        }
        Ok(Self {
            brief_words,
            expand_words,
            bonus_min_words,
            bonus_max_words,
            long_max_words,
            deep_dive_words,
        })
    }

    /// Below this word count an answer is "too brief".
    #[must_use]
    pub const fn brief_words(&self) -> usize {
        self.brief_words
    }

    /// Below this word count (and at/above brief) an answer should expand.
    #[must_use]
    pub const fn expand_words(&self) -> usize {
        self.expand_words
    }

    /// Inclusive lower edge of the well-developed band.
    #[must_use]
    pub const fn bonus_min_words(&self) -> usize {
        self.bonus_min_words
    }

    /// Inclusive upper edge of the well-developed band.
    #[must_use]
    pub const fn bonus_max_words(&self) -> usize {
        self.bonus_max_words
    }

    /// Above this word count an answer is excessively long.
    #[must_use]
    pub const fn long_max_words(&self) -> usize {
        self.long_max_words
    }

    /// Above this word count the selector probes with a deep-dive prompt.
    #[must_use]
    pub const fn deep_dive_words(&self) -> usize {
        self.deep_dive_words
    }
}

impl Default for LengthThresholds {
    fn default() -> Self {
        Self {
            brief_words: 10,
            expand_words: 20,
            bonus_min_words: 30,
            bonus_max_words: 150,
            long_max_words: 200,
            deep_dive_words: 80,
        }
    }
}

/// Point values for each scoring rule.
///
/// Plain data: any u8 combination is usable because the final score is
/// clamped, so these carry no constructor validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusWeights {
    /// Final-score cap for answers under the brief threshold.
    pub brief_cap: u8,
    /// Final-score cap for answers under the expand threshold.
    pub expand_cap: u8,
    /// Bonus for answers inside the well-developed band.
    pub length_bonus: u8,
    /// Smaller bonus for answers between the band and the long maximum.
    pub long_bonus: u8,
    /// Penalty for answers past the long maximum.
    pub long_penalty: u8,
    /// Bonus per STAR component present (behavioral stage).
    pub star_component: u8,
    /// Bonus per technology keyword (introduction/technical stages).
    pub tech_keyword: u8,
    /// Cap on the accumulated technology-keyword bonus.
    pub tech_cap: u8,
    /// Bonus per leadership signal group matched.
    pub leadership_signal: u8,
    /// Bonus for three or more sentences.
    pub sentence_flow: u8,
    /// Bonus for repeated first-person usage.
    pub first_person: u8,
    /// Bonus for quantified results (any digit).
    pub metrics: u8,
    /// Bonus for an explicit example.
    pub example: u8,
}

impl Default for BonusWeights {
    fn default() -> Self {
        Self {
            brief_cap: 25,
            expand_cap: 40,
            length_bonus: 20,
            long_bonus: 10,
            long_penalty: 10,
            star_component: 8,
            tech_keyword: 4,
            tech_cap: 16,
            leadership_signal: 6,
            sentence_flow: 8,
            first_person: 8,
            metrics: 8,
            example: 10,
        }
    }
}

/// The complete tuning bundle consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoringTuning {
    pub base: BaseScore,
    pub lengths: LengthThresholds,
    pub weights: BonusWeights,
    pub closing: TurnThreshold,
}

#[cfg(test)]
mod tests {
    use super::{BaseScore, LengthThresholds, ScoringTuning, ThresholdError, TurnThreshold};

    #[test]
    fn base_score_rejects_over_hundred() {
        assert!(matches!(
            BaseScore::new(101),
            Err(ThresholdError::BaseScoreTooLarge(101))
        ));
        assert_eq!(BaseScore::new(100).unwrap().as_u8(), 100);
    }

    #[test]
    fn base_score_default_is_sixty() {
        assert_eq!(BaseScore::default().as_u8(), 60);
    }

    #[test]
    fn turn_threshold_rejects_zero() {
        assert!(matches!(
            TurnThreshold::new(0),
            Err(ThresholdError::ClosingThresholdTooSmall)
        ));
        assert_eq!(TurnThreshold::new(4).unwrap().as_u8(), 4);
    }

    #[test]
    fn length_thresholds_reject_unordered_bands() {
        assert!(LengthThresholds::new(20, 10, 30, 150, 200, 80).is_err());
        assert!(LengthThresholds::new(10, 20, 15, 150, 200, 80).is_err());
        assert!(LengthThresholds::new(10, 20, 30, 150, 140, 80).is_err());
        assert!(LengthThresholds::new(10, 20, 30, 150, 200, 0).is_err());
        assert!(LengthThresholds::new(10, 20, 30, 150, 200, 80).is_ok());
    }

    #[test]
    fn default_bands_are_ordered() {
        let lengths = LengthThresholds::default();
        assert!(lengths.brief_words() < lengths.expand_words());
        assert!(lengths.expand_words() <= lengths.bonus_min_words());
        assert!(lengths.bonus_max_words() <= lengths.long_max_words());
    }

    #[test]
    fn default_tuning_is_canonical() {
        let tuning = ScoringTuning::default();
        assert_eq!(tuning.base.as_u8(), 60);
        assert_eq!(tuning.closing.as_u8(), 4);
        assert_eq!(tuning.lengths.deep_dive_words(), 80);
        assert_eq!(tuning.weights.star_component, 8);
    }
}
