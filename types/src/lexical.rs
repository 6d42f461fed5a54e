//! Shallow lexical signals extracted from a single response.
//!
//! Everything downstream (STAR detection, scoring, stage transitions, prompt
//! selection) reads these signals instead of re-scanning the raw text.

/// Signals derived from one response string. Pure and total: any string,
/// including the empty string, produces a valid value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSignals {
    word_count: usize,
    sentence_count: usize,
    lower: String,
    has_digit: bool,
    first_person_count: usize,
}

impl TextSignals {
    /// Analyze a raw response.
    ///
    /// Empty and whitespace-only input yields `word_count == 0`; there is no
    /// one-token inflation for blank strings.
    #[must_use]
    pub fn analyze(text: &str) -> Self {
        let trimmed = text.trim();
        let lower = trimmed.to_lowercase();

        let word_count = trimmed.split_whitespace().count();
        let sentence_count = trimmed
            .split(['.', '!', '?'])
            .filter(|segment| !segment.trim().is_empty())
            .count();
        let has_digit = trimmed.chars().any(|c| c.is_ascii_digit());
        let first_person_count = lower.matches("i ").count();

        Self {
            word_count,
            sentence_count,
            lower,
            has_digit,
            first_person_count,
        }
    }

    /// Count of whitespace-delimited tokens after trimming.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Count of non-empty segments after splitting on `.`, `!`, `?`.
    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    /// The trimmed, lowercased form of the response.
    #[must_use]
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Whether any character is a decimal digit.
    #[must_use]
    pub fn has_digit(&self) -> bool {
        self.has_digit
    }

    /// Occurrences of the substring `"i "` in the lowercase text. A crude
    /// first-person proxy carried over from the scoring heuristics.
    #[must_use]
    pub fn first_person_count(&self) -> usize {
        self.first_person_count
    }

    /// Keyword-membership primitive: true if the lowercase text contains any
    /// of `keywords`.
    #[must_use]
    pub fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.lower.contains(keyword))
    }

    /// How many of `keywords` appear in the lowercase text. Each keyword
    /// counts once no matter how often it repeats.
    #[must_use]
    pub fn matching_count(&self, keywords: &[&str]) -> usize {
        keywords
            .iter()
            .filter(|keyword| self.lower.contains(*keyword))
            .count()
    }
}
