//! STAR component detection.
//!
//! A behavioral answer is expected to cover Situation, Task, Action, and
//! Result. Detection is four independent keyword-membership tests over the
//! lowercase text, so an answer can satisfy anywhere from zero to all four.

use serde::{Deserialize, Serialize};

use crate::TextSignals;

const SITUATION_KEYWORDS: &[&str] = &["situation", "context", "when", "where", "background"];
const TASK_KEYWORDS: &[&str] = &["task", "responsibility", "goal", "objective", "needed to"];
const ACTION_KEYWORDS: &[&str] = &["action", "did", "implemented", "decided", "approached"];
const RESULT_KEYWORDS: &[&str] = &["result", "outcome", "achieved", "improved", "success"];

/// Which STAR components a response touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StarComponents {
    pub situation: bool,
    pub task: bool,
    pub action: bool,
    pub result: bool,
}

impl StarComponents {
    /// Detect components from a response's lexical signals.
    #[must_use]
    pub fn detect(signals: &TextSignals) -> Self {
        Self {
            situation: signals.contains_any(SITUATION_KEYWORDS),
            task: signals.contains_any(TASK_KEYWORDS),
            action: signals.contains_any(ACTION_KEYWORDS),
            result: signals.contains_any(RESULT_KEYWORDS),
        }
    }

    /// How many of the four components are present.
    #[must_use]
    pub fn present_count(&self) -> u8 {
        u8::from(self.situation) + u8::from(self.task) + u8::from(self.action) + u8::from(self.result)
    }

    /// True when all four components are covered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.situation && self.task && self.action && self.result
    }
}
