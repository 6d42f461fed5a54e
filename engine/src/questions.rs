//! Curated practice questions, five per category.
//!
//! These are real interview questions, not generated text. The session draws
//! from them to open a stage with a concrete question instead of a generic
//! transition line.

use coach_types::{NonEmptyStaticStr, QuestionCategory};

const BEHAVIORAL_QUESTIONS: &[NonEmptyStaticStr] = &[
    NonEmptyStaticStr::new("Tell me about a time when you had to work with a difficult team member."),
    NonEmptyStaticStr::new("Describe a situation where you had to meet a tight deadline."),
    NonEmptyStaticStr::new("Give me an example of a time you showed leadership."),
    NonEmptyStaticStr::new("Tell me about a mistake you made and how you handled it."),
    NonEmptyStaticStr::new("Describe a time when you had to learn something new quickly."),
];

const TECHNICAL_QUESTIONS: &[NonEmptyStaticStr] = &[
    NonEmptyStaticStr::new("How would you design a URL shortening service like bit.ly?"),
    NonEmptyStaticStr::new("Explain the difference between SQL and NoSQL databases."),
    NonEmptyStaticStr::new("How would you optimize a slow-performing web application?"),
    NonEmptyStaticStr::new("Describe your approach to testing a new feature."),
    NonEmptyStaticStr::new("How would you handle a system that needs to scale to millions of users?"),
];

const LEADERSHIP_QUESTIONS: &[NonEmptyStaticStr] = &[
    NonEmptyStaticStr::new("How do you motivate a team member who is underperforming?"),
    NonEmptyStaticStr::new("Describe your approach to giving constructive feedback."),
    NonEmptyStaticStr::new("How would you handle a conflict between two team members?"),
    NonEmptyStaticStr::new("Tell me about a time you had to make a difficult decision."),
    NonEmptyStaticStr::new("How do you prioritize tasks when everything seems urgent?"),
];

const SITUATIONAL_QUESTIONS: &[NonEmptyStaticStr] = &[
    NonEmptyStaticStr::new("A client is unhappy with a deliverable. How do you handle it?"),
    NonEmptyStaticStr::new("You discover a security vulnerability in production. What do you do?"),
    NonEmptyStaticStr::new("Your team is behind schedule on a critical project. How do you respond?"),
    NonEmptyStaticStr::new(
        "A stakeholder requests a feature that goes against best practices. How do you handle it?",
    ),
    NonEmptyStaticStr::new(
        "You need to present technical information to non-technical executives. How do you approach it?",
    ),
];

/// Question bank for a category.
#[must_use]
pub fn questions_for(category: QuestionCategory) -> &'static [NonEmptyStaticStr] {
    match category {
        QuestionCategory::Behavioral => BEHAVIORAL_QUESTIONS,
        QuestionCategory::Technical => TECHNICAL_QUESTIONS,
        QuestionCategory::Leadership => LEADERSHIP_QUESTIONS,
        QuestionCategory::Situational => SITUATIONAL_QUESTIONS,
    }
}
