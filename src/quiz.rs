//! Quiz records
//!
//! A quiz has one base type that decides the answer format of every question:
//! - `single-choice`: one correct answer among two or more
//! - `multiple-choice`: one or more correct answers among two or more
//! - `true-false`: the fixed answers "True" / "False", one correct
//!
//! Timed play is not a separate type. It is the `timeChallenge` attached to
//! the quiz. Selector strings such as `single-choice-time` only exist at the
//! input boundary and are split into base type + enabled flag on parse.

use crate::id::QuizId;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Suffix marking a timed variant in selector strings
pub const TIMED_SUFFIX: &str = "-time";

/// Answers every true/false question carries
pub const TRUE_FALSE_ANSWERS: [&str; 2] = ["True", "False"];

/// Answer format of every question in a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizType {
    /// Exactly one correct answer
    #[default]
    SingleChoice,
    /// One or more correct answers
    MultipleChoice,
    /// Fixed True / False answers, exactly one correct
    TrueFalse,
}

impl QuizType {
    /// Get the persisted string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizType::SingleChoice => "single-choice",
            QuizType::MultipleChoice => "multiple-choice",
            QuizType::TrueFalse => "true-false",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            QuizType::SingleChoice => "Single-Choice",
            QuizType::MultipleChoice => "Multiple-Choice",
            QuizType::TrueFalse => "True / False",
        }
    }

    /// Get all quiz types
    pub fn all() -> &'static [QuizType] {
        &[
            QuizType::SingleChoice,
            QuizType::MultipleChoice,
            QuizType::TrueFalse,
        ]
    }

    /// Whether a question may mark more than one answer as correct
    pub fn allows_multiple_correct(&self) -> bool {
        matches!(self, QuizType::MultipleChoice)
    }

    /// Parse a selector such as `true-false-time` into base type and timed flag
    pub fn parse_selector(selector: &str) -> Result<(QuizType, bool)> {
        let selector = selector.trim();
        match selector.strip_suffix(TIMED_SUFFIX) {
            Some(base) => Ok((base.parse()?, true)),
            None => Ok((selector.parse()?, false)),
        }
    }

    /// Selector string for this base type, with the timed suffix when `timed`
    pub fn selector(&self, timed: bool) -> String {
        if timed {
            format!("{}{}", self.as_str(), TIMED_SUFFIX)
        } else {
            self.as_str().to_string()
        }
    }
}

impl FromStr for QuizType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "single-choice" | "single" | "sc" => Ok(QuizType::SingleChoice),
            "multiple-choice" | "multiple" | "mc" => Ok(QuizType::MultipleChoice),
            "true-false" | "truefalse" | "tf" | "boolean" => Ok(QuizType::TrueFalse),
            _ => Err(Error::InvalidQuizType(s.to_string())),
        }
    }
}

impl std::fmt::Display for QuizType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Timed-play settings. All durations are in seconds.
///
/// Missing fields deserialize to the defaults, so partial objects coming
/// from imports are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeChallenge {
    pub enabled: bool,
    pub initial_time: u32,
    pub time_bonus: u32,
    pub time_penalty: u32,
    pub repeat_wrong_questions: bool,
}

impl TimeChallenge {
    pub const DEFAULT_INITIAL_TIME: u32 = 60;
    pub const DEFAULT_TIME_BONUS: u32 = 5;
    pub const DEFAULT_TIME_PENALTY: u32 = 3;

    /// An enabled challenge with the given timings
    pub fn enabled(initial_time: u32, time_bonus: u32, time_penalty: u32) -> Self {
        Self {
            enabled: true,
            initial_time,
            time_bonus,
            time_penalty,
            repeat_wrong_questions: true,
        }
    }

    /// Every timer value is at least one second
    pub fn has_positive_timings(&self) -> bool {
        self.initial_time > 0 && self.time_bonus > 0 && self.time_penalty > 0
    }
}

impl Default for TimeChallenge {
    fn default() -> Self {
        Self {
            enabled: false,
            initial_time: Self::DEFAULT_INITIAL_TIME,
            time_bonus: Self::DEFAULT_TIME_BONUS,
            time_penalty: Self::DEFAULT_TIME_PENALTY,
            repeat_wrong_questions: true,
        }
    }
}

/// A single question with its ordered answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    pub answers: Vec<String>,
    /// Zero-based indices into `answers`
    pub correct_answers: Vec<usize>,
}

impl Question {
    /// Create a question with no answer marked correct yet
    pub fn new<I, S>(text: impl Into<String>, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            answers: answers.into_iter().map(Into::into).collect(),
            correct_answers: Vec::new(),
        }
    }

    /// Mark an answer as correct
    pub fn with_correct(mut self, index: usize) -> Self {
        if !self.correct_answers.contains(&index) {
            self.correct_answers.push(index);
        }
        self
    }

    pub fn is_correct(&self, index: usize) -> bool {
        self.correct_answers.contains(&index)
    }

    /// Check the answer rules `quiz_type` imposes on this question.
    ///
    /// The message names the first broken rule and leaves numbering the
    /// question to the caller.
    pub fn check(&self, quiz_type: QuizType) -> std::result::Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("text must not be empty".to_string());
        }

        match quiz_type {
            QuizType::TrueFalse if self.answers.len() != TRUE_FALSE_ANSWERS.len() => {
                return Err("true/false questions need exactly 2 answers".to_string());
            }
            _ if self.answers.len() < 2 => return Err("add at least 2 answers".to_string()),
            _ => {}
        }

        if let Some(empty) = self.answers.iter().position(|a| a.trim().is_empty()) {
            return Err(format!("answer {} is empty", empty + 1));
        }

        if self.correct_answers.is_empty() {
            return Err("mark at least one correct answer".to_string());
        }

        let mut seen = Vec::with_capacity(self.correct_answers.len());
        for &index in &self.correct_answers {
            if index >= self.answers.len() {
                return Err(format!("correct answer index {} is out of range", index));
            }
            if seen.contains(&index) {
                return Err(format!("answer {} is marked correct twice", index + 1));
            }
            seen.push(index);
        }

        if !quiz_type.allows_multiple_correct() && self.correct_answers.len() > 1 {
            return Err(format!(
                "{} questions allow exactly one correct answer",
                quiz_type.label()
            ));
        }
        Ok(())
    }
}

/// A stored quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Unique identifier, never changes after creation
    pub id: QuizId,
    pub title: String,
    /// Always the base type; timing lives in `time_challenge`
    #[serde(rename = "type")]
    pub quiz_type: QuizType,
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_challenge: Option<TimeChallenge>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    /// Whether the quiz is played against the clock
    pub fn is_timed(&self) -> bool {
        self.time_challenge.is_some_and(|tc| tc.enabled)
    }

    /// Selector string the authoring form would show for this quiz
    pub fn selector(&self) -> String {
        self.quiz_type.selector(self.is_timed())
    }
}

/// "1 question" / "n questions"
pub fn question_count_label(count: usize) -> String {
    if count == 1 {
        "1 question".to_string()
    } else {
        format!("{} questions", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_type_roundtrip() {
        for quiz_type in QuizType::all() {
            let parsed: QuizType = quiz_type.as_str().parse().unwrap();
            assert_eq!(*quiz_type, parsed);
        }
    }

    #[test]
    fn test_quiz_type_aliases() {
        assert_eq!(QuizType::from_str("mc").unwrap(), QuizType::MultipleChoice);
        assert_eq!(QuizType::from_str("TF").unwrap(), QuizType::TrueFalse);
        assert_eq!(QuizType::from_str("single").unwrap(), QuizType::SingleChoice);
        assert!(QuizType::from_str("essay").is_err());
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!(
            QuizType::parse_selector("multiple-choice-time").unwrap(),
            (QuizType::MultipleChoice, true)
        );
        assert_eq!(
            QuizType::parse_selector("true-false").unwrap(),
            (QuizType::TrueFalse, false)
        );
        assert!(QuizType::parse_selector("-time").is_err());
        assert_eq!(QuizType::SingleChoice.selector(true), "single-choice-time");
        assert_eq!(QuizType::SingleChoice.selector(false), "single-choice");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&QuizType::TrueFalse).unwrap(),
            "\"true-false\""
        );
        let q = Question::new("Capital of France?", ["Paris", "Lyon"]).with_correct(0);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["correctAnswers"], serde_json::json!([0]));
    }

    #[test]
    fn test_time_challenge_defaults_fill_missing_fields() {
        let tc: TimeChallenge = serde_json::from_str(r#"{"enabled":true,"initialTime":90}"#).unwrap();
        assert!(tc.enabled);
        assert_eq!(tc.initial_time, 90);
        assert_eq!(tc.time_bonus, TimeChallenge::DEFAULT_TIME_BONUS);
        assert_eq!(tc.time_penalty, TimeChallenge::DEFAULT_TIME_PENALTY);
        assert!(tc.repeat_wrong_questions);
    }

    #[test]
    fn test_quiz_without_time_challenge_parses() {
        let json = r#"{
            "id": "abc",
            "title": "Capitals",
            "type": "single-choice",
            "questions": [{"text": "Capital of France?", "answers": ["Paris", "Lyon"], "correctAnswers": [0]}],
            "createdAt": "2024-03-01T10:00:00.000Z",
            "updatedAt": "2024-03-01T10:00:00.000Z"
        }"#;
        let quiz: Quiz = serde_json::from_str(json).unwrap();
        assert_eq!(quiz.id, "abc");
        assert!(!quiz.is_timed());
        assert_eq!(quiz.selector(), "single-choice");
    }

    #[test]
    fn test_question_check_rules() {
        let tf = Question::new("The earth is flat", TRUE_FALSE_ANSWERS).with_correct(1);
        assert!(tf.check(QuizType::TrueFalse).is_ok());
        assert!(tf.is_correct(1));

        let three = Question::new("Sky", ["True", "False", "Maybe"]).with_correct(0);
        assert!(three.check(QuizType::TrueFalse).unwrap_err().contains("exactly 2 answers"));
        assert!(three.check(QuizType::SingleChoice).is_ok());

        let mut duplicated = Question::new("Pick", ["a", "b"]).with_correct(0);
        duplicated.correct_answers.push(0);
        assert!(duplicated.check(QuizType::MultipleChoice).unwrap_err().contains("twice"));

        let out_of_range = Question::new("Pick", ["a", "b"]).with_correct(9);
        assert!(out_of_range.check(QuizType::MultipleChoice).unwrap_err().contains("out of range"));

        let two_correct = Question::new("Pick", ["a", "b"]).with_correct(0).with_correct(1);
        assert!(two_correct.check(QuizType::SingleChoice).unwrap_err().contains("exactly one"));
        assert!(two_correct.check(QuizType::MultipleChoice).is_ok());
    }

    #[test]
    fn test_positive_timings() {
        assert!(TimeChallenge::default().has_positive_timings());
        assert!(!TimeChallenge::enabled(0, 5, 3).has_positive_timings());
    }

    #[test]
    fn test_question_count_label() {
        assert_eq!(question_count_label(0), "0 questions");
        assert_eq!(question_count_label(1), "1 question");
        assert_eq!(question_count_label(7), "7 questions");
    }
}
