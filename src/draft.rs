//! Authoring drafts
//!
//! A draft is what the authoring form edits before it is saved. It carries
//! the base type and the time challenge switch as two separate fields; the
//! timer values are kept even while the switch is off so toggling it back on
//! restores them.

use crate::quiz::{Question, Quiz, QuizType, TimeChallenge, TRUE_FALSE_ANSWERS};
use crate::{Error, Result};
use serde::Deserialize;

/// In-memory quiz being authored or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    pub title: String,
    pub quiz_type: QuizType,
    pub time_challenge_enabled: bool,
    /// Timer values; `enabled` inside is ignored in favour of the flag above
    pub time_challenge: TimeChallenge,
    pub questions: Vec<Question>,
}

impl QuizDraft {
    /// Start an empty, untimed draft
    pub fn new(title: impl Into<String>, quiz_type: QuizType) -> Self {
        Self {
            title: title.into(),
            quiz_type,
            time_challenge_enabled: false,
            time_challenge: TimeChallenge::default(),
            questions: Vec::new(),
        }
    }

    /// Turn the time challenge on with the given timings
    pub fn with_time_challenge(mut self, initial_time: u32, time_bonus: u32, time_penalty: u32) -> Self {
        self.time_challenge_enabled = true;
        self.time_challenge = TimeChallenge::enabled(initial_time, time_bonus, time_penalty);
        self
    }

    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    /// Load an existing quiz for editing
    pub fn from_quiz(quiz: &Quiz) -> Self {
        let time_challenge = quiz.time_challenge.unwrap_or_default();
        Self {
            title: quiz.title.clone(),
            quiz_type: quiz.quiz_type,
            time_challenge_enabled: time_challenge.enabled,
            time_challenge,
            questions: quiz.questions.clone(),
        }
    }

    /// Parse a draft from its JSON file form.
    ///
    /// `type` is a selector and may carry the timed suffix:
    ///
    /// ```json
    /// { "title": "Capitals", "type": "single-choice-time", "initialTime": 90,
    ///   "questions": [{ "text": "Capital of France?", "answers": ["Paris", "Lyon"], "correctAnswers": [0] }] }
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        let file: DraftFile = serde_json::from_str(text)?;
        let (quiz_type, timed) = QuizType::parse_selector(&file.quiz_type)?;
        let mut draft = Self::new(file.title.trim(), quiz_type);
        draft.time_challenge_enabled = timed;
        draft.time_challenge = TimeChallenge {
            enabled: timed,
            initial_time: file.initial_time.unwrap_or(TimeChallenge::DEFAULT_INITIAL_TIME),
            time_bonus: file.time_bonus.unwrap_or(TimeChallenge::DEFAULT_TIME_BONUS),
            time_penalty: file.time_penalty.unwrap_or(TimeChallenge::DEFAULT_TIME_PENALTY),
            repeat_wrong_questions: true,
        };
        draft.questions = file
            .questions
            .into_iter()
            .map(|q| q.into_question(quiz_type))
            .collect();
        Ok(draft)
    }

    /// Base type and time challenge as they get persisted.
    ///
    /// The challenge is always present; a disabled one stores the default timings.
    pub fn to_record_parts(&self) -> (QuizType, TimeChallenge) {
        let time_challenge = if self.time_challenge_enabled {
            TimeChallenge {
                enabled: true,
                repeat_wrong_questions: true,
                ..self.time_challenge
            }
        } else {
            TimeChallenge::default()
        };
        (self.quiz_type, time_challenge)
    }

    /// Check the draft can be saved. Errors name the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(invalid("quiz title must not be empty"));
        }
        if self.questions.is_empty() {
            return Err(invalid("add at least one question"));
        }

        for (i, question) in self.questions.iter().enumerate() {
            question
                .check(self.quiz_type)
                .map_err(|msg| invalid(format!("question {}: {}", i + 1, msg)))?;
        }

        if self.time_challenge_enabled && !self.time_challenge.has_positive_timings() {
            return Err(invalid("time challenge values must be positive"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::Validation(msg.into())
}

/// On-disk shape of a draft
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftFile {
    title: String,
    #[serde(rename = "type")]
    quiz_type: String,
    #[serde(default)]
    questions: Vec<DraftQuestion>,
    initial_time: Option<u32>,
    time_bonus: Option<u32>,
    time_penalty: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftQuestion {
    text: String,
    #[serde(default)]
    answers: Vec<String>,
    #[serde(default)]
    correct_answers: Vec<usize>,
}

impl DraftQuestion {
    fn into_question(self, quiz_type: QuizType) -> Question {
        // True/false answers are fixed; the file may omit them
        let answers = if quiz_type == QuizType::TrueFalse {
            TRUE_FALSE_ANSWERS.iter().map(|a| a.to_string()).collect()
        } else {
            self.answers.into_iter().map(|a| a.trim().to_string()).collect()
        };
        Question {
            text: self.text.trim().to_string(),
            answers,
            correct_answers: self.correct_answers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn capitals() -> QuizDraft {
        QuizDraft::new("Capitals", QuizType::SingleChoice)
            .with_question(Question::new("Capital of France?", ["Paris", "Lyon"]).with_correct(0))
    }

    fn assert_invalid(draft: &QuizDraft, needle: &str) {
        match draft.validate() {
            Err(Error::Validation(msg)) => assert!(msg.contains(needle), "unexpected message: {}", msg),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(capitals().validate().is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut draft = capitals();
        draft.title = "   ".into();
        assert_invalid(&draft, "title");
    }

    #[test]
    fn test_no_questions_rejected() {
        let draft = QuizDraft::new("Empty", QuizType::MultipleChoice);
        assert_invalid(&draft, "at least one question");
    }

    #[test]
    fn test_missing_correct_answer_rejected() {
        let draft = QuizDraft::new("Q", QuizType::SingleChoice)
            .with_question(Question::new("Pick one", ["a", "b"]));
        assert_invalid(&draft, "question 1: mark at least one correct answer");
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let draft = QuizDraft::new("Q", QuizType::SingleChoice)
            .with_question(Question::new("Pick one", ["a", "b"]).with_correct(2));
        assert_invalid(&draft, "out of range");
    }

    #[test]
    fn test_single_choice_allows_one_correct() {
        let question = Question::new("Pick", ["a", "b", "c"]).with_correct(0).with_correct(2);
        let single = QuizDraft::new("Q", QuizType::SingleChoice).with_question(question.clone());
        assert_invalid(&single, "exactly one correct answer");

        let multi = QuizDraft::new("Q", QuizType::MultipleChoice).with_question(question);
        assert!(multi.validate().is_ok());
    }

    #[test]
    fn test_true_false_needs_two_answers() {
        let draft = QuizDraft::new("TF", QuizType::TrueFalse)
            .with_question(Question::new("Sky is blue", ["True", "False", "Maybe"]).with_correct(0));
        assert_invalid(&draft, "exactly 2 answers");
    }

    #[test]
    fn test_time_challenge_values_must_be_positive() {
        let draft = capitals().with_time_challenge(0, 5, 3);
        assert_invalid(&draft, "positive");
    }

    #[test]
    fn test_disabled_time_challenge_stores_defaults() {
        let mut draft = capitals().with_time_challenge(120, 10, 10);
        draft.time_challenge_enabled = false;
        assert_eq!(draft.to_record_parts(), (QuizType::SingleChoice, TimeChallenge::default()));

        draft.time_challenge_enabled = true;
        let (_, tc) = draft.to_record_parts();
        assert!(tc.enabled);
        assert_eq!(tc.initial_time, 120);
    }

    #[test]
    fn test_from_json_with_timed_selector() {
        let draft = QuizDraft::from_json(
            r#"{
                "title": " Capitals ",
                "type": "single-choice-time",
                "initialTime": 90,
                "questions": [{"text": "Capital of France?", "answers": ["Paris", "Lyon"], "correctAnswers": [0]}]
            }"#,
        )
        .unwrap();
        assert_eq!(draft.title, "Capitals");
        assert_eq!(draft.quiz_type, QuizType::SingleChoice);
        assert!(draft.time_challenge_enabled);
        assert_eq!(draft.time_challenge.initial_time, 90);
        assert_eq!(draft.time_challenge.time_bonus, TimeChallenge::DEFAULT_TIME_BONUS);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_true_false_answers() {
        let draft = QuizDraft::from_json(
            r#"{"title": "TF", "type": "true-false", "questions": [{"text": "Water is wet", "correctAnswers": [0]}]}"#,
        )
        .unwrap();
        assert_eq!(draft.questions[0].answers, vec!["True", "False"]);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_from_json_rejects_unknown_type() {
        let result = QuizDraft::from_json(r#"{"title": "X", "type": "essay"}"#);
        assert!(matches!(result, Err(Error::InvalidQuizType(_))));
    }

    #[test]
    fn test_from_quiz_keeps_timings() {
        let now = Utc::now();
        let quiz = Quiz {
            id: "q1".into(),
            title: "Timed".into(),
            quiz_type: QuizType::MultipleChoice,
            questions: capitals().questions,
            time_challenge: Some(TimeChallenge::enabled(30, 2, 1)),
            created_at: now,
            updated_at: now,
        };
        let draft = QuizDraft::from_quiz(&quiz);
        assert!(draft.time_challenge_enabled);
        assert_eq!(draft.time_challenge.initial_time, 30);
        assert_eq!(draft.quiz_type, QuizType::MultipleChoice);
    }
}
