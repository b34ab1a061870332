use crate::quiz::Quiz;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct QuizRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Type")]
    pub quiz_type: String,
    #[tabled(rename = "Questions")]
    pub questions: usize,
    #[tabled(rename = "Timed")]
    pub timed: String,
    #[tabled(rename = "Updated")]
    pub updated: String,
}

impl From<&Quiz> for QuizRow {
    fn from(quiz: &Quiz) -> Self {
        let timed = match quiz.time_challenge {
            Some(tc) if tc.enabled => format!("{}s", tc.initial_time),
            _ => "-".to_string(),
        };
        Self {
            id: quiz.id.to_string(),
            title: quiz.title.clone(),
            quiz_type: quiz.quiz_type.label().to_string(),
            questions: quiz.questions.len(),
            timed,
            updated: quiz.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Render the quiz list, empty string for no quizzes
pub fn quiz_table(quizzes: &[Quiz]) -> String {
    if quizzes.is_empty() {
        return String::new();
    }

    let rows: Vec<QuizRow> = quizzes.iter().map(QuizRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
