use crate::quiz::{Quiz, question_count_label};
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(icon: &str, text: &str) {
    println!("{} {}", icon, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().accent.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn empty(label: &str) {
    println!("{} {}", Icons::EMPTY, label.style(theme().dim.clone()));
}

/// Full view of one quiz: metadata, timer settings, questions with marked answers
pub fn quiz_details(quiz: &Quiz) {
    header(Icons::QUIZ, &quiz.title);
    info("Id", quiz.id.as_str());
    info("Type", quiz.quiz_type.label());
    info("Questions", &question_count_label(quiz.questions.len()));
    info("Created", &quiz.created_at.format("%Y-%m-%d %H:%M").to_string());
    info("Updated", &quiz.updated_at.format("%Y-%m-%d %H:%M").to_string());

    if let Some(tc) = quiz.time_challenge.filter(|tc| tc.enabled) {
        println!(
            "{} {}",
            Icons::CLOCK,
            format!(
                "Time challenge: {}s start, +{}s per correct, -{}s per wrong",
                tc.initial_time, tc.time_bonus, tc.time_penalty
            )
            .style(theme().timed.clone())
        );
    }

    for (i, question) in quiz.questions.iter().enumerate() {
        section(&format!(" Question {} ", i + 1));
        println!("{} {}", Icons::QUESTION, question.text);
        for (j, answer) in question.answers.iter().enumerate() {
            let correct = question.is_correct(j);
            let marker = if correct { Icons::MARKED } else { Icons::UNMARKED };
            println!("   {} {}", marker, answer.style(theme().answer(correct)));
        }
    }
}
