use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for terminal output of quizzes
#[derive(Debug, Clone)]
pub struct Theme {
    /// Quiz titles and question section rules
    pub header: Style,
    pub success: Style,
    pub warn: Style,
    /// Icons in front of key/value lines
    pub accent: Style,
    pub dim: Style,
    /// Answers marked correct
    pub correct: Style,
    /// Time challenge details and timed selectors
    pub timed: Style,
}

impl Theme {
    /// Colors only when stdout is a terminal and `NO_COLOR` is unset
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        if no_color || !console::Term::stdout().is_term() {
            Self::plain()
        } else {
            Self::colored()
        }
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            warn: Style::new().yellow().bold(),
            accent: Style::new().magenta(),
            dim: Style::new().bright_black(),
            correct: Style::new().green(),
            timed: Style::new().yellow(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            warn: Style::new(),
            accent: Style::new(),
            dim: Style::new(),
            correct: Style::new(),
            timed: Style::new(),
        }
    }

    /// Style for one answer line in quiz details
    pub fn answer(&self, correct: bool) -> Style {
        if correct { self.correct.clone() } else { Style::new() }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
