pub struct Icons;

impl Icons {
    pub const QUIZ: &str = "📝";
    pub const QUESTION: &str = "❓";
    pub const CHECK: &str = "✅";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const CLOCK: &str = "⏱️";
    pub const EXPORT: &str = "📤";
    pub const IMPORT: &str = "📥";
    pub const TRASH: &str = "🗑️";
    pub const DATABASE: &str = "🗄️";
    pub const EMPTY: &str = "∅";
    pub const BULLET: &str = "•";
    pub const MARKED: &str = "●";
    pub const UNMARKED: &str = "○";
}
