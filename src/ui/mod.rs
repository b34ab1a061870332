pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, empty, header, info, quiz_details, section, success, warn};
pub use table::{quiz_table, QuizRow};
pub use theme::{theme, Theme};
