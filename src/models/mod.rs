pub mod fallback;
pub mod question;
pub mod result;

pub use fallback::fallback_questions;
pub use question::{AnswerRecord, Difficulty, Question, RawQuestion, OPTION_COUNT};
pub use result::{HistoryEntry, QuizResult};
