pub mod question_card;
pub mod scoring;
pub mod session;

pub use question_card::{OptionMark, QuestionCard};
pub use scoring::compute_result;
pub use session::{AnswerOutcome, LoadTicket, Phase, QuizSession};
