//! 兜底题库
//!
//! 没有凭据或生成失败时使用，内容固定

use crate::models::question::Question;

pub fn fallback_questions() -> Vec<Question> {
    vec![
        Question::new(
            "fb-1",
            "What is the capital of France?",
            ["London", "Berlin", "Paris", "Madrid"],
            2,
            "Paris is the capital and most populous city of France.",
        ),
        Question::new(
            "fb-2",
            "Which planet is known as the Red Planet?",
            ["Venus", "Mars", "Jupiter", "Saturn"],
            1,
            "Mars is often called the 'Red Planet' due to reddish iron oxide on its surface.",
        ),
        Question::new(
            "fb-3",
            "Who wrote 'Romeo and Juliet'?",
            ["Charles Dickens", "William Shakespeare", "Jane Austen", "Mark Twain"],
            1,
            "William Shakespeare wrote the tragedy early in his career.",
        ),
        Question::new(
            "fb-4",
            "What is the chemical symbol for Gold?",
            ["Au", "Ag", "Fe", "Hg"],
            0,
            "'Au' comes from the Latin 'aurum'.",
        ),
        Question::new(
            "fb-5",
            "In which year did the Titanic sink?",
            ["1905", "1912", "1918", "1923"],
            1,
            "The RMS Titanic sank on April 15, 1912.",
        ),
    ]
}
