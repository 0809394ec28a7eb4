//! 终端画面渲染
//!
//! 只负责把数据排版成文本，不修改任何状态

use std::fmt::Write;

use crate::models::{Difficulty, Question, QuizResult};
use crate::workflow::question_card::{next_label, progress_percentage, OptionMark, QuestionCard};

pub const TOPIC_SUGGESTIONS: [&str; 6] = [
    "General Knowledge",
    "Science & Nature",
    "History",
    "Pop Culture",
    "Technology",
    "Geography",
];

const RULE: &str = "────────────────────────────────────────────────────────────";

/// 把用户输入解析为主题：空输入取默认，1-6 取推荐，其余作为自定义主题
pub fn parse_topic(input: &str) -> String {
    let input = input.trim();
    if input.is_empty() {
        return TOPIC_SUGGESTIONS[0].to_string();
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=TOPIC_SUGGESTIONS.len()).contains(&n) => TOPIC_SUGGESTIONS[n - 1].to_string(),
        _ => input.to_string(),
    }
}

/// 空输入取默认难度
pub fn parse_difficulty(input: &str) -> Option<Difficulty> {
    let input = input.trim();
    if input.is_empty() {
        return Some(Difficulty::default());
    }
    input.parse().ok()
}

/// 选项输入：1-4 或 A-D（大小写不敏感）
pub fn parse_option(input: &str) -> Option<usize> {
    let input = input.trim();
    let mut chars = input.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return None;
    };
    match c.to_ascii_lowercase() {
        '1'..='4' => Some(c as usize - '1' as usize),
        'a'..='d' => Some(c.to_ascii_lowercase() as usize - 'a' as usize),
        _ => None,
    }
}

fn option_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

pub fn render_start_screen() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", RULE);
    let _ = writeln!(out, "Gemini Quiz Master");
    let _ = writeln!(out, "Test your knowledge with AI-generated questions on any topic.");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Choose a Topic");
    for (i, topic) in TOPIC_SUGGESTIONS.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, topic);
    }
    out
}

pub fn render_loading(topic: &str) -> String {
    format!("\nGenerating questions about {}...\n", topic)
}

pub fn render_load_error() -> String {
    "\nError loading questions. Please try again.\n".to_string()
}

pub fn render_question(
    question: &Question,
    card: &QuestionCard,
    index: usize,
    total: usize,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", RULE);
    let _ = writeln!(
        out,
        "Question {} of {}    {}% Complete",
        index + 1,
        total,
        progress_percentage(index, total)
    );
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{}\n", question.text);
    out.push_str(&render_options(question, card));
    out
}

pub fn render_options(question: &Question, card: &QuestionCard) -> String {
    let mut out = String::new();
    for (i, option) in question.options.iter().enumerate() {
        let marker = match card.mark(question, i) {
            OptionMark::Idle => "( )",
            OptionMark::Selected => "(*)",
            OptionMark::Correct => " ✔ ",
            OptionMark::Incorrect => " ✘ ",
            OptionMark::Dimmed => "   ",
        };
        let _ = writeln!(out, "  {} {}. {}", marker, option_letter(i), option);
    }
    out
}

/// 提交后的反馈：标记后的选项 + 解析
pub fn render_feedback(
    question: &Question,
    card: &QuestionCard,
    index: usize,
    total: usize,
) -> String {
    let mut out = String::new();
    let verdict = if question.is_correct(card.selected()) {
        "Correct!"
    } else {
        "Incorrect."
    };
    let _ = writeln!(out, "\n{}\n", verdict);
    out.push_str(&render_options(question, card));
    let _ = writeln!(out, "\nExplanation: {}", question.explanation);
    let _ = writeln!(out, "\n[Enter] {}", next_label(index, total));
    out
}

pub fn render_results(result: &QuizResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", RULE);
    let _ = writeln!(out, "Quiz Complete!");
    let _ = writeln!(out, "{}", result.feedback_message());
    let _ = writeln!(
        out,
        "\n  {} / {}    {}% Accuracy",
        result.score,
        result.total,
        result.percentage()
    );
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Question Review");

    for (i, entry) in result.history.iter().enumerate() {
        let icon = if entry.is_correct { "✔" } else { "✘" };
        let _ = writeln!(out, "\n{} Question {}", icon, i + 1);
        let _ = writeln!(out, "  {}", entry.question_text);
        let _ = writeln!(out, "  Your Answer: {}", entry.selected_option().unwrap_or(""));
        if !entry.is_correct {
            let _ = writeln!(out, "  Correct Answer: {}", entry.correct_option());
            let _ = writeln!(out, "  Explanation: {}", entry.explanation);
        }
    }
    out
}
