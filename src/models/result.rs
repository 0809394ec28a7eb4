use serde::Serialize;

use crate::models::question::OPTION_COUNT;

/// 单题回顾
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub question_id: String,
    pub question_text: String,
    /// None 表示未作答，永远不会等于任何有效下标
    pub selected_option_index: Option<usize>,
    pub correct_option_index: usize,
    pub is_correct: bool,
    pub explanation: String,
    pub options: [String; OPTION_COUNT],
}

impl HistoryEntry {
    /// 用户所选选项文本；未作答或下标越界时为 None
    pub fn selected_option(&self) -> Option<&str> {
        self.selected_option_index
            .and_then(|idx| self.options.get(idx))
            .map(String::as_str)
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_option_index]
    }
}

/// 测验结果（派生数据，不存储）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub history: Vec<HistoryEntry>,
}

impl QuizResult {
    /// 正确率（四舍五入到整数百分比），没有题目时为 0
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.score as f64 / self.total as f64) * 100.0).round() as u32
    }

    pub fn feedback_message(&self) -> &'static str {
        match self.percentage() {
            p if p >= 90 => "Outstanding! You're a master!",
            p if p >= 70 => "Great job! Very impressive.",
            p if p >= 50 => "Good effort! Keep learning.",
            _ => "Nice try! Practice makes perfect.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: usize, total: usize) -> QuizResult {
        QuizResult {
            score,
            total,
            history: Vec::new(),
        }
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(result(2, 3).percentage(), 67);
        assert_eq!(result(1, 3).percentage(), 33);
        assert_eq!(result(5, 5).percentage(), 100);
        assert_eq!(result(0, 0).percentage(), 0);
    }

    #[test]
    fn test_feedback_thresholds() {
        assert_eq!(result(9, 10).feedback_message(), "Outstanding! You're a master!");
        assert_eq!(result(7, 10).feedback_message(), "Great job! Very impressive.");
        assert_eq!(result(5, 10).feedback_message(), "Good effort! Keep learning.");
        assert_eq!(result(4, 10).feedback_message(), "Nice try! Practice makes perfect.");
    }

    #[test]
    fn test_unanswered_has_no_selected_text() {
        let entry = HistoryEntry {
            question_id: "fb-1".to_string(),
            question_text: "Q".to_string(),
            selected_option_index: None,
            correct_option_index: 2,
            is_correct: false,
            explanation: "E".to_string(),
            options: ["a", "b", "c", "d"].map(str::to_string),
        };
        assert_eq!(entry.selected_option(), None);
        assert_eq!(entry.correct_option(), "c");
    }
}
