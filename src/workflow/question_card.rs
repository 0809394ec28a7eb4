//! 单题交互状态
//!
//! 选中项和"已提交"标记只属于当前这道题，不进入会话状态。
//! 每次题目 id 变化时通过 `sync` 清空，开始新一轮时通过 `reset` 清空。

use crate::models::{Question, OPTION_COUNT};

/// 选项的展示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// 未提交、未选中
    Idle,
    /// 未提交、已选中
    Selected,
    /// 已提交，正确答案
    Correct,
    /// 已提交，用户选错的那一项
    Incorrect,
    /// 已提交，其他选项
    Dimmed,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionCard {
    question_id: Option<String>,
    selected: Option<usize>,
    submitted: bool,
}

impl QuestionCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 绑定到当前题目；题目变化时清空选择和提交状态，返回是否发生了重置
    pub fn sync(&mut self, question: &Question) -> bool {
        if self.question_id.as_deref() == Some(question.id.as_str()) {
            return false;
        }
        self.question_id = Some(question.id.clone());
        self.selected = None;
        self.submitted = false;
        true
    }

    /// 解除与题目的绑定；新一轮的第一题即使 id 相同也会重新开始
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 选择选项；提交后或下标越界时忽略
    pub fn select(&mut self, index: usize) -> bool {
        if self.submitted || index >= OPTION_COUNT {
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn can_submit(&self) -> bool {
        !self.submitted && self.selected.is_some()
    }

    /// 提交当前选择；没有选择时不生效
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.submitted = true;
        true
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// "下一题"：已提交时交出选择，交给会话记录
    pub fn confirm(&self) -> Option<usize> {
        if self.submitted {
            self.selected
        } else {
            None
        }
    }

    pub fn mark(&self, question: &Question, index: usize) -> OptionMark {
        if !self.submitted {
            return if self.selected == Some(index) {
                OptionMark::Selected
            } else {
                OptionMark::Idle
            };
        }
        if index == question.correct_answer_index {
            OptionMark::Correct
        } else if self.selected == Some(index) {
            OptionMark::Incorrect
        } else {
            OptionMark::Dimmed
        }
    }
}

/// 进度百分比：已完成题数 / 总数
pub fn progress_percentage(current_index: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((current_index as f64 / total as f64) * 100.0).round() as u32
}

/// 提交后按钮文案
pub fn next_label(current_index: usize, total: usize) -> &'static str {
    if current_index + 1 < total {
        "Next Question"
    } else {
        "Finish Quiz"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fallback_questions;

    #[test]
    fn test_reset_clears_state_for_same_question() {
        let questions = fallback_questions();
        let mut card = QuestionCard::new();
        card.sync(&questions[4]);
        card.select(0);
        card.submit();

        // 同一道题再次出现，sync 不会清空
        assert!(!card.sync(&questions[4]));
        assert!(card.is_submitted());

        card.reset();
        assert!(card.sync(&questions[4]));
        assert!(!card.is_submitted());
        assert_eq!(card.selected(), None);
        assert_eq!(card.confirm(), None);
    }

    #[test]
    fn test_submit_requires_selection() {
        let questions = fallback_questions();
        let mut card = QuestionCard::new();
        card.sync(&questions[0]);

        assert!(!card.can_submit());
        assert!(!card.submit());
        assert_eq!(card.confirm(), None);

        assert!(card.select(1));
        assert!(card.select(2));
        assert!(card.submit());
        assert_eq!(card.confirm(), Some(2));
    }

    #[test]
    fn test_selection_locked_after_submit() {
        let questions = fallback_questions();
        let mut card = QuestionCard::new();
        card.sync(&questions[0]);
        card.select(0);
        card.submit();

        assert!(!card.select(2));
        assert_eq!(card.selected(), Some(0));
        assert!(!card.select(7));
    }

    #[test]
    fn test_sync_resets_on_new_question() {
        let questions = fallback_questions();
        let mut card = QuestionCard::new();
        assert!(card.sync(&questions[0]));
        card.select(3);
        card.submit();

        assert!(!card.sync(&questions[0]));
        assert!(card.is_submitted());

        assert!(card.sync(&questions[1]));
        assert_eq!(card.selected(), None);
        assert!(!card.is_submitted());
    }

    #[test]
    fn test_marks() {
        let questions = fallback_questions();
        let q = &questions[0]; // 正确答案 2
        let mut card = QuestionCard::new();
        card.sync(q);
        card.select(0);
        assert_eq!(card.mark(q, 0), OptionMark::Selected);
        assert_eq!(card.mark(q, 2), OptionMark::Idle);

        card.submit();
        assert_eq!(card.mark(q, 0), OptionMark::Incorrect);
        assert_eq!(card.mark(q, 2), OptionMark::Correct);
        assert_eq!(card.mark(q, 1), OptionMark::Dimmed);
    }

    #[test]
    fn test_progress_and_labels() {
        assert_eq!(progress_percentage(0, 5), 0);
        assert_eq!(progress_percentage(2, 3), 67);
        assert_eq!(progress_percentage(0, 0), 0);
        assert_eq!(next_label(3, 5), "Next Question");
        assert_eq!(next_label(4, 5), "Finish Quiz");
    }
}
