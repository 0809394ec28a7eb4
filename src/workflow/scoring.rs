//! 计分
//!
//! 纯函数：同样的输入永远得到同样的结果

use crate::models::{AnswerRecord, HistoryEntry, Question, QuizResult};

/// 根据题目和作答记录计算结果
///
/// 按题目顺序逐题查找 question_id 对应的作答；找不到视为未作答，计为错误
pub fn compute_result(questions: &[Question], answers: &[AnswerRecord]) -> QuizResult {
    let history: Vec<HistoryEntry> = questions
        .iter()
        .map(|q| {
            let selected = answers
                .iter()
                .find(|a| a.question_id == q.id)
                .map(|a| a.selected_option_index);

            HistoryEntry {
                question_id: q.id.clone(),
                question_text: q.text.clone(),
                selected_option_index: selected,
                correct_option_index: q.correct_answer_index,
                is_correct: q.is_correct(selected),
                explanation: q.explanation.clone(),
                options: q.options.clone(),
            }
        })
        .collect();

    let score = history.iter().filter(|entry| entry.is_correct).count();

    QuizResult {
        score,
        total: questions.len(),
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fallback_questions;

    fn answers_for(questions: &[Question], selected: &[usize]) -> Vec<AnswerRecord> {
        questions
            .iter()
            .zip(selected)
            .map(|(q, idx)| AnswerRecord::new(q.id.clone(), *idx))
            .collect()
    }

    #[test]
    fn test_all_correct() {
        let questions = fallback_questions();
        let answers = answers_for(&questions, &[2, 1, 1, 0, 1]);

        let result = compute_result(&questions, &answers);
        assert_eq!(result.score, 5);
        assert_eq!(result.total, 5);
        assert!(result.history.iter().all(|entry| entry.is_correct));
    }

    #[test]
    fn test_single_correct_answer_counts_once() {
        let questions = fallback_questions();
        // fb-2 的正确答案是 1
        let answers = vec![AnswerRecord::new("fb-2", 1)];

        let result = compute_result(&questions, &answers);
        assert_eq!(result.score, 1);
        assert!(result.history[1].is_correct);
        assert_eq!(result.history[1].selected_option(), Some("Mars"));
    }

    #[test]
    fn test_unanswered_counts_as_wrong() {
        let questions = fallback_questions();
        let answers = answers_for(&questions, &[2, 1]);

        let result = compute_result(&questions, &answers);
        assert_eq!(result.score, 2);
        assert_eq!(result.total, 5);
        for entry in &result.history[2..] {
            assert_eq!(entry.selected_option_index, None);
            assert!(!entry.is_correct);
        }
    }

    #[test]
    fn test_wrong_answers_keep_details() {
        let questions = fallback_questions();
        let answers = answers_for(&questions, &[0, 0, 0, 1, 0]);

        let result = compute_result(&questions, &answers);
        assert_eq!(result.score, 0);

        let first = &result.history[0];
        assert_eq!(first.question_id, "fb-1");
        assert_eq!(first.selected_option(), Some("London"));
        assert_eq!(first.correct_option(), "Paris");
        assert_eq!(first.explanation, questions[0].explanation);
    }

    #[test]
    fn test_is_idempotent() {
        let questions = fallback_questions();
        let answers = answers_for(&questions, &[2, 0, 1, 3, 1]);

        assert_eq!(
            compute_result(&questions, &answers),
            compute_result(&questions, &answers)
        );
    }

    #[test]
    fn test_empty_session() {
        let result = compute_result(&[], &[]);
        assert_eq!(result.score, 0);
        assert_eq!(result.total, 0);
        assert!(result.history.is_empty());
    }
}
