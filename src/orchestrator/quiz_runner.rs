//! 会话驱动器 - 编排层
//!
//! 持有会话状态机和唯一的在途出题任务。
//! 出题在 tokio 任务中执行；重置时中止任务并作废票据，迟到的结果不会复活旧会话。

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::SessionError;
use crate::models::{Difficulty, Question, QuizResult};
use crate::services::QuestionSource;
use crate::workflow::{AnswerOutcome, LoadTicket, QuizSession};

/// 在途的出题请求
struct PendingLoad {
    ticket: LoadTicket,
    handle: JoinHandle<Vec<Question>>,
}

pub struct QuizRunner<S: QuestionSource + 'static> {
    source: Arc<S>,
    session: QuizSession,
    pending: Option<PendingLoad>,
}

impl<S: QuestionSource + 'static> QuizRunner<S> {
    pub fn new(source: S) -> Self {
        Self::with_shared(Arc::new(source))
    }

    pub fn with_shared(source: Arc<S>) -> Self {
        Self {
            source,
            session: QuizSession::new(),
            pending: None,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// 是否有出题任务在途
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// 开始一轮并在后台出题
    pub fn start(
        &mut self,
        topic: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<LoadTicket, SessionError> {
        let ticket = self.session.start(topic, difficulty)?;

        let source = Arc::clone(&self.source);
        let topic = self.session.topic().to_string();
        let handle = tokio::spawn(async move { source.generate(&topic, difficulty).await });

        self.pending = Some(PendingLoad { ticket, handle });
        Ok(ticket)
    }

    /// 等待在途出题完成并进入答题阶段
    ///
    /// 任务异常结束时以空题目列表进入 Playing，由会话的空列表兜底处理
    pub async fn finish_loading(&mut self) -> Result<(), SessionError> {
        let Some(PendingLoad { ticket, handle }) = self.pending.take() else {
            return Err(SessionError::InvalidTransition {
                phase: self.session.phase(),
                action: "finish_loading",
            });
        };

        let questions = match handle.await {
            Ok(questions) => questions,
            Err(e) => {
                error!("❌ 出题任务异常结束 (票据 {}): {}", ticket, e);
                Vec::new()
            }
        };

        self.deliver(ticket, questions)
    }

    /// 把某张票据的出题结果交给会话；票据过期时丢弃
    pub fn deliver(
        &mut self,
        ticket: LoadTicket,
        questions: Vec<Question>,
    ) -> Result<(), SessionError> {
        self.session.complete_loading(ticket, questions)
    }

    pub fn record_answer(
        &mut self,
        selected_option_index: usize,
    ) -> Result<AnswerOutcome, SessionError> {
        self.session.record_answer(selected_option_index)
    }

    pub fn result(&self) -> Option<QuizResult> {
        self.session.result()
    }

    /// 回到开始页，中止在途出题
    pub fn restart(&mut self) {
        if let Some(pending) = self.pending.take() {
            info!("中止在途出题任务 (票据 {})", pending.ticket);
            pending.handle.abort();
        }
        self.session.restart();
    }
}

impl<S: QuestionSource + 'static> Drop for QuizRunner<S> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fallback_questions;
    use crate::workflow::Phase;
    use std::time::Duration;

    /// 固定延迟后返回兜底题库
    struct SlowSource {
        delay: Duration,
    }

    impl QuestionSource for SlowSource {
        async fn generate(&self, _topic: &str, _difficulty: Difficulty) -> Vec<Question> {
            tokio::time::sleep(self.delay).await;
            fallback_questions()
        }
    }

    /// 总是 panic 的来源，模拟任务异常
    struct PanickingSource;

    impl QuestionSource for PanickingSource {
        async fn generate(&self, _topic: &str, _difficulty: Difficulty) -> Vec<Question> {
            panic!("boom")
        }
    }

    fn slow_runner() -> QuizRunner<SlowSource> {
        QuizRunner::new(SlowSource {
            delay: Duration::from_millis(500),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_then_finish_loading() {
        let mut runner = slow_runner();
        let ticket = runner.start("Science", Difficulty::Medium).unwrap();
        assert_eq!(runner.session().phase(), Phase::Loading(ticket));
        assert!(runner.is_loading());

        runner.finish_loading().await.unwrap();
        assert!(!runner.is_loading());
        assert_eq!(runner.session().phase(), Phase::Playing);
        assert_eq!(runner.session().total(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_rejected_while_loading() {
        let mut runner = slow_runner();
        runner.start("Science", Difficulty::Medium).unwrap();
        assert!(runner.start("History", Difficulty::Easy).is_err());
        assert_eq!(runner.session().topic(), "Science");
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_aborts_pending_load() {
        let mut runner = slow_runner();
        let old = runner.start("Science", Difficulty::Medium).unwrap();
        runner.restart();

        assert!(!runner.is_loading());
        assert_eq!(runner.session().phase(), Phase::Start);
        assert!(runner.finish_loading().await.is_err());

        // 旧票据的结果到达时被丢弃
        assert_eq!(
            runner.deliver(old, fallback_questions()),
            Err(SessionError::StaleLoad { ticket: old })
        );
        assert_eq!(runner.session().phase(), Phase::Start);
        assert!(runner.session().questions().is_empty());
    }

    #[tokio::test]
    async fn test_panicking_source_lands_on_empty_list() {
        let mut runner = QuizRunner::new(PanickingSource);
        runner.start("Anything", Difficulty::Hard).unwrap();
        runner.finish_loading().await.unwrap();

        assert_eq!(runner.session().phase(), Phase::Playing);
        assert!(runner.session().has_load_error());

        runner.restart();
        assert_eq!(runner.session().phase(), Phase::Start);
    }
}
