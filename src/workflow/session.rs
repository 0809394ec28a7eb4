//! 答题会话状态机
//!
//! ```text
//! Start --start--> Loading(ticket) --complete_loading(ticket)--> Playing --最后一题作答--> Finished
//!   ^                                                                                          |
//!   +------------------------------------------- restart --------------------------------------+
//! ```
//!
//! Loading 阶段持有唯一的加载票据，重置后旧票据的加载结果会被丢弃。

use std::fmt;

use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::models::{AnswerRecord, Difficulty, Question, QuizResult};
use crate::utils::logging::truncate_text;
use crate::workflow::scoring::compute_result;

/// 加载票据，标识一次出题请求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Loading(LoadTicket),
    Playing,
    Finished,
}

/// 作答后的去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// 进入下一题
    Advanced { next_index: usize },
    /// 最后一题已作答
    Finished,
}

/// 答题会话
#[derive(Debug, Clone)]
pub struct QuizSession {
    phase: Phase,
    topic: String,
    difficulty: Difficulty,
    questions: Vec<Question>,
    current_index: usize,
    answers: Vec<AnswerRecord>,
    /// 跨重置单调递增，保证旧票据不会与新请求相同
    next_ticket: u64,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Start,
            topic: String::new(),
            difficulty: Difficulty::default(),
            questions: Vec::new(),
            current_index: 0,
            answers: Vec::new(),
            next_ticket: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Loading 阶段当前有效的票据
    pub fn pending_ticket(&self) -> Option<LoadTicket> {
        match self.phase {
            Phase::Loading(ticket) => Some(ticket),
            _ => None,
        }
    }

    /// 开始新一轮：Start -> Loading
    pub fn start(
        &mut self,
        topic: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<LoadTicket, SessionError> {
        if self.phase != Phase::Start {
            return Err(self.invalid("start"));
        }

        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;

        self.topic = topic.into();
        self.difficulty = difficulty;
        self.phase = Phase::Loading(ticket);

        info!(
            "📝 开始出题: 主题 \"{}\"，难度 {}，票据 {}",
            truncate_text(&self.topic, 40),
            difficulty,
            ticket
        );
        Ok(ticket)
    }

    /// 加载完成：Loading -> Playing
    ///
    /// 票据必须是当前 Loading 阶段持有的那一张，否则结果被丢弃。
    /// 空题目列表同样进入 Playing，由 `has_load_error` 暴露给展示层。
    pub fn complete_loading(
        &mut self,
        ticket: LoadTicket,
        questions: Vec<Question>,
    ) -> Result<(), SessionError> {
        if self.phase != Phase::Loading(ticket) {
            warn!("⚠️ 丢弃过期的加载结果: 票据 {}，当前阶段 {:?}", ticket, self.phase);
            return Err(SessionError::StaleLoad { ticket });
        }

        debug!("票据 {} 加载完成，共 {} 道题", ticket, questions.len());

        self.questions = questions;
        self.current_index = 0;
        self.answers.clear();
        self.phase = Phase::Playing;
        Ok(())
    }

    /// Playing 阶段题目为空，只能返回开始页
    pub fn has_load_error(&self) -> bool {
        self.phase == Phase::Playing && self.questions.is_empty()
    }

    /// 当前题目，仅在 Playing 且下标有效时存在
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Playing => self.questions.get(self.current_index),
            _ => None,
        }
    }

    /// 记录当前题目的作答并推进
    ///
    /// 不校验选项下标范围，只会由已渲染的选项触发
    pub fn record_answer(
        &mut self,
        selected_option_index: usize,
    ) -> Result<AnswerOutcome, SessionError> {
        if self.phase != Phase::Playing {
            return Err(self.invalid("record_answer"));
        }

        let question_id = self
            .questions
            .get(self.current_index)
            .map(|q| q.id.clone())
            .ok_or(SessionError::EmptyQuestionList)?;

        debug!(
            "作答: 第 {}/{} 题 ({}) 选择 {}",
            self.current_index + 1,
            self.questions.len(),
            question_id,
            selected_option_index
        );
        self.answers
            .push(AnswerRecord::new(question_id, selected_option_index));

        if self.current_index + 1 == self.questions.len() {
            self.phase = Phase::Finished;
            info!("🏁 全部 {} 道题作答完毕", self.questions.len());
            Ok(AnswerOutcome::Finished)
        } else {
            self.current_index += 1;
            Ok(AnswerOutcome::Advanced {
                next_index: self.current_index,
            })
        }
    }

    /// 结果，仅在 Finished 阶段可用；可重复计算
    pub fn result(&self) -> Option<QuizResult> {
        match self.phase {
            Phase::Finished => Some(compute_result(&self.questions, &self.answers)),
            _ => None,
        }
    }

    /// 回到 Start，清空主题、题目、下标和作答；任何在途加载随之失效
    pub fn restart(&mut self) {
        if let Phase::Loading(ticket) = self.phase {
            debug!("重置会话，作废票据 {}", ticket);
        }
        *self = Self {
            next_ticket: self.next_ticket,
            ..Self::new()
        };
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            phase: self.phase,
            action,
        }
    }
}
