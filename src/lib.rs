//! # Quiz Master
//!
//! 终端版 AI 出题测验：选择主题和难度，由 LLM 生成单选题，逐题作答并即时反馈，最后汇总结果。
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - `LlmClient`，封装 OpenAI 兼容的 chat completions 调用
//!
//! ### ② 业务能力层（Services）
//! - `services/` - `QuestionService`，根据主题和难度出题
//! - 没有凭据或生成失败时返回固定的兜底题库，从不向上抛错
//!
//! ### ③ 流程层（Workflow）
//! - `QuizSession` - 状态机（Start → Loading → Playing → Finished）
//! - `compute_result` - 计分（纯函数）
//! - `QuestionCard` - 单题的选择/提交状态，题目变化时清空
//!
//! ### ④ 编排层（Orchestration）
//! - `QuizRunner` - 持有会话和唯一的在途出题任务
//! - `App` - 终端交互
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError, GenerationError, SessionError};
pub use models::{AnswerRecord, Difficulty, HistoryEntry, Question, QuizResult};
pub use orchestrator::{App, QuizRunner};
pub use services::{QuestionService, QuestionSource};
pub use workflow::{compute_result, AnswerOutcome, LoadTicket, Phase, QuestionCard, QuizSession};
