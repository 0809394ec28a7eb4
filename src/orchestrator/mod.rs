//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `quiz_runner` - 会话驱动器
//! - 持有 `QuizSession` 状态机
//! - 在 tokio 任务中调用出题服务，同一时刻只有一个在途请求
//! - 重置时中止在途请求，过期结果被丢弃
//!
//! ### `app` - 终端应用
//! - 按阶段渲染画面、读取输入
//! - 只调用当前阶段唯一合法的操作
//!
//! ### `screens` - 画面渲染
//! - 纯文本排版，不修改状态
//!
//! ## 层次关系
//!
//! ```text
//! app (终端输入输出)
//!     ↓
//! quiz_runner (会话 + 在途出题任务)
//!     ↓
//! workflow (状态机 / 计分 / 单题交互状态)
//!     ↓
//! services (出题能力) → clients (LLM API)
//! ```

pub mod app;
pub mod quiz_runner;
pub mod screens;

pub use app::App;
pub use quiz_runner::QuizRunner;
