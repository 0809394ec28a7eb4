//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数。日志写到 stderr，不与 stdout 上的题目混在一起。

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::QuizResult;

/// 初始化日志
///
/// 设置了 `RUST_LOG` 时以其为准；否则默认 warn，详细模式为 debug。可重复调用。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 测验模式");
    info!("🤖 模型: {}", config.llm_model_name);
    info!(
        "🔑 凭据: {}",
        if config.has_credential() { "已配置" } else { "未配置（兜底题库）" }
    );
    info!("📊 每轮题目数: {}", config.question_count);
    info!("{}", "=".repeat(60));
}

/// 记录一轮测验的结果
pub fn log_quiz_result(topic: &str, result: &QuizResult) {
    info!("\n{}", "─".repeat(60));
    info!("📊 测验完成: 主题 \"{}\"", truncate_text(topic, 40));
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!(
        "✅ 得分: {}/{} ({}%)",
        result.score,
        result.total,
        result.percentage()
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
