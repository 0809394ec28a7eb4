//! 出题服务 - 业务能力层
//!
//! 只负责"根据主题和难度产出题目"，不关心答题流程。
//!
//! 对外契约：`generate` 永远返回非空题目列表。没有凭据时模拟网络延迟后返回兜底题库，
//! 生成或解析失败时立即返回兜底题库，调用方不会看到错误。

use std::future::Future;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::clients::LlmClient;
use crate::config::Config;
use crate::error::GenerationError;
use crate::models::{fallback_questions, Difficulty, Question, RawQuestion};
use crate::utils::logging::truncate_text;

const SYSTEM_MESSAGE: &str = "You are a quiz master. Create engaging, accurate questions. \
                              Ensure all options are plausible. \
                              Respond with JSON only, without any surrounding prose.";

/// 题目来源
///
/// 实现方必须自行吸收所有失败，最终总是给出题目列表
pub trait QuestionSource: Send + Sync {
    fn generate(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> impl Future<Output = Vec<Question>> + Send;
}

/// 出题服务
pub struct QuestionService {
    llm_client: Option<LlmClient>,
    question_count: usize,
    fallback_delay: Duration,
}

impl QuestionService {
    /// 根据配置创建，凭据缺失时进入兜底模式
    pub fn new(config: &Config) -> Self {
        Self {
            llm_client: LlmClient::from_config(config),
            question_count: config.question_count,
            fallback_delay: Duration::from_millis(config.fallback_delay_ms),
        }
    }

    /// 是否会尝试调用 LLM
    pub fn is_live(&self) -> bool {
        self.llm_client.is_some()
    }

    /// 调用 LLM 生成题目，任何失败都以错误返回
    pub async fn try_generate(
        &self,
        client: &LlmClient,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<Question>, GenerationError> {
        let user_message = build_prompt(topic, difficulty, self.question_count);

        info!(
            "🤖 正在生成题目: 主题 \"{}\"，难度 {}，模型 {}",
            truncate_text(topic, 40),
            difficulty,
            client.model_name()
        );

        let response = client.chat(&user_message, Some(SYSTEM_MESSAGE)).await?;
        debug!("LLM 响应预览: {}", truncate_text(&response, 120));

        let generated_at = chrono::Utc::now().timestamp_millis();
        let questions = parse_questions(&response, generated_at)?;

        info!("✓ 成功生成 {} 道题目", questions.len());
        Ok(questions)
    }
}

impl QuestionSource for QuestionService {
    async fn generate(&self, topic: &str, difficulty: Difficulty) -> Vec<Question> {
        let Some(client) = &self.llm_client else {
            warn!("⚠️ 未配置 API_KEY，使用兜底题库");
            tokio::time::sleep(self.fallback_delay).await;
            return fallback_questions();
        };

        or_fallback(self.try_generate(client, topic, difficulty).await)
    }
}

/// 生成失败时降级为兜底题库
fn or_fallback(result: Result<Vec<Question>, GenerationError>) -> Vec<Question> {
    match result {
        Ok(questions) => questions,
        Err(e) => {
            error!("❌ 生成题目失败，使用兜底题库: {}", e);
            fallback_questions()
        }
    }
}

/// 构建出题提示词
pub fn build_prompt(topic: &str, difficulty: Difficulty, count: usize) -> String {
    format!(
        r#"Generate {count} multiple-choice quiz questions about "{topic}" at a {difficulty} difficulty level.

Return a JSON array. Each element must be an object with exactly these fields:
- "text": the question text
- "options": an array of exactly 4 possible answers
- "correctAnswerIndex": the zero-based index of the correct answer in the options array (0-3)
- "explanation": a short explanation of why the answer is correct"#
    )
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPayload {
    List(Vec<RawQuestion>),
    Wrapped { questions: Vec<RawQuestion> },
}

/// 解析 LLM 响应为题目列表
///
/// 容忍 Markdown 代码块包裹，也接受 `{"questions": [...]}` 形式。
/// id 形如 `gen-{generated_at}-{序号}`。
pub fn parse_questions(
    response: &str,
    generated_at: i64,
) -> Result<Vec<Question>, GenerationError> {
    let json_text = strip_code_fence(response);

    let raw = match serde_json::from_str::<RawPayload>(json_text)? {
        RawPayload::List(list) => list,
        RawPayload::Wrapped { questions } => questions,
    };

    if raw.is_empty() {
        return Err(GenerationError::NoQuestions);
    }

    raw.into_iter()
        .enumerate()
        .map(|(index, q)| q.into_question(format!("gen-{}-{}", generated_at, index), index))
        .collect()
}

fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    if let Ok(re) = Regex::new(r"(?s)^```[a-zA-Z]*\s*(.*?)\s*```$") {
        if let Some(inner) = re.captures(text).and_then(|cap| cap.get(1)) {
            return inner.as_str();
        }
    }
    text
}
