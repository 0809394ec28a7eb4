use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// 每道题固定的选项数量
pub const OPTION_COUNT: usize = 4;

/// 单选题
///
/// 由出题服务创建，之后不再修改；重新开始时整体丢弃
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: [String; OPTION_COUNT],
    /// 正确选项下标，始终小于 `OPTION_COUNT`
    pub correct_answer_index: usize,
    pub explanation: String,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        options: [&str; OPTION_COUNT],
        correct_answer_index: usize,
        explanation: impl Into<String>,
    ) -> Self {
        debug_assert!(correct_answer_index < OPTION_COUNT);
        Self {
            id: id.into(),
            text: text.into(),
            options: options.map(str::to_string),
            correct_answer_index,
            explanation: explanation.into(),
        }
    }

    /// 指定下标的选项文本，越界返回 None
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer_index]
    }

    pub fn is_correct(&self, selected: Option<usize>) -> bool {
        selected == Some(self.correct_answer_index)
    }
}

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    /// 接受名称（大小写不敏感）或 1-3 的序号
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "medium" | "2" => Ok(Difficulty::Medium),
            "hard" | "3" => Ok(Difficulty::Hard),
            other => Err(format!("未知难度: {}", other)),
        }
    }
}

/// 作答记录
///
/// 用户确认选择时创建，每道题恰好一条，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: String,
    pub selected_option_index: usize,
}

impl AnswerRecord {
    pub fn new(question_id: impl Into<String>, selected_option_index: usize) -> Self {
        Self {
            question_id: question_id.into(),
            selected_option_index,
        }
    }
}

/// LLM 返回的原始题目（没有 id）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer_index: i64,
    pub explanation: String,
}

impl RawQuestion {
    /// 校验并补上 id，`position` 用于错误信息
    pub fn into_question(self, id: String, position: usize) -> Result<Question, GenerationError> {
        let options: [String; OPTION_COUNT] = self.options.try_into().map_err(|opts: Vec<String>| {
            GenerationError::invalid_question(
                position,
                format!("需要 {} 个选项，实际 {} 个", OPTION_COUNT, opts.len()),
            )
        })?;

        let correct_answer_index = usize::try_from(self.correct_answer_index)
            .ok()
            .filter(|idx| *idx < OPTION_COUNT)
            .ok_or_else(|| {
                GenerationError::invalid_question(
                    position,
                    format!("正确答案下标 {} 超出范围 [0, {}]", self.correct_answer_index, OPTION_COUNT - 1),
                )
            })?;

        Ok(Question {
            id,
            text: self.text,
            options,
            correct_answer_index,
            explanation: self.explanation,
        })
    }
}
