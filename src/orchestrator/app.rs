//! 终端应用 - 编排层入口
//!
//! 每个阶段只提供该阶段唯一合法的操作：
//! Start 选择主题和难度，Loading 等待出题，Playing 选择/提交/下一题，Finished 查看结果并重新开始。

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppResult, SessionError};
use crate::orchestrator::quiz_runner::QuizRunner;
use crate::orchestrator::screens;
use crate::services::{QuestionService, QuestionSource};
use crate::utils::logging::{log_quiz_result, log_startup};
use crate::workflow::{Phase, QuestionCard};

/// 单题交互的结果
enum Step {
    Continue,
    Quit,
}

/// 应用主结构
pub struct App<S: QuestionSource + 'static> {
    runner: QuizRunner<S>,
    card: QuestionCard,
}

impl App<QuestionService> {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        log_startup(&config);
        Self::with_source(QuestionService::new(&config))
    }

    /// 使用标准输入输出运行
    pub async fn run(mut self) -> AppResult<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run_with(stdin, stdout).await
    }
}

impl<S: QuestionSource + 'static> App<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            runner: QuizRunner::new(source),
            card: QuestionCard::new(),
        }
    }

    pub fn runner(&self) -> &QuizRunner<S> {
        &self.runner
    }

    /// 主循环，输入结束（EOF）或用户退出时返回
    pub async fn run_with<R, W>(&mut self, reader: R, mut writer: W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        loop {
            let phase = self.runner.session().phase();
            let step = match phase {
                Phase::Start => self.start_screen(&mut lines, &mut writer).await?,
                Phase::Loading(_) => self.loading_screen(&mut writer).await?,
                Phase::Playing if self.runner.session().has_load_error() => {
                    self.load_error_screen(&mut lines, &mut writer).await?
                }
                Phase::Playing => self.question_screen(&mut lines, &mut writer).await?,
                Phase::Finished => self.results_screen(&mut lines, &mut writer).await?,
            };

            if let Step::Quit = step {
                writer.write_all(b"\nGoodbye!\n").await?;
                writer.flush().await?;
                return Ok(());
            }
        }
    }

    /// 回到开始页：会话和单题状态一起清空
    fn restart_round(&mut self) {
        self.runner.restart();
        self.card.reset();
    }

    async fn start_screen<R, W>(
        &mut self,
        lines: &mut Lines<R>,
        writer: &mut W,
    ) -> AppResult<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        write_text(writer, &screens::render_start_screen()).await?;

        let topic_prompt = "Topic [1-6 or type your own, Enter = General Knowledge]: ";
        let Some(input) = prompt(lines, writer, topic_prompt).await? else {
            return Ok(Step::Quit);
        };
        let topic = screens::parse_topic(&input);

        let difficulty = loop {
            let difficulty_prompt = "Difficulty [easy/medium/hard, Enter = medium]: ";
            let Some(input) = prompt(lines, writer, difficulty_prompt).await? else {
                return Ok(Step::Quit);
            };
            match screens::parse_difficulty(&input) {
                Some(difficulty) => break difficulty,
                None => write_text(writer, "Please choose easy, medium or hard.\n").await?,
            }
        };

        self.runner.start(topic, difficulty)?;
        Ok(Step::Continue)
    }

    async fn loading_screen<W>(&mut self, writer: &mut W) -> AppResult<Step>
    where
        W: AsyncWrite + Unpin,
    {
        write_text(writer, &screens::render_loading(self.runner.session().topic())).await?;

        match self.runner.finish_loading().await {
            Ok(()) => {}
            Err(SessionError::StaleLoad { ticket }) => {
                warn!("忽略过期的出题结果 (票据 {})", ticket);
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Step::Continue)
    }

    async fn load_error_screen<R, W>(
        &mut self,
        lines: &mut Lines<R>,
        writer: &mut W,
    ) -> AppResult<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        write_text(writer, &screens::render_load_error()).await?;
        match prompt(lines, writer, "[Enter] Return to Start: ").await? {
            Some(_) => {
                self.restart_round();
                Ok(Step::Continue)
            }
            None => Ok(Step::Quit),
        }
    }

    /// 一道题的完整交互：选择 → 提交 → 反馈 → 下一题
    async fn question_screen<R, W>(
        &mut self,
        lines: &mut Lines<R>,
        writer: &mut W,
    ) -> AppResult<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let session = self.runner.session();
        let Some(question) = session.current_question().cloned() else {
            return Ok(Step::Continue);
        };
        let (index, total) = (session.current_index(), session.total());

        self.card.sync(&question);
        let screen = screens::render_question(&question, &self.card, index, total);
        write_text(writer, &screen).await?;

        while !self.card.is_submitted() {
            let choice_prompt = "Choose 1-4 or A-D, 's' to submit, 'q' to quit: ";
            let Some(input) = prompt(lines, writer, choice_prompt).await? else {
                return Ok(Step::Quit);
            };
            let input = input.trim();

            if input.eq_ignore_ascii_case("q") {
                return Ok(Step::Quit);
            }
            if input.eq_ignore_ascii_case("s") {
                if !self.card.submit() {
                    write_text(writer, "Select an option first.\n").await?;
                }
                continue;
            }
            match screens::parse_option(input) {
                Some(choice) => {
                    self.card.select(choice);
                    write_text(writer, &screens::render_options(&question, &self.card)).await?;
                }
                None => write_text(writer, "Unknown choice.\n").await?,
            }
        }

        let feedback = screens::render_feedback(&question, &self.card, index, total);
        write_text(writer, &feedback).await?;
        if prompt(lines, writer, "").await?.is_none() {
            return Ok(Step::Quit);
        }

        if let Some(choice) = self.card.confirm() {
            self.runner.record_answer(choice)?;
        }
        Ok(Step::Continue)
    }

    async fn results_screen<R, W>(
        &mut self,
        lines: &mut Lines<R>,
        writer: &mut W,
    ) -> AppResult<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if let Some(result) = self.runner.result() {
            log_quiz_result(self.runner.session().topic(), &result);
            write_text(writer, &screens::render_results(&result)).await?;
        }

        loop {
            let Some(input) = prompt(lines, writer, "\n[p] Play Again  [q] Quit: ").await? else {
                return Ok(Step::Quit);
            };
            match input.trim().to_ascii_lowercase().as_str() {
                "p" | "" => {
                    info!("🔄 重新开始");
                    self.restart_round();
                    return Ok(Step::Continue);
                }
                "q" => return Ok(Step::Quit),
                _ => continue,
            }
        }
    }
}

async fn write_text<W>(writer: &mut W, text: &str) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(text.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// 输出提示并读取一行；EOF 时返回 None
async fn prompt<R, W>(
    lines: &mut Lines<R>,
    writer: &mut W,
    text: &str,
) -> AppResult<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_text(writer, text).await?;
    Ok(lines.next_line().await?)
}
