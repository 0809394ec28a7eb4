use anyhow::{Context, Result};
use quiz_master::utils::logging;
use quiz_master::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env_or_file().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).run().await.context("测验运行失败")?;

    Ok(())
}
