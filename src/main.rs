use anyhow::Result;
use order_extract_client::utils::logging;
use order_extract_client::{App, Config};

/// 默认配置文件
const CONFIG_FILE: &str = "order_client.toml";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load(CONFIG_FILE)?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).run().await?;

    Ok(())
}
