/// 日志工具模块
///
/// 初始化 tracing 订阅者，并提供启动/退出时的横幅输出
use crate::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；未设置时默认 info，详细模式下为 debug
///
/// # 参数
/// - `verbose`: 是否输出详细日志
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 程序配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 订单提取客户端启动 - {}", now());
    info!("🌐 提取服务: {}", config.api_base_url);
    info!("📁 下载目录: {}", config.download_dir);
    info!("{}", "=".repeat(60));
}

/// 记录会话结束信息
///
/// # 参数
/// - `submissions`: 提交次数
/// - `succeeded`: 成功次数
/// - `exports`: 导出次数
pub fn log_session_summary(submissions: usize, succeeded: usize, exports: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 会话结束 - {}", now());
    info!("{}", "=".repeat(60));
    info!("📤 提交: {} 次 (成功 {})", submissions, succeeded);
    info!("📥 导出: {} 次", exports);
    info!("{}", "=".repeat(60));
}

fn now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
