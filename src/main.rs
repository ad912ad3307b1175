use anyhow::Result;
use leetcode_uploader::config::{Config, DEFAULT_CONFIG_FILE};
use leetcode_uploader::{logger, App};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path =
        std::env::var("LEETCODE_UPLOADER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

    // 加载配置
    let created = Config::ensure_file(&config_path)?;
    let config = Config::load(&config_path)?;

    // 初始化日志
    logger::init_with_verbose(config.monitor.verbose);

    if created {
        warn!("⚠️ 已创建默认配置文件 {}，请填写 GitHub 设置后重新运行", config_path);
    }
    info!("配置已从 {} 加载", config_path);

    println!("=== LeetCode Uploader ===");
    println!("解题时请保持程序运行，按 Ctrl+C 退出");

    // 初始化并运行应用
    let mut app = App::initialize(config).await?;
    app.run().await?;

    Ok(())
}
