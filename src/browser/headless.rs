use anyhow::{anyhow, Result};
use chromiumoxide::{Browser, BrowserConfig, Page};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

use super::spawn_handler;
use crate::config::BrowserConfig as BrowserSettings;

/// 启动本地浏览器并打开 `url`
pub async fn launch_browser(
    settings: &BrowserSettings,
    url: &str,
) -> Result<(Browser, Page, JoinHandle<()>)> {
    info!("🚀 启动浏览器 (headless: {})...", settings.headless);

    let mut builder = BrowserConfig::builder();
    builder = if settings.headless {
        builder.new_headless_mode()
    } else {
        info!("浏览器以可见模式运行");
        builder.with_head()
    };
    if let Some(exe) = &settings.chrome_executable {
        builder = builder.chrome_executable(exe);
    }

    let config = builder
        .window_size(1920, 1080)
        .args(vec![
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--disable-gpu",
        ])
        .build()
        .map_err(|e| {
            error!("配置浏览器失败: {}", e);
            anyhow!("配置浏览器失败: {}", e)
        })?;

    let (browser, handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        anyhow!("启动浏览器失败: {}", e)
    })?;
    let handle = spawn_handler(handler);
    debug!("浏览器启动成功");

    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page(url).await.map_err(|e| {
        error!("创建页面失败: {}", e);
        anyhow!("创建页面失败: {}", e)
    })?;

    info!("✅ 浏览器已导航到: {}", url);
    Ok((browser, page, handle))
}
