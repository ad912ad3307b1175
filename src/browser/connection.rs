use anyhow::{Context, Result};
use chromiumoxide::{Browser, Page};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

use super::spawn_handler;

/// 连接到已运行的浏览器（远程调试端口），优先复用地址包含 `site_host` 的标签页
pub async fn connect_to_browser_and_page(
    port: u16,
    site_host: &str,
    start_url: &str,
) -> Result<(Browser, Page, JoinHandle<()>)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        e
    })?;
    let handle = spawn_handler(handler);
    debug!("浏览器连接成功");

    // 等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let pages = browser.pages().await.context("获取页面列表失败")?;
    debug!("获取到 {} 个页面", pages.len());

    for p in pages.iter() {
        if let Ok(Some(url)) = p.url().await {
            if url.contains(site_host) {
                info!("✓ 复用已打开的页面: {}", url);
                return Ok((browser, p.clone(), handle));
            }
        }
    }

    debug!("未找到目标站点的页面，将创建新页面");
    let page = browser
        .new_page(start_url)
        .await
        .with_context(|| format!("创建页面失败: {}", start_url))?;
    info!("已导航到: {}", start_url);

    Ok((browser, page, handle))
}
