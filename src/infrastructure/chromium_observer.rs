//! 基于 chromiumoxide 的页面观察者
//!
//! 持有唯一的 Browser / Page 资源，查询通过在页面中执行 XPath 完成

use async_trait::async_trait;
use chromiumoxide::{Browser, Page};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::browser;
use crate::config::Config;
use crate::error::ObserverError;
use crate::infrastructure::page_observer::{ObservedElement, ObserverFactory, PageObserver};

pub struct ChromiumObserver {
    page: Page,
    browser: Mutex<Option<Browser>>,
    handler: JoinHandle<()>,
    /// 自己启动的浏览器在关闭时退出，连接的外部浏览器保持运行
    owns_browser: bool,
}

impl ChromiumObserver {
    pub fn new(browser: Browser, page: Page, handler: JoinHandle<()>, owns_browser: bool) -> Self {
        Self {
            page,
            browser: Mutex::new(Some(browser)),
            handler,
            owns_browser,
        }
    }

    /// 执行 JS 并反序列化结果
    async fn eval_as<T: serde::de::DeserializeOwned>(&self, js_code: String) -> Result<T, ObserverError> {
        let result = self
            .page
            .evaluate(js_code)
            .await
            .map_err(|e| ObserverError::Script(e.to_string()))?;
        result
            .into_value::<T>()
            .map_err(|e| ObserverError::Script(e.to_string()))
    }
}

/// 生成按 XPath 快照收集元素文本和属性的脚本
fn build_query_script(selector: &str) -> Result<String, serde_json::Error> {
    Ok(format!(
        r#"
        (() => {{
            const snapshot = document.evaluate({}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);
            const out = [];
            for (let i = 0; i < snapshot.snapshotLength; i++) {{
                const el = snapshot.snapshotItem(i);
                const attributes = {{}};
                if (el.attributes) {{
                    for (const a of el.attributes) attributes[a.name] = a.value;
                }}
                if (typeof el.value === "string") attributes["value"] = el.value;
                out.push({{ text: el.innerText || el.textContent || "", attributes }});
            }}
            return out;
        }})()
        "#,
        serde_json::to_string(selector)?
    ))
}

#[async_trait]
impl PageObserver for ChromiumObserver {
    async fn current_location(&self) -> Result<String, ObserverError> {
        self.page
            .url()
            .await
            .map(|url| url.unwrap_or_default())
            .map_err(|e| ObserverError::SessionDead(e.to_string()))
    }

    async fn page_title(&self) -> Result<String, ObserverError> {
        self.page
            .get_title()
            .await
            .map(|title| title.unwrap_or_default())
            .map_err(|e| ObserverError::Script(e.to_string()))
    }

    async fn query(&self, selector: &str) -> Result<Vec<ObservedElement>, ObserverError> {
        let script = build_query_script(selector).map_err(|e| ObserverError::Query {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;

        let elements: Option<Vec<ObservedElement>> =
            self.eval_as(script).await.map_err(|e| ObserverError::Query {
                selector: selector.to_string(),
                message: e.to_string(),
            })?;

        Ok(elements.unwrap_or_default())
    }

    async fn navigate(&self, location: &str) -> Result<(), ObserverError> {
        debug!("导航到: {}", location);
        self.page
            .goto(location)
            .await
            .map(|_| ())
            .map_err(|e| ObserverError::Navigation {
                url: location.to_string(),
                message: e.to_string(),
            })
    }

    async fn close(&self) {
        let mut guard = self.browser.lock().await;
        if let Some(mut browser) = guard.take() {
            if self.owns_browser {
                if let Err(e) = browser.close().await {
                    warn!("关闭浏览器失败: {}", e);
                }
                if let Err(e) = browser.wait().await {
                    warn!("等待浏览器进程退出失败: {}", e);
                }
            }
            info!("浏览器会话已结束");
        }
        self.handler.abort();
    }
}

/// 按配置启动或连接浏览器
pub struct ChromiumFactory {
    config: Config,
}

impl ChromiumFactory {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait]
impl ObserverFactory for ChromiumFactory {
    async fn create(&self) -> anyhow::Result<Box<dyn PageObserver>> {
        let base_url = &self.config.leetcode.base_url;

        let observer = match self.config.browser.debug_port {
            Some(port) => {
                let host = site_host(base_url);
                let (browser, page, handler) =
                    browser::connect_to_browser_and_page(port, host, base_url).await?;
                ChromiumObserver::new(browser, page, handler, false)
            }
            None => {
                let (browser, page, handler) =
                    browser::launch_browser(&self.config.browser, base_url).await?;
                ChromiumObserver::new(browser, page, handler, true)
            }
        };

        Ok(Box::new(observer))
    }
}

/// 从站点地址中取出主机名，如 `https://leetcode.com/` → `leetcode.com`
pub fn site_host(base_url: &str) -> &str {
    let without_scheme = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    without_scheme.split('/').next().unwrap_or(without_scheme)
}
