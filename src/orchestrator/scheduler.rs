//! 轮询调度器 - 编排层
//!
//! 以固定间隔调用 `SubmissionEngine::tick()`，上一轮未结束时跳过，保证不重叠

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::clients::GitHubClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::ChromiumFactory;
use crate::models::ExtensionTable;
use crate::services::RepositorySync;
use crate::workflow::{SubmissionEngine, TickOutcome};

/// 应用主结构
pub struct App {
    engine: SubmissionEngine,
    interval: Duration,
}

impl App {
    /// 初始化应用：校验配置、检查 GitHub 连接、组装引擎
    pub async fn initialize(config: Config) -> Result<Self> {
        let client = connect_repository(&config).context("初始化 GitHub 客户端失败，请检查 config.toml")?;
        if let Err(e) = client.test_connection().await {
            warn!("⚠️ GitHub 连接测试失败: {}", e);
        }

        let sync = RepositorySync::new(
            Arc::new(client),
            ExtensionTable::with_overrides(&config.extensions),
        );
        let factory = Box::new(ChromiumFactory::new(&config));
        let engine = SubmissionEngine::new(factory, sync, &config.leetcode.base_url);

        Ok(Self::with_engine(engine, config.poll_interval()))
    }

    pub fn with_engine(engine: SubmissionEngine, interval: Duration) -> Self {
        Self { engine, interval }
    }

    /// 运行直到 Ctrl+C
    pub async fn run(&mut self) -> Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("无法监听 Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;
        Ok(())
    }

    /// 运行直到 `shutdown` 完成，然后关闭浏览器
    ///
    /// 关闭信号只在两次轮询之间生效，不会打断正在进行的一轮
    pub async fn run_until<F: Future<Output = ()>>(&mut self, shutdown: F) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!("开始监控，每 {} 秒检查一次提交...", self.interval.as_secs());

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("正在停止...");
                    break;
                }
                _ = ticker.tick() => {
                    let outcome = self.engine.tick().await;
                    log_outcome(&outcome);
                }
            }
        }

        self.engine.shutdown().await;
        info!("已停止");
    }
}

/// 校验配置并创建 GitHub 客户端
fn connect_repository(config: &Config) -> AppResult<GitHubClient> {
    let target = config.validate()?;
    log_startup(config, &target.owner, &target.name);
    Ok(GitHubClient::new(config.github.token.clone(), target)?)
}

fn log_outcome(outcome: &TickOutcome) {
    match outcome {
        TickOutcome::Synced { problem, success: true } => info!("✅ 本轮同步完成: {}", problem),
        TickOutcome::Synced { problem, success: false } => warn!("❌ 本轮同步失败: {}", problem),
        other => debug!("本轮结果: {:?}", other),
    }
}

fn log_startup(config: &Config, owner: &str, name: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 LeetCode Uploader 启动");
    info!("📦 目标仓库: {}/{}", owner, name);
    if !config.leetcode.username.is_empty() {
        info!("👤 LeetCode 用户: {}", config.leetcode.username);
    }
    info!("⏱️ 轮询间隔: {} 秒", config.poll_interval().as_secs());
    info!("{}", "=".repeat(60));
}
