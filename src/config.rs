//! 程序配置
//!
//! 从 `config.toml` 读取，文件不存在时写入默认模板；环境变量可覆盖文件中的值

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

const DEFAULT_TEMPLATE: &str = r#"# GitHub 配置
[github]
token = "your_github_personal_access_token_here"
repo = "https://github.com/yourusername/yourrepo"

# LeetCode 配置（可选）
[leetcode]
username = ""
base_url = "https://leetcode.com"

# 轮询设置
[monitor]
interval_seconds = 3
verbose = false

# 浏览器设置
[browser]
headless = true
# debug_port = 9222
# chrome_executable = "/usr/bin/google-chrome"

# 语言扩展名覆盖（可选）
[extensions]
# python = "py"
"#;

/// 程序配置文件
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GithubConfig,
    pub leetcode: LeetcodeConfig,
    pub monitor: MonitorConfig,
    pub browser: BrowserConfig,
    /// 语言 → 扩展名，优先于内置表
    pub extensions: HashMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub token: String,
    /// 仓库地址，如 https://github.com/owner/name
    pub repo: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LeetcodeConfig {
    pub username: String,
    pub base_url: String,
}

impl Default for LeetcodeConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            base_url: "https://leetcode.com".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// 轮询间隔（秒）
    pub interval_seconds: u64,
    /// 是否显示详细日志
    pub verbose: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3,
            verbose: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub headless: bool,
    /// 设置后连接到已运行的浏览器，而不是启动新的
    pub debug_port: Option<u16>,
    pub chrome_executable: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            debug_port: None,
            chrome_executable: None,
        }
    }
}

/// 目标仓库
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoTarget {
    pub owner: String,
    pub name: String,
}

impl Config {
    /// 配置文件不存在时写入默认模板，返回是否新建
    pub fn ensure_file(path: impl AsRef<Path>) -> Result<bool, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, DEFAULT_TEMPLATE).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })?;
        Ok(true)
    }

    /// 读取并解析配置文件，再用环境变量覆盖
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        let mut config = Self::from_toml_str(&content)
            .map_err(|source| ConfigError::Parse { path: display, source })?;
        config.apply_env();
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用环境变量覆盖配置
    pub fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("GITHUB_TOKEN") {
            self.github.token = v;
        }
        if let Ok(v) = std::env::var("GITHUB_REPO") {
            self.github.repo = v;
        }
        if let Ok(v) = std::env::var("LEETCODE_USERNAME") {
            self.leetcode.username = v;
        }
        self.monitor.interval_seconds = std::env::var("MONITOR_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.monitor.interval_seconds);
        self.browser.headless = std::env::var("BROWSER_HEADLESS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.browser.headless);
        if let Some(port) = std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()) {
            self.browser.debug_port = Some(port);
        }
    }

    /// 校验配置，返回解析出的目标仓库
    pub fn validate(&self) -> Result<RepoTarget, ConfigError> {
        if self.github.token.trim().is_empty() {
            return Err(ConfigError::MissingField("github.token"));
        }
        if self.github.repo.trim().is_empty() {
            return Err(ConfigError::MissingField("github.repo"));
        }

        let target = parse_repo_url(&self.github.repo)?;

        if !looks_like_github_token(&self.github.token) {
            warn!("⚠️ GitHub token 格式与常见格式不符");
        }

        info!("✓ 配置校验通过");
        Ok(target)
    }

    /// 轮询间隔，至少 1 秒
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.monitor.interval_seconds.max(1))
    }
}

/// 从仓库地址中解析 owner / name
pub fn parse_repo_url(url: &str) -> Result<RepoTarget, ConfigError> {
    let re = Regex::new(r"^https?://[^/]+/([^/]+)/([^/]+?)(?:\.git)?/?$")
        .map_err(|_| ConfigError::InvalidRepoUrl(url.to_string()))?;

    let caps = re
        .captures(url.trim())
        .ok_or_else(|| ConfigError::InvalidRepoUrl(url.to_string()))?;

    Ok(RepoTarget {
        owner: caps[1].to_string(),
        name: caps[2].to_string(),
    })
}

fn looks_like_github_token(token: &str) -> bool {
    Regex::new(r"^ghp_[a-zA-Z0-9]{36}$|^github_pat_[a-zA-Z0-9_]{82}$")
        .map(|re| re.is_match(token))
        .unwrap_or(false)
}
