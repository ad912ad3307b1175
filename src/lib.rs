//! # LeetCode Uploader
//!
//! 监控浏览器中的 LeetCode 页面，把通过的提交同步到 GitHub 仓库
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure / Clients）
//! - `infrastructure/` - `PageObserver` 能力及 chromiumoxide 实现
//! - `clients/` - GitHub Contents API
//!
//! ### ② 业务能力层（Services）
//! - `CodeExtractor` - 按优先级从编辑器中读取代码
//! - `LanguageDetector` - 识别当前语言
//! - `RepositorySync` - 创建或更新仓库中的文件
//!
//! ### ③ 流程层（Workflow）
//! - `SubmissionTracker` - 每道题的草稿 / 通过 / 已同步状态
//! - `SubmissionEngine` - 单次轮询的完整流程
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator::App` - 定时驱动引擎，处理退出
//!
//! ## 模块结构

pub mod browser;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ObservedElement, ObserverFactory, PageObserver};
pub use models::{Submission, SubmissionStatus};
pub use orchestrator::App;
pub use workflow::{SubmissionEngine, SubmissionTracker, TickOutcome};
