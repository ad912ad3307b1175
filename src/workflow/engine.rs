//! 提交捕获与同步引擎 - 流程层
//!
//! 每次 `tick()` 的流程：
//! 1. 检查会话，失效则通过工厂重建（状态保留）
//! 2. 读取当前地址并判断页面类型
//! 3. 题目页：记录草稿 → 检查是否通过
//! 4. 结果页：检查是否通过 → 跳回题目页
//! 5. 通过后同步到仓库，成功才记为已处理
//!
//! 不可重入：调用方必须等上一次 `tick()` 返回后再调用下一次

use tracing::{debug, error, info, warn};

use crate::infrastructure::{ObserverFactory, PageObserver};
use crate::services::{CodeExtractor, LanguageDetector, RepositorySync};
use crate::workflow::site::{PageKind, Site};
use crate::workflow::tracker::SubmissionTracker;

/// 题目页上的评测状态
pub const PROBLEM_STATUS_SELECTOR: &str = "//div[contains(@class, 'status')]";
/// 结果页上的通过标记
pub const RESULT_ACCEPTED_SELECTOR: &str = "//span[contains(text(), 'Accepted')]";
const ACCEPTED: &str = "Accepted";

/// 一次轮询的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// 无法创建观察者，下次再试
    ObserverUnavailable,
    /// 观察者已（重新）创建
    Reinitialized,
    /// 不在目标站点，已导航回去
    NavigatedToSite,
    /// 导航失败
    NavigationFailed,
    /// 题目无法解析（如跳转中）
    Unresolved,
    /// 题目已同步过，什么都不做
    AlreadyProcessed,
    /// 结果页未通过，已跳回题目页
    Redirected,
    /// 显示通过但编辑器为空，放弃本次
    AcceptedWithoutCode,
    /// 尝试了一次同步
    Synced { problem: String, success: bool },
    /// 在题目页上继续观察
    Watching,
    /// 站点内的其他页面
    Idle,
}

pub struct SubmissionEngine {
    observer: Option<Box<dyn PageObserver>>,
    factory: Box<dyn ObserverFactory>,
    site: Site,
    extractor: CodeExtractor,
    detector: LanguageDetector,
    tracker: SubmissionTracker,
    sync: RepositorySync,
}

impl SubmissionEngine {
    pub fn new(factory: Box<dyn ObserverFactory>, sync: RepositorySync, base_url: &str) -> Self {
        Self {
            observer: None,
            factory,
            site: Site::new(base_url),
            extractor: CodeExtractor::new(),
            detector: LanguageDetector::new(),
            tracker: SubmissionTracker::new(),
            sync,
        }
    }

    pub fn tracker(&self) -> &SubmissionTracker {
        &self.tracker
    }

    /// 执行一次轮询，所有错误都在本轮内处理
    pub async fn tick(&mut self) -> TickOutcome {
        let observer = match self.observer.take() {
            Some(observer) => observer,
            None => return self.reinitialize().await,
        };

        if let Err(e) = observer.probe().await {
            warn!("⚠️ 浏览器会话失效，重新初始化: {}", e);
            observer.close().await;
            return self.reinitialize().await;
        }

        let outcome = self.observe(observer.as_ref()).await;
        self.observer = Some(observer);
        outcome
    }

    /// 关闭浏览器
    pub async fn shutdown(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.close().await;
        }
        info!(
            "引擎已停止 (已同步: {}, 未同步: {})",
            self.tracker.processed_count(),
            self.tracker.pending_count()
        );
    }

    async fn reinitialize(&mut self) -> TickOutcome {
        let observer = match self.factory.create().await {
            Ok(observer) => observer,
            Err(e) => {
                error!("❌ 创建浏览器会话失败: {:#}", e);
                return TickOutcome::ObserverUnavailable;
            }
        };

        match observer.navigate(self.site.base_url()).await {
            Ok(()) => info!("已打开 {}", self.site.base_url()),
            Err(e) => warn!("⚠️ {}", e),
        }

        self.observer = Some(observer);
        TickOutcome::Reinitialized
    }

    async fn observe(&mut self, observer: &dyn PageObserver) -> TickOutcome {
        let location = match observer.current_location().await {
            Ok(location) => location,
            Err(e) => {
                warn!("读取当前地址失败: {}", e);
                return TickOutcome::Idle;
            }
        };

        match self.site.classify(&location) {
            PageKind::Problem => self.on_problem_page(observer, &location).await,
            PageKind::SubmissionResult => self.on_result_page(observer, &location).await,
            PageKind::OffSite => match observer.navigate(self.site.base_url()).await {
                Ok(()) => {
                    info!("已导航到 {}", self.site.base_url());
                    TickOutcome::NavigatedToSite
                }
                Err(e) => {
                    error!("❌ {}", e);
                    TickOutcome::NavigationFailed
                }
            },
            PageKind::Other => TickOutcome::Idle,
        }
    }

    async fn on_problem_page(&mut self, observer: &dyn PageObserver, location: &str) -> TickOutcome {
        let title = observer.page_title().await.unwrap_or_default();
        let problem = self.site.resolve_problem(location, &title);

        if self.tracker.set_current_problem(problem.clone()) {
            if let Some(p) = &problem {
                info!("检测到题目: {}", p);
            }
        }
        let Some(problem) = problem else {
            return TickOutcome::Unresolved;
        };
        if self.tracker.is_processed(&problem) {
            debug!("已处理过: {}", problem);
            return TickOutcome::AlreadyProcessed;
        }

        self.capture_draft(observer, &problem).await;

        if self.problem_page_accepted(observer).await {
            return self.handle_accepted(observer, &problem).await;
        }
        TickOutcome::Watching
    }

    async fn on_result_page(&mut self, observer: &dyn PageObserver, location: &str) -> TickOutcome {
        let problem = self.site.problem_from_location(location);
        self.tracker.set_current_problem(problem.clone());
        let Some(problem) = problem else {
            return TickOutcome::Unresolved;
        };
        let problem_url = self.site.problem_url(&problem);

        let outcome = if self.tracker.is_processed(&problem) {
            debug!("已处理过: {}，跳回题目页", problem);
            TickOutcome::AlreadyProcessed
        } else if self.result_page_accepted(observer).await {
            info!("在结果页发现通过的提交: {}", problem);
            self.handle_accepted(observer, &problem).await
        } else {
            TickOutcome::Redirected
        };

        if let Err(e) = observer.navigate(&problem_url).await {
            error!("❌ {}", e);
            if outcome == TickOutcome::Redirected {
                return TickOutcome::NavigationFailed;
            }
        } else {
            debug!("跳回题目页: {}", problem_url);
        }
        outcome
    }

    /// 编辑器有内容时创建或更新草稿
    async fn capture_draft(&mut self, observer: &dyn PageObserver, problem: &str) {
        let code = self.extractor.extract(observer).await;
        if code.is_empty() {
            return;
        }

        if self.tracker.has_draft(problem) {
            self.tracker.update_draft(problem, &code);
        } else {
            let language = self.detector.detect(observer).await;
            self.tracker.create_draft(problem, &language, &code);
        }
    }

    async fn handle_accepted(&mut self, observer: &dyn PageObserver, problem: &str) -> TickOutcome {
        info!("处理通过的提交: {}", problem);

        let submission = if self.tracker.has_draft(problem) {
            self.tracker.promote(problem)
        } else {
            let code = self.extractor.extract(observer).await;
            if code.is_empty() {
                warn!("⚠️ 提交已通过但编辑器中没有代码: {}", problem);
                return TickOutcome::AcceptedWithoutCode;
            }
            let language = self.detector.detect(observer).await;
            self.tracker.accept_new(problem, &language, &code)
        };

        let Some(submission) = submission else {
            return TickOutcome::Watching;
        };

        let success = self.sync.sync(&submission).await;
        if success {
            self.tracker.mark_synced(problem);
            info!("✓ 已同步: {}", problem);
        } else {
            error!("❌ 同步失败，保留为已通过状态: {}", problem);
        }

        TickOutcome::Synced {
            problem: problem.to_string(),
            success,
        }
    }

    async fn problem_page_accepted(&self, observer: &dyn PageObserver) -> bool {
        match observer.query(PROBLEM_STATUS_SELECTOR).await {
            Ok(elements) => elements.iter().any(|el| el.text.trim() == ACCEPTED),
            Err(e) => {
                debug!("读取评测状态失败: {}", e);
                false
            }
        }
    }

    async fn result_page_accepted(&self, observer: &dyn PageObserver) -> bool {
        match observer.query(RESULT_ACCEPTED_SELECTOR).await {
            Ok(elements) => !elements.is_empty(),
            Err(e) => {
                debug!("读取提交结果失败: {}", e);
                false
            }
        }
    }
}
