//! 提交跟踪状态机
//!
//! 每道题的状态：未见 → 草稿 → 已通过 → 已同步
//!
//! 只由引擎的 `tick()` 修改，调用方保证不会并发访问

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::logger::truncate_text;
use crate::models::submission::clean_code;
use crate::models::{Submission, SubmissionStatus};

/// 记录代码的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftUpdate {
    Created,
    Updated,
    Unchanged,
}

#[derive(Debug, Default)]
pub struct SubmissionTracker {
    /// 每道题至多一个未同步的提交
    pending: HashMap<String, Submission>,
    /// 本次运行中已同步的题目，只增不减
    processed: HashSet<String>,
    /// 最近一次解析出的题目，`None` 表示未解析
    current_problem: Option<String>,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_problem(&self) -> Option<&str> {
        self.current_problem.as_deref()
    }

    /// 设置当前题目，返回是否发生变化
    pub fn set_current_problem(&mut self, problem: Option<String>) -> bool {
        if self.current_problem == problem {
            return false;
        }
        self.current_problem = problem;
        true
    }

    pub fn is_processed(&self, problem: &str) -> bool {
        self.processed.contains(problem)
    }

    pub fn has_draft(&self, problem: &str) -> bool {
        self.pending.contains_key(problem)
    }

    pub fn pending(&self, problem: &str) -> Option<&Submission> {
        self.pending.get(problem)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// 题目没有草稿时创建
    pub fn create_draft(&mut self, problem: &str, language: &str, code: &str) -> DraftUpdate {
        if self.is_processed(problem) || self.has_draft(problem) {
            return DraftUpdate::Unchanged;
        }
        if clean_code(code).is_empty() {
            return DraftUpdate::Unchanged;
        }

        self.pending
            .insert(problem.to_string(), Submission::pending(problem, language, code));
        info!("创建草稿: {} ({})", problem, language);
        DraftUpdate::Created
    }

    /// 用最新代码覆盖草稿，只改代码，不改创建时间和语言
    pub fn update_draft(&mut self, problem: &str, code: &str) -> DraftUpdate {
        let code = clean_code(code);
        if code.is_empty() {
            return DraftUpdate::Unchanged;
        }

        match self.pending.get_mut(problem) {
            Some(draft) if draft.is_pending() => {
                if draft.code != code {
                    draft.code = code;
                    debug!("更新草稿代码: {} ({})", problem, truncate_text(&draft.code, 40));
                }
                DraftUpdate::Updated
            }
            _ => DraftUpdate::Unchanged,
        }
    }

    /// 将已有草稿标记为通过并返回副本；已同步或没有草稿时返回 `None`
    ///
    /// 上次同步失败、仍处于已通过状态的提交会再次返回，以便重试
    pub fn promote(&mut self, problem: &str) -> Option<Submission> {
        if self.is_processed(problem) {
            return None;
        }
        let draft = self.pending.get_mut(problem)?;
        draft.status = SubmissionStatus::Accepted;
        Some(draft.clone())
    }

    /// 没有草稿时直接用当前编辑器内容生成已通过的提交；代码为空则放弃
    pub fn accept_new(&mut self, problem: &str, language: &str, code: &str) -> Option<Submission> {
        if self.is_processed(problem) || self.has_draft(problem) {
            return None;
        }
        if clean_code(code).is_empty() {
            return None;
        }

        let mut submission = Submission::pending(problem, language, code);
        submission.status = SubmissionStatus::Accepted;
        self.pending.insert(problem.to_string(), submission.clone());
        Some(submission)
    }

    /// 同步成功后调用
    pub fn mark_synced(&mut self, problem: &str) {
        self.pending.remove(problem);
        self.processed.insert(problem.to_string());
    }
}
