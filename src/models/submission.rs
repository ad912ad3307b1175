use chrono::{DateTime, Local};

/// 提交状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// 草稿，尚未通过
    Pending,
    /// 已通过，等待同步
    Accepted,
}

/// 一道题当前跟踪的提交
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// 题目标识（URL 中的 slug）
    pub problem: String,
    /// 规范化的语言标识
    pub language: String,
    pub code: String,
    pub status: SubmissionStatus,
    /// 草稿创建时间，后续更新代码不会改变
    pub created_at: DateTime<Local>,
}

impl Submission {
    /// 创建草稿
    pub fn pending(problem: impl Into<String>, language: impl Into<String>, code: &str) -> Self {
        Self {
            problem: problem.into(),
            language: language.into(),
            code: clean_code(code),
            status: SubmissionStatus::Pending,
            created_at: Local::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == SubmissionStatus::Pending
    }
}

/// 统一换行符并去掉首尾空白
pub fn clean_code(code: &str) -> String {
    code.replace("\r\n", "\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_code() {
        assert_eq!(clean_code("  a\r\nb\r\n\n"), "a\nb");
        assert_eq!(clean_code("\t\n"), "");
    }

    #[test]
    fn test_pending_submission() {
        let s = Submission::pending("two-sum", "python", "print(1)\r\n");
        assert_eq!(s.code, "print(1)");
        assert!(s.is_pending());
    }
}
