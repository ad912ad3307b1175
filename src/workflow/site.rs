//! 站点地址解析
//!
//! 判断当前处于哪类页面，并从地址或标题中解析题目标识

use crate::infrastructure::chromium_observer::site_host;

/// 页面类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// 题目页（含编辑器）
    Problem,
    /// 提交结果页
    SubmissionResult,
    /// 不在目标站点
    OffSite,
    /// 站点内的其他页面
    Other,
}

#[derive(Debug, Clone)]
pub struct Site {
    base_url: String,
    host: String,
}

impl Site {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let host = site_host(&base_url).to_string();
        Self { base_url, host }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn classify(&self, location: &str) -> PageKind {
        if location.contains("/submissions/") {
            PageKind::SubmissionResult
        } else if location.contains("/problems/") {
            PageKind::Problem
        } else if !location.contains(&self.host) {
            PageKind::OffSite
        } else {
            PageKind::Other
        }
    }

    /// `/problems/` 之后的第一段
    pub fn problem_from_location(&self, location: &str) -> Option<String> {
        let (_, rest) = location.split_once("/problems/")?;
        let slug = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if slug.is_empty() {
            None
        } else {
            Some(slug.to_string())
        }
    }

    /// 先看地址，再看 `<题名> - LeetCode` 形式的标题
    pub fn resolve_problem(&self, location: &str, title: &str) -> Option<String> {
        self.problem_from_location(location)
            .or_else(|| problem_from_title(title))
    }

    /// 题目的规范地址
    pub fn problem_url(&self, problem: &str) -> String {
        format!("{}/problems/{}/", self.base_url, problem)
    }
}

/// 标题转为只含 `[a-z0-9-]` 的 slug，保证可以直接拼进仓库路径
fn problem_from_title(title: &str) -> Option<String> {
    let (name, _) = title.split_once(" - LeetCode")?;
    let slug = name
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Site {
        Site::new("https://leetcode.com/")
    }

    #[test]
    fn test_classify() {
        let site = site();
        assert_eq!(site.classify("https://leetcode.com/problems/two-sum/"), PageKind::Problem);
        assert_eq!(
            site.classify("https://leetcode.com/problems/two-sum/submissions/123/"),
            PageKind::SubmissionResult
        );
        assert_eq!(site.classify("https://leetcode.com/problemset/"), PageKind::Other);
        assert_eq!(site.classify("about:blank"), PageKind::OffSite);
    }

    #[test]
    fn test_problem_from_location() {
        let site = site();
        assert_eq!(
            site.problem_from_location("https://leetcode.com/problems/two-sum/description/"),
            Some("two-sum".to_string())
        );
        assert_eq!(
            site.problem_from_location("https://leetcode.com/problems/add-two-numbers?tab=x"),
            Some("add-two-numbers".to_string())
        );
        assert_eq!(site.problem_from_location("https://leetcode.com/problems/"), None);
        assert_eq!(site.problem_from_location("https://leetcode.com/submissions/detail/1/"), None);
    }

    #[test]
    fn test_resolve_falls_back_to_title() {
        let site = site();
        assert_eq!(
            site.resolve_problem("https://leetcode.com/problems/", "Two Sum - LeetCode"),
            Some("two-sum".to_string())
        );
        assert_eq!(site.resolve_problem("https://leetcode.com/problems/", "LeetCode"), None);
    }

    #[test]
    fn test_title_slug_drops_url_unsafe_characters() {
        let site = site();
        assert_eq!(
            site.resolve_problem("https://leetcode.com/problems/", "Pow(x, n) - LeetCode"),
            Some("pow-x-n".to_string())
        );
        assert_eq!(
            site.resolve_problem("https://leetcode.com/problems/", "What? #1 & 100% - LeetCode"),
            Some("what-1-100".to_string())
        );
        assert_eq!(site.resolve_problem("https://leetcode.com/problems/", "?? - LeetCode"), None);
    }

    #[test]
    fn test_problem_url() {
        assert_eq!(site().problem_url("two-sum"), "https://leetcode.com/problems/two-sum/");
    }
}
