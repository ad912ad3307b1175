//! 代码提取服务 - 业务能力层
//!
//! 按固定优先级依次尝试各种编辑器控件，返回第一个非空结果

use tracing::debug;

use crate::infrastructure::{ObservedElement, PageObserver};
use crate::models::submission::clean_code;

/// 如何从匹配到的元素中读出代码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// 取第一个元素的 `value`
    FirstValue,
    /// 按文档顺序用换行拼接所有元素的文本
    JoinedLines,
}

/// 一种编辑器控件的提取策略
#[derive(Debug, Clone, Copy)]
pub struct ExtractionStrategy {
    pub name: &'static str,
    pub selector: &'static str,
    pub mode: ReadMode,
}

impl ExtractionStrategy {
    fn read(&self, elements: &[ObservedElement]) -> String {
        match self.mode {
            ReadMode::FirstValue => elements
                .first()
                .and_then(|el| el.attribute("value"))
                .unwrap_or_default()
                .to_string(),
            ReadMode::JoinedLines => elements
                .iter()
                .map(|el| el.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// 顺序不可调整：越新、越可能出现的编辑器越靠前，避免读到隐藏的旧控件
pub const EDITOR_STRATEGIES: &[ExtractionStrategy] = &[
    ExtractionStrategy {
        name: "Monaco",
        selector: "//div[contains(@class, 'monaco-editor')]//textarea",
        mode: ReadMode::FirstValue,
    },
    ExtractionStrategy {
        name: "Monaco (data-cy)",
        selector: "//textarea[@data-cy='code-editor']",
        mode: ReadMode::FirstValue,
    },
    ExtractionStrategy {
        name: "CodeMirror",
        selector: "//pre[@class='CodeMirror-line']",
        mode: ReadMode::JoinedLines,
    },
    ExtractionStrategy {
        name: "Ace",
        selector: "//div[@class='ace_editor']//textarea",
        mode: ReadMode::FirstValue,
    },
    ExtractionStrategy {
        name: "generic editor",
        selector: "//div[contains(@class, 'editor')]//textarea",
        mode: ReadMode::FirstValue,
    },
];

/// 代码提取服务
pub struct CodeExtractor {
    strategies: &'static [ExtractionStrategy],
}

impl CodeExtractor {
    pub fn new() -> Self {
        Self {
            strategies: EDITOR_STRATEGIES,
        }
    }

    /// 提取编辑器中的代码，编辑器为空时返回空字符串
    ///
    /// 查询出错视为本轮没有数据
    pub async fn extract(&self, observer: &dyn PageObserver) -> String {
        for strategy in self.strategies {
            let elements = match observer.query(strategy.selector).await {
                Ok(elements) => elements,
                Err(e) => {
                    debug!("{} 查询失败: {}", strategy.name, e);
                    continue;
                }
            };
            if elements.is_empty() {
                continue;
            }

            let code = clean_code(&strategy.read(&elements));
            if !code.is_empty() {
                debug!("从 {} 编辑器中提取到代码", strategy.name);
                return code;
            }
        }

        debug!("所有编辑器均未找到代码");
        String::new()
    }
}

impl Default for CodeExtractor {
    fn default() -> Self {
        Self::new()
    }
}
