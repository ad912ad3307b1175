//! 语言识别服务 - 业务能力层

use tracing::debug;

use crate::infrastructure::PageObserver;
use crate::models::language::{canonical_language, DEFAULT_LANGUAGE};

/// 语言选择框中当前选中的项
pub const LANGUAGE_SELECT: &str = "//select[@data-cy='lang-select']//option[@selected]";
/// 通用的语言标识元素
pub const LANGUAGE_INDICATOR: &str = "//div[contains(@class, 'language')]";

/// 语言识别服务
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    /// 识别当前编辑器语言，找不到或无法识别时返回 `java`
    pub async fn detect(&self, observer: &dyn PageObserver) -> String {
        let label = self.read_label(observer).await;
        let language = label
            .as_deref()
            .and_then(canonical_language)
            .unwrap_or(DEFAULT_LANGUAGE);

        debug!("语言标签 {:?} → {}", label, language);
        language.to_string()
    }

    async fn read_label(&self, observer: &dyn PageObserver) -> Option<String> {
        for selector in [LANGUAGE_SELECT, LANGUAGE_INDICATOR] {
            match observer.query(selector).await {
                Ok(elements) => {
                    if let Some(el) = elements.first() {
                        return Some(el.text.trim().to_string());
                    }
                }
                Err(e) => debug!("读取语言标签失败: {}", e),
            }
        }
        None
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}
