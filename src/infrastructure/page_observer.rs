//! 页面观察能力 - 基础设施层
//!
//! 引擎只依赖这里的 trait，不关心背后是哪种浏览器驱动

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ObserverError;

/// 选择器匹配到的一个元素
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ObservedElement {
    /// 元素的可见文本
    #[serde(default)]
    pub text: String,
    /// 元素属性，表单控件额外包含当前的 `value`
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl ObservedElement {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        let mut attributes = HashMap::new();
        attributes.insert("value".to_string(), value.into());
        Self {
            text: String::new(),
            attributes,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// 页面观察者
///
/// 职责：
/// - 暴露当前地址、标题
/// - 按声明式选择器（XPath）查询元素
/// - 导航
///
/// 调用方保证同一时间只有一个调用在进行
#[async_trait]
pub trait PageObserver: Send + Sync {
    /// 当前地址；会话失效时返回 `ObserverError::SessionDead`
    async fn current_location(&self) -> Result<String, ObserverError>;

    async fn page_title(&self) -> Result<String, ObserverError>;

    /// 按文档顺序返回匹配的元素，无匹配时为空
    async fn query(&self, selector: &str) -> Result<Vec<ObservedElement>, ObserverError>;

    async fn navigate(&self, location: &str) -> Result<(), ObserverError>;

    /// 存活检查，失败即视为会话失效
    async fn probe(&self) -> Result<(), ObserverError> {
        self.current_location()
            .await
            .map(|_| ())
            .map_err(|e| match e {
                ObserverError::SessionDead(msg) => ObserverError::SessionDead(msg),
                other => ObserverError::SessionDead(other.to_string()),
            })
    }

    /// 释放底层资源
    async fn close(&self) {}
}

/// 观察者工厂，会话失效后用来重新创建
#[async_trait]
pub trait ObserverFactory: Send + Sync {
    async fn create(&self) -> anyhow::Result<Box<dyn PageObserver>>;
}
