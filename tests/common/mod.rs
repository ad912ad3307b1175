//! 测试用的假页面和假仓库
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use leetcode_uploader::clients::{PutFileRequest, RepositoryApi};
use leetcode_uploader::error::{ApiError, ObserverError};
use leetcode_uploader::infrastructure::{ObservedElement, ObserverFactory, PageObserver};

pub const BASE_URL: &str = "https://leetcode.com";

#[derive(Debug, Default)]
pub struct PageState {
    pub location: String,
    pub title: String,
    pub elements: HashMap<String, Vec<ObservedElement>>,
    pub failing_selectors: HashSet<String>,
    pub dead: bool,
    pub fail_navigation: bool,
    pub navigations: Vec<String>,
    pub queries: Vec<String>,
}

/// 内存中的页面，克隆后共享同一份状态
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    state: Arc<Mutex<PageState>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(&self, location: &str) -> &Self {
        self.state.lock().unwrap().location = location.to_string();
        self
    }

    pub fn titled(&self, title: &str) -> &Self {
        self.state.lock().unwrap().title = title.to_string();
        self
    }

    pub fn set(&self, selector: &str, elements: Vec<ObservedElement>) -> &Self {
        self.state
            .lock()
            .unwrap()
            .elements
            .insert(selector.to_string(), elements);
        self
    }

    pub fn clear(&self, selector: &str) -> &Self {
        self.state.lock().unwrap().elements.remove(selector);
        self
    }

    pub fn fail_query(&self, selector: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .failing_selectors
            .insert(selector.to_string());
        self
    }

    pub fn kill(&self) {
        self.state.lock().unwrap().dead = true;
    }

    pub fn revive(&self) {
        self.state.lock().unwrap().dead = false;
    }

    pub fn fail_navigation(&self, fail: bool) {
        self.state.lock().unwrap().fail_navigation = fail;
    }

    pub fn location(&self) -> String {
        self.state.lock().unwrap().location.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.state.lock().unwrap().queries.clone()
    }
}

#[async_trait]
impl PageObserver for FakePage {
    async fn current_location(&self) -> Result<String, ObserverError> {
        let state = self.state.lock().unwrap();
        if state.dead {
            return Err(ObserverError::SessionDead("invalid session id".to_string()));
        }
        Ok(state.location.clone())
    }

    async fn page_title(&self) -> Result<String, ObserverError> {
        Ok(self.state.lock().unwrap().title.clone())
    }

    async fn query(&self, selector: &str) -> Result<Vec<ObservedElement>, ObserverError> {
        let mut state = self.state.lock().unwrap();
        state.queries.push(selector.to_string());
        if state.failing_selectors.contains(selector) {
            return Err(ObserverError::Query {
                selector: selector.to_string(),
                message: "node detached".to_string(),
            });
        }
        Ok(state.elements.get(selector).cloned().unwrap_or_default())
    }

    async fn navigate(&self, location: &str) -> Result<(), ObserverError> {
        let mut state = self.state.lock().unwrap();
        state.navigations.push(location.to_string());
        if state.fail_navigation {
            return Err(ObserverError::Navigation {
                url: location.to_string(),
                message: "net::ERR_TIMED_OUT".to_string(),
            });
        }
        state.location = location.to_string();
        Ok(())
    }
}

/// 每次创建都返回同一个页面（模拟重新打开的会话）
#[derive(Debug, Clone, Default)]
pub struct FakeFactory {
    pub page: FakePage,
    pub created: Arc<AtomicUsize>,
    pub fail: Arc<AtomicBool>,
}

impl FakeFactory {
    pub fn new(page: FakePage) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObserverFactory for FakeFactory {
    async fn create(&self) -> anyhow::Result<Box<dyn PageObserver>> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("chrome not found");
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        self.page.revive();
        Ok(Box::new(self.page.clone()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RepoCall {
    Fetch(String),
    Put(String, PutFileRequest),
}

/// 记录所有调用的仓库
#[derive(Debug, Clone, Default)]
pub struct RecordingRepo {
    pub files: Arc<Mutex<HashMap<String, String>>>,
    pub calls: Arc<Mutex<Vec<RepoCall>>>,
    pub fail_put: Arc<AtomicBool>,
    pub fail_fetch: Arc<AtomicBool>,
}

impl RecordingRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, sha: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), sha.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RepoCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn puts(&self) -> Vec<(String, PutFileRequest)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RepoCall::Put(path, req) => Some((path, req)),
                RepoCall::Fetch(_) => None,
            })
            .collect()
    }

    pub fn set_fail_put(&self, fail: bool) {
        self.fail_put.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RepositoryApi for RecordingRepo {
    async fn fetch_revision(&self, path: &str) -> Result<Option<String>, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(RepoCall::Fetch(path.to_string()));
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(ApiError::BadStatus {
                endpoint: path.to_string(),
                status: 500,
                body: "server error".to_string(),
            });
        }
        Ok(self.files.lock().unwrap().get(path).cloned())
    }

    async fn put_file(&self, path: &str, request: &PutFileRequest) -> Result<Option<String>, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(RepoCall::Put(path.to_string(), request.clone()));
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(ApiError::BadStatus {
                endpoint: path.to_string(),
                status: 409,
                body: "sha does not match".to_string(),
            });
        }
        let mut files = self.files.lock().unwrap();
        let sha = format!("sha-{}", files.len() + 1);
        files.insert(path.to_string(), sha);
        Ok(Some(format!("https://github.com/alice/solutions/blob/main/{}", path)))
    }
}
