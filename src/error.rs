use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 页面观察相关错误
    #[error("浏览器错误: {0}")]
    Observer(#[from] ObserverError),
    /// 远程仓库 API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 页面观察错误
///
/// 除 `SessionDead` 外都只影响当前这一轮轮询
#[derive(Debug, Error)]
pub enum ObserverError {
    /// 会话已失效，需要重新创建观察者
    #[error("浏览器会话已失效: {0}")]
    SessionDead(String),
    /// 选择器查询失败
    #[error("页面查询失败 ({selector}): {message}")]
    Query { selector: String, message: String },
    /// 导航失败
    #[error("导航到 {url} 失败: {message}")]
    Navigation { url: String, message: String },
    /// 执行脚本失败
    #[error("执行脚本失败: {0}")]
    Script(String),
}

/// 远程仓库 API 错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 返回非成功状态码
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// 响应解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入默认配置失败
    #[error("写入默认配置失败 ({path}): {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 必填项缺失
    #[error("配置项 {0} 未填写")]
    MissingField(&'static str),
    /// 仓库地址格式错误
    #[error("无效的 GitHub 仓库地址: {0}")]
    InvalidRepoUrl(String),
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
