//! 仓库同步服务 - 业务能力层
//!
//! 把通过的提交写入远程仓库：已有文件则带 sha 更新，否则创建

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{error, info};

use crate::clients::{PutFileRequest, RepositoryApi};
use crate::models::{ExtensionTable, Submission};

/// 仓库同步服务
pub struct RepositorySync {
    api: Arc<dyn RepositoryApi>,
    extensions: ExtensionTable,
}

impl RepositorySync {
    pub fn new(api: Arc<dyn RepositoryApi>, extensions: ExtensionTable) -> Self {
        Self { api, extensions }
    }

    /// `<language>/<problem>.<ext>`
    pub fn file_path(&self, submission: &Submission) -> String {
        format!(
            "{}/{}.{}",
            submission.language.to_lowercase(),
            submission.problem,
            self.extensions.extension_for(&submission.language)
        )
    }

    /// 同步一个提交，返回是否成功；失败不重试，只记录日志
    pub async fn sync(&self, submission: &Submission) -> bool {
        let path = self.file_path(submission);
        let content = STANDARD.encode(submission.code.as_bytes());

        let existing_sha = match self.api.fetch_revision(&path).await {
            Ok(sha) => sha,
            Err(e) => {
                error!("❌ 查询已有文件失败 {}: {}", path, e);
                return false;
            }
        };

        let verb = if existing_sha.is_some() { "update" } else { "add" };
        let request = PutFileRequest {
            message: format!(
                "feat: {} {} solution for {}",
                verb, submission.language, submission.problem
            ),
            content,
            sha: existing_sha,
        };

        match self.api.put_file(&path, &request).await {
            Ok(html_url) => {
                info!(
                    "✅ 已上传: {} {} solution for {}",
                    if verb == "add" { "Added" } else { "Updated" },
                    submission.language,
                    submission.problem
                );
                if let Some(url) = html_url {
                    info!("文件地址: {}", url);
                }
                true
            }
            Err(e) => {
                error!("❌ 上传失败: {} ({})", submission.problem, e);
                false
            }
        }
    }
}
