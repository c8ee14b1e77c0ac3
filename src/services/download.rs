//! 下载保存 - 业务能力层
//!
//! 只负责"把导出的字节另存为文件"，不关心流程

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// 另存为
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// 保存文件，返回保存位置
    async fn save(&self, file_name: &str, bytes: &[u8]) -> AppResult<PathBuf>;
}

/// 保存到本地目录
pub struct FileDownloadSink {
    dir: PathBuf,
}

impl FileDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DownloadSink for FileDownloadSink {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::file(self.dir.display().to_string(), e))?;

        let path = self.dir.join(file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::file(path.display().to_string(), e))?;

        info!("💾 已保存: {} ({} 字节)", path.display(), bytes.len());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_with_given_name_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileDownloadSink::new(dir.path().join("downloads"));

        sink.save("OrderIQ_Output.xlsx", b"first").await.unwrap();
        let path = sink.save("OrderIQ_Output.xlsx", b"second").await.unwrap();

        assert_eq!(path, dir.path().join("downloads").join("OrderIQ_Output.xlsx"));
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }
}
