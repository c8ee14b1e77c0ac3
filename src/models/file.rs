//! 待上传的文件句柄

use std::path::{Path, PathBuf};

/// 文件内容来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// 磁盘文件，提交时才读取
    Path(PathBuf),
    /// 已在内存中的内容
    Memory(Vec<u8>),
}

/// 操作员选择或拖入的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    name: String,
    source: FileSource,
}

impl PickedFile {
    /// 从磁盘路径创建，显示名取文件名部分
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            source: FileSource::Path(path.to_path_buf()),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Memory(bytes),
        }
    }

    /// 显示名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 读取文件内容，得到可以直接上传的文件
    pub async fn load(&self) -> std::io::Result<LoadedFile> {
        let bytes = match &self.source {
            FileSource::Path(path) => tokio::fs::read(path).await?,
            FileSource::Memory(bytes) => bytes.clone(),
        };
        Ok(LoadedFile {
            name: self.name.clone(),
            bytes,
        })
    }
}

/// 已读入内存、等待上传的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl LoadedFile {
    /// 按文件名推断 MIME 类型
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_reads_disk_files_and_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fax.jpg");
        std::fs::write(&path, b"\xff\xd8scan").unwrap();

        let loaded = PickedFile::from_path(&path).load().await.unwrap();

        assert_eq!(loaded.name, "fax.jpg");
        assert_eq!(loaded.bytes, b"\xff\xd8scan".to_vec());
        assert_eq!(loaded.mime_type(), "image/jpeg");
    }

    #[tokio::test]
    async fn load_fails_for_missing_file() {
        assert!(PickedFile::from_path("no/such/fax.png").load().await.is_err());
    }
}
