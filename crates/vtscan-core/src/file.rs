//! 待扫描文件
use bytes::Bytes;
use std::path::Path;

use crate::error::Result;

/// 界面宣称的上传上限（256 MiB）；核心流程本身不强制
pub const MAX_UPLOAD_BYTES: u64 = 256 * 1024 * 1024;

/// 一次扫描的文件输入：原始文件名 + 内容
///
/// 内容以 `Bytes` 保存，摘要计算与 multipart 上传共享同一块缓冲区。
#[derive(Debug, Clone)]
pub struct ScanFile {
    name: String,
    data: Bytes,
}

impl ScanFile {
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self { name: name.into(), data: data.into() }
    }

    /// 从磁盘读取整个文件；失败映射为 `ScanError::Read`
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_bytes(name, data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn bytes(&self) -> &Bytes {
        &self.data
    }

    pub fn exceeds_upload_limit(&self) -> bool {
        self.size() > MAX_UPLOAD_BYTES
    }
}
