use async_trait::async_trait;
use anyhow::Result;
use std::path::Path;

/// Object store interface used by the uploader / 上传器使用的对象存储接口
///
/// Only primitives: bucket check, single-shot put, presigned link / 只提供原语
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Store name, for logs / 存储名称
    fn name(&self) -> &str;

    /// Whether the bucket exists / 存储桶是否存在
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Upload a whole local file under `key`, returns bytes sent / 上传完整文件，返回字节数
    async fn put_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<u64>;

    /// Presigned download URL (if supported) / 预签名下载链接
    /// download_name: 浏览器下载时显示的文件名
    async fn presign_get(
        &self,
        _bucket: &str,
        _key: &str,
        _expiry_secs: u32,
        _download_name: &str,
    ) -> Result<Option<String>> {
        Ok(None)
    }
}

#[cfg(test)]
pub mod memory;
