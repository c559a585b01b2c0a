//! Artifact uploader / 产物上传
//!
//! Bucket check, then one full-file transfer. No retry, no multipart.
//! 先检查存储桶，再单次上传完整文件；不重试、不分片

use std::path::Path;

use anyhow::Result;

use crate::storage::ArtifactStore;

/// Content type of uploaded archives / 上传压缩包的内容类型
pub const ARCHIVE_CONTENT_TYPE: &str = "application/gzip";

/// Successful upload details / 上传成功信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Store that accepted the object / 接收对象的存储
    pub store: String,
    pub bucket: String,
    pub object_key: String,
    /// Bytes transferred / 传输字节数
    pub bytes: u64,
    /// Presigned download link, if requested and available / 预签名下载链接
    pub download_url: Option<String>,
}

/// Upload result / 上传结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded(UploadReceipt),
    /// Bucket not found, nothing sent / 存储桶不存在，未上传
    BucketMissing,
}

/// Presigned link request / 预签名链接参数
#[derive(Debug, Clone)]
pub struct LinkRequest {
    pub expiry_secs: u32,
    /// File name shown to the downloader / 下载时显示的文件名
    pub download_name: String,
}

/// Upload `file` to `bucket` under `key` / 上传文件到存储桶
///
/// 存储桶不存在时记录日志并返回 BucketMissing（软失败）；传输错误直接向上传递
pub async fn upload_artifact(
    store: &dyn ArtifactStore,
    file: &Path,
    bucket: &str,
    key: &str,
    link: Option<&LinkRequest>,
) -> Result<UploadOutcome> {
    if !store.bucket_exists(bucket).await? {
        tracing::warn!("Bucket {} does not exist. Please check configuration.", bucket);
        return Ok(UploadOutcome::BucketMissing);
    }

    tracing::debug!("Uploading {} via {} store", key, store.name());
    let bytes = store.put_file(bucket, key, file, ARCHIVE_CONTENT_TYPE).await?;
    tracing::info!("Successfully uploaded {} to {}", key, bucket);

    // Object is already stored, a link failure only warns / 对象已存储，链接失败只告警
    let download_url = match link {
        Some(req) if req.expiry_secs > 0 => {
            match store.presign_get(bucket, key, req.expiry_secs, &req.download_name).await {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Failed to create download link for {}: {}", key, e);
                    None
                }
            }
        }
        _ => None,
    };

    if let Some(ref url) = download_url {
        // Bearer URL, kept out of default logs / 链接即凭证，默认日志不输出
        tracing::debug!("Download link (valid {}s): {}", link.map(|l| l.expiry_secs).unwrap_or(0), url);
    }

    Ok(UploadOutcome::Uploaded(UploadReceipt {
        store: store.name().to_string(),
        bucket: bucket.to_string(),
        object_key: key.to_string(),
        bytes,
        download_url,
    }))
}
