//! S3驱动核心实现
//!
//! 设计原则：
//! - 只提供原语（bucket_exists, put_file, presign_get）
//! - 存储桶检查对桶本身发 HEAD，不依赖 ListBuckets 权限
//! - 单次 PutObject 上传，不分片、不重试
//! - 路径风格寻址（MinIO）

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::Region;

use crate::storage::ArtifactStore;
use super::config::S3Config;

/// S3对象存储（MinIO 兼容）
pub struct S3Store {
    region: Region,
    credentials: Credentials,
}

impl S3Store {
    /// 根据配置建立客户端
    pub fn connect(config: &S3Config) -> Result<Self> {
        let credentials = Self::create_credentials(config)?;
        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint_url(),
        };

        tracing::debug!("S3 client: endpoint={}, region={}", config.endpoint_url(), config.region);

        Ok(Self { region, credentials })
    }

    /// 创建S3凭证，缺失时退回匿名访问
    fn create_credentials(config: &S3Config) -> Result<Credentials> {
        if config.has_credentials() {
            Credentials::new(
                config.access_key.as_deref(),
                config.secret_key.as_deref(),
                None,
                None,
                None,
            )
            .map_err(|e| anyhow!("Failed to create S3 credentials: {}", e))
        } else {
            tracing::warn!("MINIO_ACCESS_KEY / MINIO_SECRET_KEY not set, using anonymous access");
            Credentials::anonymous().map_err(|e| anyhow!("Failed to create S3 credentials: {}", e))
        }
    }

    /// 创建S3 Bucket客户端
    fn bucket(&self, name: &str) -> Result<Box<Bucket>> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())
            .map_err(|e| anyhow!("Failed to create S3 bucket handle: {}", e))?;
        Ok(bucket.with_path_style())
    }
}

#[async_trait]
impl ArtifactStore for S3Store {
    fn name(&self) -> &str {
        "S3"
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        // HEAD /{bucket}/，只需要该桶的权限
        let (_, code) = self
            .bucket(bucket)?
            .head_object("/")
            .await
            .map_err(|e| anyhow!("Failed to check bucket {}: {}", bucket, e))?;

        tracing::debug!("S3 HeadBucket: bucket={}, status={}", bucket, code);

        match code {
            200..=299 => Ok(true),
            404 => Ok(false),
            _ => Err(anyhow!("Failed to check bucket {}: server returned {}", bucket, code)),
        }
    }

    async fn put_file(&self, bucket: &str, key: &str, path: &Path, content_type: &str) -> Result<u64> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let size = data.len() as u64;

        tracing::debug!("S3 PutObject: bucket={}, key={}, size={}", bucket, key, size);

        let response = self
            .bucket(bucket)?
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| anyhow!("S3 PutObject failed: {}", e))?;

        let code = response.status_code();
        if !(200..300).contains(&code) {
            return Err(anyhow!(
                "S3 PutObject returned {}: {}",
                code,
                String::from_utf8_lossy(response.as_slice())
            ));
        }

        Ok(size)
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expiry_secs: u32,
        download_name: &str,
    ) -> Result<Option<String>> {
        let mut queries = HashMap::new();
        queries.insert(
            "response-content-disposition".to_string(),
            format!("attachment; filename=\"{}\"", download_name),
        );

        let url = self
            .bucket(bucket)?
            .presign_get(key, expiry_secs, Some(queries))
            .await
            .map_err(|e| anyhow!("Failed to presign {}: {}", key, e))?;

        Ok(Some(url))
    }
}
