//! S3驱动配置

/// S3配置（MinIO 兼容）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Config {
    /// S3端点地址，可带或不带协议
    /// MinIO: minio:9000 / http://localhost:9000
    pub endpoint: String,
    /// 区域
    pub region: String,
    /// Access Key ID（为空时匿名访问）
    pub access_key: Option<String>,
    /// Secret Access Key
    pub secret_key: Option<String>,
    /// 端点不带协议时是否使用 HTTPS
    pub secure: bool,
}

pub fn default_endpoint() -> String {
    "minio:9000".to_string()
}

pub fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            region: default_region(),
            access_key: None,
            secret_key: None,
            secure: false,
        }
    }
}

impl S3Config {
    /// Endpoint URL with scheme / 带协议的端点URL
    pub fn endpoint_url(&self) -> String {
        let endpoint = self.endpoint.trim().trim_end_matches('/');
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if self.secure {
            format!("https://{}", endpoint)
        } else {
            format!("http://{}", endpoint)
        }
    }

    /// 是否配置了完整凭证
    pub fn has_credentials(&self) -> bool {
        self.access_key.as_deref().is_some_and(|k| !k.is_empty())
            && self.secret_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}
