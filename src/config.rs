//! Run configuration module / 运行配置模块
//!
//! Resolved once at process start from environment variables, defaults applied here
//! 进程启动时从环境变量一次性解析，默认值在此处填充

use std::path::PathBuf;
use thiserror::Error;

use crate::drivers::s3::config::{default_endpoint, default_region};
use crate::drivers::s3::S3Config;

/// Run identifier variable (required) / 运行标识环境变量（必填）
pub const ENV_RUN_ID: &str = "KLEINKRAM_ACTION_UUID";
pub const ENV_BUCKET: &str = "MINIO_ARTIFACTS_BUCKET_NAME";
pub const ENV_ENDPOINT: &str = "MINIO_ENDPOINT";
pub const ENV_ACCESS_KEY: &str = "MINIO_ACCESS_KEY";
pub const ENV_SECRET_KEY: &str = "MINIO_SECRET_KEY";
pub const ENV_SECURE: &str = "MINIO_SECURE";
pub const ENV_REGION: &str = "MINIO_REGION";
pub const ENV_PRESIGN_EXPIRY: &str = "MINIO_PRESIGN_EXPIRY_SECS";

/// Output directory of the action container / 动作容器的输出目录
pub const SOURCE_DIR: &str = "/out";
/// Where the archive is written before upload / 上传前压缩包的存放目录
pub const TEMP_DIR: &str = "/tmp";

const DEFAULT_BUCKET: &str = "action-artifacts";
/// Download link off unless requested / 默认不生成下载链接
const DEFAULT_PRESIGN_EXPIRY_SECS: u32 = 0;

/// Configuration error / 配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("KLEINKRAM_ACTION_UUID environment variable is not set.")]
    MissingRunId,
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Application configuration / 应用配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Run identifier / 运行标识
    pub run_id: String,
    /// Target bucket / 目标存储桶
    pub bucket: String,
    pub source_dir: PathBuf,
    pub temp_dir: PathBuf,
    /// Object store connection / 对象存储连接配置
    pub store: S3Config,
    /// Presigned link lifetime in seconds, 0 disables / 预签名链接有效期（秒），0为关闭
    pub presign_expiry_secs: u32,
}

impl AppConfig {
    /// Load configuration from process environment / 从进程环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through an arbitrary lookup / 通过任意查找函数解析配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let run_id = lookup(ENV_RUN_ID)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingRunId)?;

        let bucket = lookup(ENV_BUCKET).unwrap_or_else(|| DEFAULT_BUCKET.to_string());
        let endpoint = lookup(ENV_ENDPOINT).unwrap_or_else(default_endpoint);
        let region = lookup(ENV_REGION).unwrap_or_else(default_region);

        let secure = match lookup(ENV_SECURE) {
            Some(v) => parse_bool(ENV_SECURE, &v)?,
            None => false,
        };

        let presign_expiry_secs = match lookup(ENV_PRESIGN_EXPIRY) {
            Some(v) => v.trim().parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                name: ENV_PRESIGN_EXPIRY,
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PRESIGN_EXPIRY_SECS,
        };

        Ok(Self {
            run_id,
            bucket,
            source_dir: PathBuf::from(SOURCE_DIR),
            temp_dir: PathBuf::from(TEMP_DIR),
            store: S3Config {
                endpoint,
                region,
                access_key: lookup(ENV_ACCESS_KEY),
                secret_key: lookup(ENV_SECRET_KEY),
                secure,
            },
            presign_expiry_secs,
        })
    }

    /// Archive file name, shared by local copy and object key / 压缩包文件名
    pub fn archive_file_name(&self) -> String {
        format!("{}.tar.gz", self.run_id)
    }

    /// Local archive path / 本地压缩包路径
    pub fn archive_path(&self) -> PathBuf {
        self.temp_dir.join(self.archive_file_name())
    }

    /// Object key in the bucket (unprefixed) / 存储桶内对象键
    pub fn object_key(&self) -> String {
        self.archive_file_name()
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
