//! Run driver / 运行流程
//!
//! 目录检查 -> 压缩 -> 上传，线性执行，不回滚、不清理临时压缩包

use std::path::PathBuf;

use anyhow::Result;

use crate::archive::compress_directory_blocking;
use crate::config::AppConfig;
use crate::storage::ArtifactStore;
use crate::upload::{upload_artifact, LinkRequest, UploadOutcome, UploadReceipt};

/// Outcome of one run / 单次运行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Uploaded(UploadReceipt),
    /// Archive created but bucket missing, archive stays on disk / 已压缩但存储桶不存在
    SkippedNoBucket { archive: PathBuf },
    /// Source directory missing, nothing done / 源目录不存在
    SkippedNoSourceDir { source_dir: PathBuf },
}

/// Execute a single run / 执行一次运行
pub async fn run(config: &AppConfig, store: &dyn ArtifactStore) -> Result<RunOutcome> {
    let archive_path = config.archive_path();
    let object_key = config.object_key();

    if !config.source_dir.exists() {
        tracing::info!("Directory {} does not exist, skipping upload.", config.source_dir.display());
        return Ok(RunOutcome::SkippedNoSourceDir { source_dir: config.source_dir.clone() });
    }

    tracing::info!("Compressing {}...", config.source_dir.display());
    let archive = compress_directory_blocking(config.source_dir.clone(), archive_path).await?;

    tracing::info!("Uploading to MinIO bucket: {}...", config.bucket);
    let link = LinkRequest {
        expiry_secs: config.presign_expiry_secs,
        download_name: format!("artifact-{}", config.archive_file_name()),
    };
    let outcome = upload_artifact(store, &archive, &config.bucket, &object_key, Some(&link)).await?;

    Ok(match outcome {
        UploadOutcome::Uploaded(receipt) => RunOutcome::Uploaded(receipt),
        UploadOutcome::BucketMissing => RunOutcome::SkippedNoBucket { archive },
    })
}
