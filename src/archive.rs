//! Directory archiver / 目录打包
//!
//! Packs a directory into a single tar.gz, entry paths rooted at the directory's own name
//! 打包为 tar.gz，条目路径以目录自身名称为根，不泄露宿主机绝对路径

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;

/// Compress `source_dir` into `output` (created or overwritten) / 压缩目录到目标文件
///
/// A regular file is stored as a single entry under its own name.
/// 返回目标路径；错误（源路径不存在、权限、磁盘满）直接向上传递
pub fn compress_directory(source_dir: &Path, output: &Path) -> Result<PathBuf> {
    let base_name = source_dir
        .file_name()
        .ok_or_else(|| anyhow!("source directory has no base name: {}", source_dir.display()))?;

    if !source_dir.exists() {
        bail!("source not found: {}", source_dir.display());
    }

    let file = File::create(output)
        .with_context(|| format!("failed to create archive: {}", output.display()))?;
    let encoder = GzEncoder::new(BufWriter::with_capacity(128 * 1024, file), Compression::best());

    let mut builder = tar::Builder::new(encoder);
    // 符号链接按链接存储，不跟随
    builder.follow_symlinks(false);
    let appended = if source_dir.is_dir() {
        builder.append_dir_all(base_name, source_dir)
    } else {
        builder.append_path_with_name(source_dir, base_name)
    };
    appended.with_context(|| format!("failed to archive {}", source_dir.display()))?;

    let encoder = builder.into_inner().context("failed to finish tar stream")?;
    let mut writer = encoder.finish().context("failed to finish gzip stream")?;
    writer.flush()?;

    tracing::debug!("Archive written: {:?} -> {:?}", source_dir, output);
    Ok(output.to_path_buf())
}

/// Run [`compress_directory`] on the blocking pool / 在 spawn_blocking 中执行压缩
pub async fn compress_directory_blocking(source_dir: PathBuf, output: PathBuf) -> Result<PathBuf> {
    tokio::task::spawn_blocking(move || compress_directory(&source_dir, &output))
        .await
        .map_err(|e| anyhow!("archive task failed: {}", e))?
}
