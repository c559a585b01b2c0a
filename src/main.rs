use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use artifact_uploader::config::AppConfig;
use artifact_uploader::drivers::s3::S3Store;
use artifact_uploader::runner::{self, RunOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artifact_uploader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("artifact-uploader {} (built {})", env!("CARGO_PKG_VERSION"), env!("BUILD_TIME"));

    // Fail before any I/O if the run id is missing / 运行标识缺失时在任何I/O前失败
    let config = AppConfig::from_env()?;

    let store = S3Store::connect(&config.store)?;

    match runner::run(&config, &store).await? {
        RunOutcome::Uploaded(receipt) => {
            tracing::debug!(
                "Uploaded {} bytes to {}/{} ({})",
                receipt.bytes,
                receipt.bucket,
                receipt.object_key,
                receipt.store
            );
        }
        RunOutcome::SkippedNoBucket { archive } => {
            tracing::debug!("Archive kept at {}", archive.display());
        }
        RunOutcome::SkippedNoSourceDir { .. } => {}
    }

    Ok(())
}
