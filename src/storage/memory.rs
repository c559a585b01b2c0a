//! In-memory store for tests / 测试用内存存储

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::ArtifactStore;

/// Stored object / 已存储对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Records every call, keeps objects in memory / 记录所有调用
#[derive(Default)]
pub struct MemoryStore {
    buckets: HashSet<String>,
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    calls: Mutex<Vec<String>>,
    fail_put: bool,
    fail_presign: bool,
}

impl MemoryStore {
    pub fn with_bucket(bucket: &str) -> Self {
        let mut store = Self::default();
        store.buckets.insert(bucket.to_string());
        store
    }

    pub fn failing_put(mut self) -> Self {
        self.fail_put = true;
        self
    }

    pub fn failing_presign(mut self) -> Self {
        self.fail_presign = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ArtifactStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        self.record(format!("bucket_exists:{}", bucket));
        Ok(self.buckets.contains(bucket))
    }

    async fn put_file(&self, bucket: &str, key: &str, path: &Path, content_type: &str) -> Result<u64> {
        self.record(format!("put_file:{}/{}", bucket, key));
        if self.fail_put {
            return Err(anyhow!("connection reset by peer"));
        }
        let data = tokio::fs::read(path).await?;
        let size = data.len() as u64;
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject { data, content_type: content_type.to_string() },
        );
        Ok(size)
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expiry_secs: u32,
        download_name: &str,
    ) -> Result<Option<String>> {
        self.record(format!("presign_get:{}/{}", bucket, key));
        if self.fail_presign {
            return Err(anyhow!("presign failed"));
        }
        Ok(Some(format!(
            "memory://{}/{}?expires={}&name={}",
            bucket, key, expiry_secs, download_name
        )))
    }
}
