use crate::host::{HostError, HostErrorCode, SourceHost};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use stepcheck_model::{ChangedFile, RepoTag};
use tokio::sync::Mutex;

/// In-memory `SourceHost` for tests. Keys are the PR id, raw-content URL,
/// and tags-endpoint URL respectively; a missing key behaves like an
/// upstream non-2xx.
#[derive(Default)]
pub struct FakeHost {
    pub files: Mutex<HashMap<String, Vec<ChangedFile>>>,
    pub contents: Mutex<HashMap<String, Vec<u8>>>,
    pub tags: Mutex<HashMap<String, Vec<RepoTag>>>,
    pub file_list_calls: AtomicU64,
    pub content_calls: AtomicU64,
    pub tag_calls: AtomicU64,
}

#[async_trait]
impl SourceHost for FakeHost {
    async fn pull_request_files(&self, pr_id: &str) -> Result<Vec<ChangedFile>, HostError> {
        self.file_list_calls
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        self.files
            .lock()
            .await
            .get(pr_id)
            .cloned()
            .ok_or_else(|| HostError::new(HostErrorCode::Status, "pull request not found"))
    }

    async fn file_content(&self, raw_url: &str) -> Result<Vec<u8>, HostError> {
        self.content_calls
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        self.contents
            .lock()
            .await
            .get(raw_url)
            .cloned()
            .ok_or_else(|| HostError::new(HostErrorCode::Status, "file content not found"))
    }

    async fn repo_tags(&self, tags_url: &str) -> Result<Vec<RepoTag>, HostError> {
        self.tag_calls
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        self.tags
            .lock()
            .await
            .get(tags_url)
            .cloned()
            .ok_or_else(|| HostError::new(HostErrorCode::Status, "tag listing not found"))
    }
}
