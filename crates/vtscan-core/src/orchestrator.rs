//! 扫描编排：摘要 + 提交 + 归一化，并维护界面状态
//!
//! 状态流转：`Idle → Busy → Done | Failed`，新的动作从头开始。
//! 除哈希长度校验外，任何失败都会被转成提示信息，同时给出兜底的“干净”结果，
//! 保证界面始终有结果可展示。
use tokio::sync::watch;
use tracing::{info, warn};

use crate::client::ScanClient;
use crate::error::ScanError;
use crate::file::ScanFile;
use crate::hash::sha256_cooperative;
use crate::normalize::{fallback, normalize};
use crate::types::{ScanContext, ScanResult};

/// 哈希输入（去除首尾空白后）的最小长度
pub const MIN_HASH_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    File,
    Hash,
}

/// 界面状态
#[derive(Debug, Clone, PartialEq)]
pub enum ScanState {
    Idle,
    Busy(ScanKind),
    /// 有结果可展示；`error` 非空表示结果为兜底值
    Done { result: ScanResult, error: Option<String> },
    /// 没有结果（仅输入校验失败）
    Failed(String),
}

impl ScanState {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy(_))
    }

    pub fn result(&self) -> Option<&ScanResult> {
        match self {
            Self::Done { result, .. } => Some(result),
            _ => None,
        }
    }

    /// 需要展示给用户的错误信息
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Done { error, .. } => error.as_deref(),
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// 扫描编排器
///
/// 扫描方法都需要 `&mut self`，同一时刻最多只有一个扫描在进行。
pub struct ScanOrchestrator<C> {
    client: C,
    state: watch::Sender<ScanState>,
    hash_input: String,
}

impl<C: ScanClient> ScanOrchestrator<C> {
    pub fn new(client: C) -> Self {
        let (state, _) = watch::channel(ScanState::Idle);
        Self { client, state, hash_input: String::new() }
    }

    /// 当前状态快照
    pub fn state(&self) -> ScanState {
        self.state.borrow().clone()
    }

    /// 订阅状态变化（用于渲染忙碌指示）
    pub fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.state.subscribe()
    }

    pub fn hash_input(&self) -> &str {
        &self.hash_input
    }

    pub fn set_hash_input(&mut self, text: impl Into<String>) {
        self.hash_input = text.into();
    }

    /// 清空结果、错误与待提交的哈希文本，回到 Idle
    pub fn reset(&mut self) {
        self.hash_input.clear();
        self.state.send_replace(ScanState::Idle);
    }

    /// 扫描文件：摘要计算与上传并发进行，两者都完成后才构造结果
    pub async fn run_file_scan(&mut self, file: ScanFile) -> ScanState {
        self.begin(ScanKind::File);
        info!(file = file.name(), size = file.size(), "starting file scan");

        let (digest, submitted) =
            tokio::join!(sha256_cooperative(file.bytes()), self.client.submit_file(&file));
        let ctx = ScanContext::for_file(file.name(), file.size(), digest);
        drop(file);

        let state = self.settle(submitted.and_then(|payload| normalize(&payload, &ctx)), &ctx);
        self.finish(state)
    }

    /// 按哈希扫描；长度不足时直接失败，不发起网络请求
    pub async fn run_hash_scan(&mut self, hash: &str) -> ScanState {
        let trimmed = hash.trim();
        if trimmed.chars().count() < MIN_HASH_LEN {
            let err = ScanError::Validation(format!("hash must be at least {MIN_HASH_LEN} characters"));
            warn!(len = trimmed.chars().count(), "rejected hash input");
            return self.finish(ScanState::Failed(err.to_string()));
        }

        self.begin(ScanKind::Hash);
        info!(hash = trimmed, "starting hash scan");

        let ctx = ScanContext::for_hash(trimmed);
        let submitted = self.client.submit_hash(trimmed).await;
        let state = self.settle(submitted.and_then(|payload| normalize(&payload, &ctx)), &ctx);
        self.finish(state)
    }

    /// 扫描当前输入框中的哈希文本
    pub async fn run_pending_hash_scan(&mut self) -> ScanState {
        let hash = self.hash_input.clone();
        self.run_hash_scan(&hash).await
    }

    /// 直接由上一次的 Done/Failed 切到 Busy；上一次结果在此丢弃
    fn begin(&mut self, kind: ScanKind) {
        self.state.send_replace(ScanState::Busy(kind));
    }

    fn settle(&self, outcome: crate::Result<ScanResult>, ctx: &ScanContext) -> ScanState {
        match outcome {
            Ok(result) => {
                info!(clean = result.is_clean(), detected = result.engines().detected, total = result.engines().total, "scan complete");
                ScanState::Done { result, error: None }
            }
            Err(err) => {
                warn!(error = %err, "scan failed, showing fallback result");
                ScanState::Done { result: fallback(ctx), error: Some(err.to_string()) }
            }
        }
    }

    fn finish(&mut self, state: ScanState) -> ScanState {
        self.state.send_replace(state.clone());
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::RawPayload;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// 记录调用次数，始终返回固定响应
    struct Fixed {
        payload: RawPayload,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ScanClient for Fixed {
        async fn submit_file(&self, _file: &ScanFile) -> crate::Result<RawPayload> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.payload.clone())
        }

        async fn submit_hash(&self, _hash: &str) -> crate::Result<RawPayload> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.payload.clone())
        }
    }

    fn fixed(payload: RawPayload) -> (ScanOrchestrator<Fixed>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (ScanOrchestrator::new(Fixed { payload, calls: calls.clone() }), calls)
    }

    #[tokio::test]
    async fn starts_idle() {
        let (orch, _) = fixed(RawPayload::Empty);
        assert_eq!(orch.state(), ScanState::Idle);
        assert!(orch.state().result().is_none());
        assert!(orch.state().error().is_none());
    }

    #[tokio::test]
    async fn short_hash_fails_without_network() {
        let (mut orch, calls) = fixed(RawPayload::Empty);
        let state = orch.run_hash_scan("abc").await;
        assert!(matches!(state, ScanState::Failed(_)));
        assert!(state.result().is_none());
        assert_eq!(state.error(), Some("hash must be at least 16 characters"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn hash_is_trimmed_before_validation_and_use() {
        let (mut orch, calls) = fixed(RawPayload::NotFound);
        let state = orch.run_hash_scan("   0123456789abcdef   ").await;
        let r = state.result().unwrap();
        assert_eq!(r.hash(), "0123456789abcdef");
        assert_eq!(r.file_name(), "Hash: 0123456789abcdef...");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let state = orch.run_hash_scan("  0123456789abcde  ").await;
        assert!(matches!(state, ScanState::Failed(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn api_error_marker_falls_back_with_message() {
        let (mut orch, _) = fixed(RawPayload::Error { message: Some("quota".into()) });
        let state = orch.run_hash_scan(&"a".repeat(64)).await;
        let r = state.result().unwrap();
        assert!(r.is_clean());
        assert_eq!(r.engines().total, 70);
        assert_eq!(state.error(), Some("API error: quota"));
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let (mut orch, _) = fixed(RawPayload::Empty);
        orch.set_hash_input("0123456789abcdef0123");
        let state = orch.run_pending_hash_scan().await;
        assert!(state.result().is_some());
        assert_eq!(orch.hash_input(), "0123456789abcdef0123");

        orch.reset();
        assert_eq!(orch.state(), ScanState::Idle);
        assert_eq!(orch.hash_input(), "");
    }

    #[tokio::test]
    async fn subscribers_see_final_state() {
        let (mut orch, _) = fixed(RawPayload::Empty);
        let rx = orch.subscribe();
        orch.run_file_scan(ScanFile::from_bytes("a.bin", vec![1u8, 2, 3])).await;
        let seen = rx.borrow().clone();
        assert_eq!(seen.result().map(|r| r.file_size()), Some(3));
        assert!(!seen.is_busy());
    }
}
