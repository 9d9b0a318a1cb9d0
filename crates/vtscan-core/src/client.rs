//! 远程扫描 API 客户端
//!
//! 两种请求都发往 `POST {base_url}/scan`：
//! - 上传文件：multipart 表单，字段名 `file`
//! - 提交哈希：JSON `{"hash": "..."}`
//!
//! 每次调用只尝试一次，不做重试。
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde_json::json;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Result, ScanError};
use crate::file::ScanFile;
use crate::payload::RawPayload;

/// 携带令牌的请求头名（后端按此名读取）
pub const AUTH_HEADER: &str = "Bearer";

/// 扫描能力抽象；编排器通过它访问后端
#[async_trait]
pub trait ScanClient: Send + Sync {
    /// 上传文件内容
    async fn submit_file(&self, file: &ScanFile) -> Result<RawPayload>;
    /// 提交预先计算好的哈希
    async fn submit_hash(&self, hash: &str) -> Result<RawPayload>;
}

/// 基于 reqwest 的 HTTP 实现
#[derive(Debug, Clone)]
pub struct HttpScanClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpScanClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vtscan/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// 附加凭据、发送并解码响应
    async fn send(&self, req: RequestBuilder) -> Result<RawPayload> {
        let resp = req.header(AUTH_HEADER, &self.config.api_token).send().await?;
        let status = resp.status();
        debug!(status = status.as_u16(), "scan endpoint responded");

        if !status.is_success() {
            // 响应体读取失败时保留空串，状态码仍然可用
            let body = resp.text().await.unwrap_or_default();
            return Err(ScanError::Http { status: status.as_u16(), body });
        }

        let payload = resp.json::<RawPayload>().await?;
        debug!(?payload, "decoded scan payload");
        Ok(payload)
    }
}

#[async_trait]
impl ScanClient for HttpScanClient {
    async fn submit_file(&self, file: &ScanFile) -> Result<RawPayload> {
        debug!(file = file.name(), size = file.size(), url = %self.config.scan_url(), "submitting file");
        let part = Part::stream_with_length(file.bytes().clone(), file.size())
            .file_name(file.name().to_string());
        let form = Form::new().part("file", part);
        self.send(self.http.post(self.config.scan_url()).multipart(form)).await
    }

    async fn submit_hash(&self, hash: &str) -> Result<RawPayload> {
        debug!(hash, url = %self.config.scan_url(), "submitting hash");
        let body = json!({ "hash": hash });
        self.send(self.http.post(self.config.scan_url()).json(&body)).await
    }
}
