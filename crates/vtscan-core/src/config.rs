//! 客户端配置（进程级，启动时构建一次）
//!
//! 来源优先级（从低到高）：内置默认值 → TOML 配置文件 → 环境变量 → 调用方显式覆盖。
use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, ScanError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// 后端接受的固定占位令牌
pub const DEFAULT_API_TOKEN: &str = "test";

pub const ENV_BASE_URL: &str = "BASE_URL";
pub const ENV_API_TOKEN: &str = "API_TOKEN";

/// 扫描客户端配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 后端根地址，例如 `http://localhost:8080`
    pub base_url: String,
    /// 每个请求都会附带的静态凭据
    pub api_token: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: DEFAULT_API_TOKEN.to_string(),
        }
    }
}

/// 配置文件结构（两项均可省略）
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    api_token: Option<String>,
}

impl ClientConfig {
    /// 默认值叠加环境变量
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// 从 TOML 文件加载，再叠加环境变量
    pub fn load(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path)
            .map_err(|e| ScanError::Config(format!("{}: {e}", path.display())))?;
        let cfg = Self::from_toml_str(&txt)
            .map_err(|e| ScanError::Config(format!("{}: {e}", path.display())))?;
        Ok(cfg.overlay(|key| std::env::var(key).ok()))
    }

    fn from_toml_str(txt: &str) -> std::result::Result<Self, toml::de::Error> {
        let parsed: ConfigFile = toml::from_str(txt)?;
        Ok(Self::default().merge(parsed.base_url, parsed.api_token))
    }

    /// 用 `lookup` 提供的环境变量覆盖当前值；空字符串忽略
    pub(crate) fn overlay(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        self.merge(lookup(ENV_BASE_URL), lookup(ENV_API_TOKEN))
    }

    fn merge(mut self, base_url: Option<String>, api_token: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|s| !s.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(token) = api_token.filter(|s| !s.is_empty()) {
            self.api_token = token;
        }
        self
    }

    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        self.merge(Some(base_url.into()), None)
    }

    pub fn with_api_token(self, api_token: impl Into<String>) -> Self {
        self.merge(None, Some(api_token.into()))
    }

    /// 扫描端点：`{base_url}/scan`（容忍 base_url 末尾的斜杠）
    pub fn scan_url(&self) -> String {
        format!("{}/scan", self.base_url.trim_end_matches('/'))
    }
}
