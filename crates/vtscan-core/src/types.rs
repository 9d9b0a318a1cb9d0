//! 公共类型（对外暴露）
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 界面宣称的引擎数量；未知结果按此数值兜底展示
pub const NOMINAL_ENGINE_TOTAL: u64 = 70;
/// 哈希标签中保留的前缀长度
pub const HASH_LABEL_PREFIX: usize = 16;

/// 检出率展示所需的聚合计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineCounts {
    pub total: u64,
    pub detected: u64,
}

impl EngineCounts {
    /// 无结果时的兜底计数（70 个引擎、0 检出）
    pub fn nominal_clean() -> Self {
        Self { total: NOMINAL_ENGINE_TOTAL, detected: 0 }
    }
}

/// 生成结果所需的上下文：展示名、大小、摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanContext {
    pub label: String,
    pub size: u64,
    pub hash: String,
}

impl ScanContext {
    pub fn for_file(name: impl Into<String>, size: u64, hash: impl Into<String>) -> Self {
        Self { label: name.into(), size, hash: hash.into() }
    }

    /// 仅按哈希扫描：标签为 `Hash: <前 16 个字符>...`，大小为 0
    pub fn for_hash(hash: impl Into<String>) -> Self {
        let hash = hash.into();
        let prefix: String = hash.chars().take(HASH_LABEL_PREFIX).collect();
        Self { label: format!("Hash: {prefix}..."), size: 0, hash }
    }
}

/// 一次扫描的最终结果
///
/// 构造后不可变；`threat_count == engines.detected`、`is_clean == (threat_count == 0)`
/// 由构造函数保证。序列化字段名为 camelCase（即“下载报告”的格式）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    file_name: String,
    file_size: u64,
    scan_date: DateTime<Utc>,
    is_clean: bool,
    threat_count: u64,
    engines: EngineCounts,
    hash: String,
}

impl ScanResult {
    pub fn new(ctx: &ScanContext, engines: EngineCounts, scan_date: DateTime<Utc>) -> Self {
        Self {
            file_name: ctx.label.clone(),
            file_size: ctx.size,
            scan_date,
            is_clean: engines.detected == 0,
            threat_count: engines.detected,
            engines,
            hash: ctx.hash.clone(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn scan_date(&self) -> DateTime<Utc> {
        self.scan_date
    }

    pub fn is_clean(&self) -> bool {
        self.is_clean
    }

    pub fn threat_count(&self) -> u64 {
        self.threat_count
    }

    pub fn engines(&self) -> EngineCounts {
        self.engines
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }
}
