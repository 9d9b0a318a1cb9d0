//! 结果归一化：RawPayload + 上下文 → ScanResult
use chrono::{DateTime, Utc};

use crate::error::{Result, ScanError};
use crate::payload::RawPayload;
use crate::types::{EngineCounts, ScanContext, ScanResult};

/// 以当前时间作为扫描完成时间进行归一化
pub fn normalize(payload: &RawPayload, ctx: &ScanContext) -> Result<ScanResult> {
    normalize_at(payload, ctx, Utc::now())
}

/// 归一化策略（按优先级）：
/// 1. error 标记 → `ScanError::Api`
/// 2. not_found → 干净，引擎数 0
/// 3. 统计计数 → total = 四项之和，detected = malicious + suspicious
/// 4. 空/无法识别 → 干净，引擎数按 70 兜底
pub fn normalize_at(payload: &RawPayload, ctx: &ScanContext, at: DateTime<Utc>) -> Result<ScanResult> {
    let engines = match payload {
        RawPayload::Error { message } => {
            return Err(ScanError::Api {
                message: message.clone().unwrap_or_else(|| "unknown error".to_string()),
            })
        }
        RawPayload::NotFound => EngineCounts::default(),
        RawPayload::Stats(stats) => EngineCounts { total: stats.total(), detected: stats.detected() },
        RawPayload::Empty => EngineCounts::nominal_clean(),
    };
    Ok(ScanResult::new(ctx, engines, at))
}

/// 请求失败时展示的兜底结果（与规则 4 相同）
pub fn fallback(ctx: &ScanContext) -> ScanResult {
    ScanResult::new(ctx, EngineCounts::nominal_clean(), Utc::now())
}
