//! 后端原始响应的解码
//!
//! 后端返回的 JSON 有四种形态：引擎统计对象、`error` 标记、`not_found` 标记、
//! 以及 `null`/无法识别的内容。这里在 API 边界一次性解码成 `RawPayload`，
//! 之后由 normalize 做穷尽匹配。
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 统计字段名（与后端 last_analysis_stats 保持一致）
const COUNT_KEYS: [&str; 4] = ["harmless", "malicious", "suspicious", "undetected"];

/// 引擎判定计数；缺失字段按 0 处理
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub harmless: u64,
    pub malicious: u64,
    pub suspicious: u64,
    pub undetected: u64,
}

impl EngineStats {
    /// 参与统计的引擎总数
    pub fn total(&self) -> u64 {
        self.harmless
            .saturating_add(self.malicious)
            .saturating_add(self.suspicious)
            .saturating_add(self.undetected)
    }

    /// 判定为恶意或可疑的引擎数
    pub fn detected(&self) -> u64 {
        self.malicious.saturating_add(self.suspicious)
    }
}

/// 解码后的后端响应
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum RawPayload {
    /// 后端报告的结构化错误
    Error { message: Option<String> },
    /// 信誉库中不存在该样本
    NotFound,
    Stats(EngineStats),
    /// `null`、非对象、或不含任何统计字段的对象
    Empty,
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        let obj = match value.as_object() {
            Some(o) => o,
            None => return RawPayload::Empty,
        };

        // 优先级：error → not_found → 统计 → 其他
        if truthy(obj.get("error")) {
            let message = obj.get("message").and_then(Value::as_str).map(str::to_owned);
            return RawPayload::Error { message };
        }
        if truthy(obj.get("not_found")) {
            return RawPayload::NotFound;
        }
        if !COUNT_KEYS.iter().any(|k| obj.contains_key(*k)) {
            return RawPayload::Empty;
        }

        let count = |key: &str| obj.get(key).and_then(Value::as_u64).unwrap_or(0);
        RawPayload::Stats(EngineStats {
            harmless: count("harmless"),
            malicious: count("malicious"),
            suspicious: count("suspicious"),
            undetected: count("undetected"),
        })
    }
}

/// JSON 真值判断：false / null / 0 / "" 视为假
fn truthy(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
