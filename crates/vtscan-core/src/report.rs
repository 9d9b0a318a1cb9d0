//! 报告展示辅助函数
use crate::types::{EngineCounts, ScanResult};

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// 以 1024 为进制格式化大小，最多保留两位小数并去掉末尾的 0
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let num = format!("{value:.2}");
    let num = num.trim_end_matches('0').trim_end_matches('.');
    format!("{num} {}", UNITS[unit])
}

/// 检出率（百分比）；引擎总数为 0 时无意义，返回 None
pub fn detection_rate(engines: EngineCounts) -> Option<f64> {
    if engines.total == 0 {
        return None;
    }
    Some(engines.detected as f64 / engines.total as f64 * 100.0)
}

/// 结果页标题
pub fn headline(result: &ScanResult) -> String {
    if result.is_clean() {
        return "File is Secure".to_string();
    }
    let n = result.threat_count();
    format!("{n} Threat{} Detected", if n > 1 { "s" } else { "" })
}
