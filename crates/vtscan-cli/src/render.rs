//! 终端渲染（结果页 / 错误横幅）
use anyhow::Result;
use std::io::Write;
use vtscan_core::{detection_rate, format_file_size, headline, ScanResult, ScanState};

/// 输出最终状态：错误信息走 stderr，报告走 stdout
pub fn show(state: &ScanState, json: bool) -> Result<()> {
    if let Some(msg) = state.error() {
        eprintln!("error: {msg}");
    }
    let Some(result) = state.result() else {
        return Ok(());
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, result)?;
        writeln!(out)?;
    } else {
        write_report(&mut out, result)?;
    }
    out.flush()?;
    Ok(())
}

/// 文本报告
pub fn write_report(out: &mut dyn Write, r: &ScanResult) -> Result<()> {
    let engines = r.engines();
    let rate = match detection_rate(engines) {
        Some(p) => format!("{p:.1}%"),
        None => "n/a".to_string(),
    };

    writeln!(out, "{}", headline(r))?;
    writeln!(out, "Analysis complete using {} detection engines", engines.total)?;
    writeln!(out)?;
    writeln!(out, "  Detection rate : {} / {} ({rate})", engines.detected, engines.total)?;
    writeln!(out, "  File           : {} ({})", r.file_name(), format_file_size(r.file_size()))?;
    writeln!(out, "  Scan time      : {}", r.scan_date().to_rfc3339())?;
    writeln!(out, "  Signature      : {}", r.hash())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtscan_core::{normalize, EngineStats, RawPayload, ScanContext};

    fn render(r: &ScanResult) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, r).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn infected_report() {
        let ctx = ScanContext::for_file("dropper.exe", 1536, "ab".repeat(32));
        let payload = RawPayload::Stats(EngineStats { harmless: 65, malicious: 3, suspicious: 2, undetected: 0 });
        let text = render(&normalize(&payload, &ctx).unwrap());
        assert!(text.starts_with("5 Threats Detected\n"));
        assert!(text.contains("Detection rate : 5 / 70 (7.1%)"));
        assert!(text.contains("File           : dropper.exe (1.5 KB)"));
    }

    #[test]
    fn not_found_report_has_no_rate() {
        let ctx = ScanContext::for_hash("0123456789abcdef0123");
        let text = render(&normalize(&RawPayload::NotFound, &ctx).unwrap());
        assert!(text.starts_with("File is Secure\n"));
        assert!(text.contains("0 / 0 (n/a)"));
        assert!(text.contains("Hash: 0123456789abcdef... (0 Bytes)"));
    }
}
