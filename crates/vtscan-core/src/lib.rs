//! 扫描核心库
//!
//! 设计要点：
//! - 文件摘要（SHA-256）与上传并发执行，二者都完成后才生成结果。
//! - 后端响应在 API 边界一次性解码为 `RawPayload`，归一化阶段做穷尽匹配。
//! - 除输入校验外的失败都会被编排器转为提示信息 + 兜底“干净”结果。
//! - 配置显式传入客户端构造函数，不在调用处零散读取环境变量。

mod client;
mod config;
mod error;
mod file;
mod hash;
mod normalize;
mod orchestrator;
mod payload;
mod report;
mod types;

pub use client::{HttpScanClient, ScanClient, AUTH_HEADER};
pub use config::{ClientConfig, DEFAULT_API_TOKEN, DEFAULT_BASE_URL, ENV_API_TOKEN, ENV_BASE_URL};
pub use error::{Result, ScanError};
pub use file::{ScanFile, MAX_UPLOAD_BYTES};
pub use hash::{sha256_hex, sha256_reader, BLOCK_SIZE};
pub use normalize::{fallback, normalize, normalize_at};
pub use orchestrator::{ScanKind, ScanOrchestrator, ScanState, MIN_HASH_LEN};
pub use payload::{EngineStats, RawPayload};
pub use report::{detection_rate, format_file_size, headline};
pub use types::{EngineCounts, ScanContext, ScanResult, HASH_LABEL_PREFIX, NOMINAL_ENGINE_TOTAL};
