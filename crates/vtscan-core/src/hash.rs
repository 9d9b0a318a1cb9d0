//! SHA-256 摘要计算
//!
//! 输出统一为 64 位小写十六进制字符串。
use sha2::{Digest, Sha256};
use std::io::Read;

use crate::error::Result;

/// 流式读取时的块大小
pub const BLOCK_SIZE: usize = 4096;
/// 协作式计算时，每处理这么多字节就让出一次调度
const YIELD_EVERY: usize = 1024 * 1024; // 1 MiB

/// 对内存中的字节计算摘要（纯函数）
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// 按块读取任意 `Read` 并计算摘要；读取失败映射为 `ScanError::Read`
pub fn sha256_reader<R: Read>(mut reader: R) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BLOCK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// 协作式摘要：分块更新，块之间让出执行权，
/// 使同一任务中 `join!` 的网络请求可以同时推进
pub(crate) async fn sha256_cooperative(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    for block in bytes.chunks(YIELD_EVERY) {
        hasher.update(block);
        tokio::task::yield_now().await;
    }
    hex::encode(hasher.finalize())
}
