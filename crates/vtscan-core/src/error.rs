//! 错误类型（对外暴露）
use thiserror::Error;

/// 扫描流程中可能出现的全部错误
#[derive(Error, Debug)]
pub enum ScanError {
    /// 文件读取失败（打开、读到一半中断等）
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    /// 网络不可达、连接被拒绝、响应体无法解码
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 非 2xx 响应；保留状态码与响应体用于诊断
    #[error("API error: {status} - {body}")]
    Http { status: u16, body: String },

    /// 后端返回了结构化的错误标记
    #[error("API error: {message}")]
    Api { message: String },

    #[error("{0}")]
    Validation(String),

    /// 配置文件不可读或格式非法
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
