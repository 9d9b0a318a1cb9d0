//! 测试用的本地后端
#![allow(dead_code)]

use axum::Router;
use std::net::SocketAddr;
use vtscan_core::{ClientConfig, HttpScanClient};

/// 在随机端口上启动 axum 服务，返回根地址
pub async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// 一个确定没有监听者的地址
pub async fn dead_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn client_for(base_url: &str, token: &str) -> HttpScanClient {
    let config = ClientConfig::default().with_base_url(base_url).with_api_token(token);
    HttpScanClient::new(config).unwrap()
}
