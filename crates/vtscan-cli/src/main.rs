use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use vtscan_core::{ClientConfig, HttpScanClient, ScanFile, ScanOrchestrator, ScanState, MAX_UPLOAD_BYTES};

mod render;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "vtscan", version, about = "通过 VirusTotal 后端扫描文件或哈希")]
struct Cli {
    /// 配置文件路径（TOML，可含 base_url / api_token）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 后端根地址，覆盖配置文件与 BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// 访问令牌，覆盖配置文件与 API_TOKEN
    #[arg(long, global = true)]
    token: Option<String>,

    /// 以 JSON 输出结果（即下载报告的格式）
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 上传文件并扫描
    File {
        /// 待扫描文件
        path: PathBuf,
    },
    /// 按哈希查询（至少 16 个字符）
    Hash {
        hash: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    info!(base_url = %config.base_url, "using scan endpoint");
    let client = HttpScanClient::new(config).context("build http client")?;
    let mut orchestrator = ScanOrchestrator::new(client);

    let state = match cli.command {
        Commands::File { path } => {
            let file = ScanFile::open(&path)
                .await
                .with_context(|| format!("read {}", path.display()))?;
            if file.exceeds_upload_limit() {
                warn!(size = file.size(), limit = MAX_UPLOAD_BYTES, "file is larger than the advertised upload limit");
            }
            orchestrator.run_file_scan(file).await
        }
        Commands::Hash { hash } => {
            orchestrator.set_hash_input(hash);
            orchestrator.run_pending_hash_scan().await
        }
    };

    render::show(&state, cli.json)?;
    Ok(match state {
        ScanState::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

/// 组装配置：默认值 → 配置文件 → 环境变量 → 命令行参数
fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path).context("load config file")?,
        None => ClientConfig::from_env(),
    };
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url.as_str());
    }
    if let Some(token) = &cli.token {
        config = config.with_api_token(token.as_str());
    }
    Ok(config)
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，stdout 只留给报告
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
