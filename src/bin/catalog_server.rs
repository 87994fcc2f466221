//! 内存产品后端
//! 实现产品 REST 资源：列表、创建、更新、删除与 ID 校验

use std::path::PathBuf;

use catalog::app::backend::{router, ProductStore};
use catalog::app::product::dates;
use catalog::infrastructure::{config, logger::Logger};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "catalog_server", about = "In-memory product catalog backend", version)]
struct Args {
    /// Path to a catalog.toml configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listening port
    #[arg(long)]
    port: Option<u16>,

    /// Start with an empty store
    #[arg(long)]
    empty: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    Logger::init(&config.logging.level);

    let store = ProductStore::new();
    if config.server.seed_samples && !args.empty {
        match store.seed_samples(dates::today()) {
            Ok(count) => info!("✅ 已初始化 {} 个示例产品", count),
            Err(err) => error!(error = %err, "初始化示例数据失败"),
        }
    }

    let app = router(store, &config.server.base_path);

    let port = args.port.unwrap_or(config.server.port);
    let address = format!("{}:{}", config.server.bind_address, port);
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%address, error = %err, "无法绑定地址");
            std::process::exit(1);
        }
    };

    let base = &config.server.base_path;
    info!("🚀 产品后端运行在 http://{}", address);
    info!("📖 API 端点:");
    info!("   GET    {}                   - 获取所有产品", base);
    info!("   POST   {}                   - 创建产品", base);
    info!("   PUT    {}/:id               - 更新产品", base);
    info!("   DELETE {}/:id               - 删除产品", base);
    info!("   GET    {}/verification/:id  - 校验 ID 是否存在", base);
    info!("   GET    /health");

    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "服务器异常退出");
        std::process::exit(1);
    }
}
