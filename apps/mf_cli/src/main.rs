// apps/mf_cli/src/main.rs

//! MariFvm 命令行界面
//!
//! 提供隐式松弛的配置校验与演示工具。
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 5: Application**，遵循以下原则：
//! - 零泛型语法：场值类型在本层固定为 f64
//! - 松弛因子经 `RelaxationControls` 查找，命令行可覆盖

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// MariFvm 隐式矩阵松弛命令行工具
#[derive(Parser)]
#[command(name = "mf_cli")]
#[command(author = "MariFvm Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MariFvm implicit matrix relaxation toolkit", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行松弛演示
    Relax(commands::relax::RelaxArgs),
    /// 验证配置
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Relax(args) => commands::relax::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
