//! CLI 命令行参数解析
//!
//! 使用 clap 定义命令行接口并进行参数解析

use crate::config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "locgate",
    version,
    about = "Location telemetry gateway and ops toolkit"
)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// 日志文件路径（默认只输出到标准输出）
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 启动电文接收网关
    Serve {
        /// 监听地址
        #[arg(long, default_value = config::DEFAULT_LISTEN_ADDR)]
        listen: String,

        /// 数据持久化文件
        #[arg(long, default_value = config::DEFAULT_DATA_FILE)]
        data_file: PathBuf,
    },

    /// 对接收接口执行冒烟测试
    Smoke {
        /// 目标接口地址
        #[arg(long, default_value = config::DEFAULT_SMOKE_ENDPOINT)]
        endpoint: String,

        /// 单个请求超时（秒）
        #[arg(long, default_value_t = config::SMOKE_TIMEOUT_DEFAULT.as_secs())]
        timeout: u64,
    },

    /// 查找并终止网关进程
    Reap {
        /// 进程名匹配模式
        #[arg(default_value = config::DEFAULT_REAP_PATTERN)]
        pattern: String,

        /// 先尝试 SIGTERM，超时后再升级为 SIGKILL
        #[arg(long)]
        graceful: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_hardcoded_constants() {
        let cli = Cli::try_parse_from(["locgate", "reap"]).unwrap();
        match cli.command {
            Commands::Reap { pattern, graceful } => {
                assert_eq!(pattern, config::DEFAULT_REAP_PATTERN);
                assert!(!graceful);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["locgate", "smoke"]).unwrap();
        match cli.command {
            Commands::Smoke { endpoint, timeout } => {
                assert_eq!(endpoint, config::DEFAULT_SMOKE_ENDPOINT);
                assert_eq!(timeout, config::SMOKE_TIMEOUT_DEFAULT.as_secs());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "locgate",
            "serve",
            "--listen",
            "127.0.0.1:8080",
            "--data-file",
            "/tmp/store.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Serve { listen, data_file } => {
                assert_eq!(listen, "127.0.0.1:8080");
                assert_eq!(data_file, PathBuf::from("/tmp/store.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
