use clap::Parser;
use locgate::commands::{self, Cli, Commands};
use locgate::logging::init_logger;
use std::process::ExitCode;
use std::time::Duration;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 初始化日志系统
    if let Err(err) = init_logger(cli.log_level.as_deref(), cli.log_file.clone()) {
        eprintln!("failed to initialise logging: {}", err);
        return ExitCode::from(1);
    }

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        // Partial failure: some PIDs or smoke cases did not go through.
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{}", err.user_message());
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> locgate::Result<bool> {
    match cli.command {
        Commands::Serve { listen, data_file } => {
            commands::serve::handle_serve(&listen, data_file).await?;
            Ok(true)
        }
        Commands::Smoke { endpoint, timeout } => {
            commands::smoke::handle_smoke(&endpoint, Duration::from_secs(timeout)).await
        }
        Commands::Reap { pattern, graceful } => commands::reap::handle_reap(&pattern, graceful),
    }
}
