use clap::Parser;
use codacy_security_enabler::utils::logger;
use codacy_security_enabler::{CliConfig, FixedDelay, SecurityEnabler, SecurityTool};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("Welcome to Codacy Security Enabler");
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    // 驗證參數；失敗時只輸出訊息，不改變結束碼
    let config = match cli.to_enabler_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Argument validation failed: {}", e);
            eprintln!("{}", e.user_friendly_message());
            return;
        }
    };
    println!("Input arguments validated successfully.");
    tracing::debug!("Run config: {:?}", config);

    let summary =
        match SecurityEnabler::run_with_config(&config, SecurityTool::defaults(), FixedDelay::default())
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!("❌ {} (Category: {:?})", e, e.category());
                eprintln!("{}", e.user_friendly_message());
                eprintln!("{}", e.recovery_suggestion());
                return;
            }
        };

    println!(
        "Done: {} repositories configured, {} failed",
        summary.total_configured(),
        summary.total_failed()
    );
    for tool in summary.skipped_tools() {
        println!("⚠️ {} was skipped because its patterns could not be fetched", tool.name);
    }
}
